//! Google Gemini REST API client.
//!
//! Both operations go through `models/{model}:generateContent`:
//! - Script generation asks the text model for JSON matching a strict schema
//! - Image generation asks the image model for a single inline image

mod client;
mod dto;
mod prompt;

pub use client::GeminiClient;
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    ImageConfig, InlineData, Part, PromptFeedback,
};
pub use prompt::{SCRIPT_SYSTEM_INSTRUCTION, script_prompt, script_response_schema, strip_code_fences};

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, advision_error::GeminiError>;
