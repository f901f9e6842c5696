//! Gemini provider integration for AdVision.
//!
//! [`GeminiClient`] implements both [`advision_interface::ScriptGenerator`] and
//! [`advision_interface::ImageGenerator`] against the Gemini REST API.
//!
//! # Example
//!
//! ```no_run
//! use advision_core::{AspectRatio, ProductBrief};
//! use advision_interface::{ImageGenerator, ScriptGenerator};
//! use advision_models::GeminiClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new()?;
//! let brief = ProductBrief::builder()
//!     .product_name("AeroSynth Oil")
//!     .description("High-performance di-ester base engine oil.")
//!     .build()?;
//!
//! let script = client.generate_script(&brief).await?;
//! let first = &script.storyboard()[0];
//! let image = client
//!     .generate_image(first.visual_generation_prompt(), AspectRatio::Widescreen)
//!     .await?;
//! println!("{} bytes", image.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gemini;
mod metrics;

pub use gemini::{
    Candidate, Content, GeminiClient, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, ImageConfig, InlineData, Part, PromptFeedback, SCRIPT_SYSTEM_INSTRUCTION,
    script_prompt, script_response_schema, strip_code_fences,
};
pub use metrics::{GenerationMetrics, classify_error};
