//! Core data types for the AdVision storyboard generator.
//!
//! This crate holds the data model shared by every other crate: the product
//! brief collected from the user, the storyboard frames and their status
//! lifecycle, the raw script returned by the text model, rendered image
//! payloads, and the layered configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod brief;
mod config;
mod frame;
mod image;
mod script;

pub use brief::{DEFAULT_TONE, ProductBrief, ProductBriefBuilder};
pub use config::{AdvisionConfig, GeminiConfig, StoryboardConfig};
pub use frame::{FrameId, FrameOutcome, FrameStatus, StoryboardFrame, StoryboardFrameBuilder};
pub use image::{AspectRatio, DEFAULT_IMAGE_MIME, ImagePayload};
pub use script::{FRAME_COUNT, ScriptEntry, ScriptEntryBuilder, ScriptResult};
