//! AdVision - TV commercial storyboards from a product brief
//!
//! AdVision asks a Gemini text model for a six-frame advertising script (hook,
//! problem, product, benefit, payoff, call to action) and then renders every
//! frame with a Gemini image model, all frames in parallel.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use advision::{GeminiClient, Orchestrator, ProductBrief, StoryboardSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(GeminiClient::new()?);
//!     let mut session = StoryboardSession::new(Orchestrator::new(client.clone(), client));
//!
//!     let brief = ProductBrief::builder()
//!         .product_name("AeroSynth Oil")
//!         .description("High-performance di-ester base engine oil.")
//!         .build()?;
//!
//!     if let Some(report) = session.submit(brief).await {
//!         println!("{} frames rendered", report.succeeded().len());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry tracing and metrics with a stdout exporter
//! - `api` - Enable tests that call the real Gemini API
//!
//! # Architecture
//!
//! - `advision_error` - Error types
//! - `advision_core` - Briefs, frames, scripts, images, configuration
//! - `advision_interface` - `ScriptGenerator` and `ImageGenerator` traits
//! - `advision_models` - Gemini client
//! - `advision_storyboard` - Frame store, orchestrator, session
//!
//! This crate re-exports everything for convenience.

pub use advision_core::*;
pub use advision_error::*;
pub use advision_interface::*;
pub use advision_models::*;
pub use advision_storyboard::*;

pub mod render;

// OpenTelemetry observability module
#[cfg(feature = "observability")]
pub mod observability;
