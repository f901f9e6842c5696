//! Error types for the AdVision storyboard generator.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! Every concern converts into [`AdvisionError`], so `?` works across crate
//! boundaries.
//!
//! # Examples
//!
//! ```
//! use advision_error::{AdvisionResult, GeminiError, GeminiErrorKind};
//!
//! fn fetch_script() -> AdvisionResult<String> {
//!     Err(GeminiError::new(GeminiErrorKind::EmptyResponse))?
//! }
//!
//! match fetch_script() {
//!     Ok(script) => println!("Got: {}", script),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod gemini;
mod io;
mod json;
mod storyboard;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{AdvisionError, AdvisionErrorKind, AdvisionResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use io::IoError;
pub use json::JsonError;
pub use storyboard::{StoryboardError, StoryboardErrorKind};
