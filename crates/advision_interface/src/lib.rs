//! Trait definitions for the remote collaborators of the storyboard pipeline.
//!
//! The orchestrator only ever talks to these traits, so providers and test
//! doubles are interchangeable.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{ImageGenerator, ScriptGenerator};
