//! Storyboard generation for AdVision.
//!
//! - [`FrameStore`] holds the frames of the current storyboard, keyed by id and
//!   guarded by an epoch so late results from a replaced storyboard are dropped
//! - [`Orchestrator`] generates the script and fans out one image request per
//!   frame, merging each result into the store as it arrives
//! - [`StoryboardSession`] adds the view state a front end renders

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod orchestrator;
mod session;
mod store;

pub use orchestrator::{BatchReport, Orchestrator, Settlement};
pub use session::{StoryboardSession, View};
pub use store::{Epoch, FrameAction, FrameStore, StoreSnapshot};
