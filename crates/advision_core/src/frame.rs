//! Storyboard frames and their per-frame status lifecycle.

use crate::ImagePayload;
use serde::Serialize;

/// 1-based position of a frame within its storyboard.
pub type FrameId = u32;

/// Where a frame's image request stands.
///
/// ```text
/// idle -> loading -> success | error
/// success | error -> loading   (regenerate)
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum FrameStatus {
    /// No image requested yet
    #[default]
    #[display("idle")]
    Idle,
    /// Image request in flight
    #[display("loading")]
    Loading,
    /// Image rendered
    #[display("success")]
    Success,
    /// Image request failed
    #[display("error")]
    Error,
}

impl FrameStatus {
    /// Whether a request for this frame has settled.
    pub fn is_settled(&self) -> bool {
        matches!(self, FrameStatus::Success | FrameStatus::Error)
    }
}

/// Settlement of a single image request.
///
/// Failures carry only a reason for logging; they never reach the data model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The image model returned an image
    Rendered(ImagePayload),
    /// The request failed for any reason
    Failed(String),
}

impl FrameOutcome {
    /// Status a frame takes on when this outcome is applied.
    pub fn status(&self) -> FrameStatus {
        match self {
            FrameOutcome::Rendered(_) => FrameStatus::Success,
            FrameOutcome::Failed(_) => FrameStatus::Error,
        }
    }
}

/// One advertising shot with its script text and rendered image.
///
/// Script fields are fixed at creation; only `status` and `image` change, and
/// only through [`StoryboardFrame::mark_loading`] and [`StoryboardFrame::settle`].
///
/// # Examples
///
/// ```
/// use advision_core::{FrameStatus, StoryboardFrame};
///
/// let frame = StoryboardFrame::builder()
///     .id(1u32)
///     .shot_type("Extreme Close Up")
///     .description("Oil pours in slow motion")
///     .visual_prompt("golden oil, macro lens, volumetric light")
///     .voiceover("Music swells")
///     .time("2s")
///     .build()
///     .unwrap();
///
/// assert_eq!(*frame.status(), FrameStatus::Idle);
/// assert!(frame.image().is_none());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, derive_builder::Builder, derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct StoryboardFrame {
    /// 1-based sequence position
    id: FrameId,
    /// Camera or shot descriptor
    shot_type: String,
    /// Director's action description
    description: String,
    /// Exact text sent to the image generator
    visual_prompt: String,
    /// Spoken words or audio description
    voiceover: String,
    /// Estimated shot duration
    time: String,
    /// Most recent rendered image, possibly stale while loading
    #[builder(default)]
    image: Option<ImagePayload>,
    /// Image request status
    #[builder(default)]
    status: FrameStatus,
}

impl StoryboardFrame {
    /// Creates a new builder for `StoryboardFrame`.
    pub fn builder() -> StoryboardFrameBuilder {
        StoryboardFrameBuilder::default()
    }

    /// Enter `loading`, keeping any previous image as stale display content.
    pub fn mark_loading(&mut self) {
        self.status = FrameStatus::Loading;
    }

    /// Apply a settled image request.
    ///
    /// A failure keeps the previous image as stale data; `status` alone tells
    /// the renderer not to show it as current.
    pub fn settle(&mut self, outcome: FrameOutcome) {
        self.status = outcome.status();
        if let FrameOutcome::Rendered(image) = outcome {
            self.image = Some(image);
        }
    }

    /// The image to display as current, present only on success.
    pub fn current_image(&self) -> Option<&ImagePayload> {
        match self.status {
            FrameStatus::Success => self.image.as_ref(),
            _ => None,
        }
    }
}
