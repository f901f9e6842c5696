//! Raw storyboard script as returned by the text model.

use crate::{FrameId, StoryboardFrame};
use advision_error::{BuilderError, BuilderErrorKind, StoryboardError, StoryboardErrorKind};
use serde::{Deserialize, Serialize};

/// Number of frames every storyboard carries.
pub const FRAME_COUNT: usize = 6;

/// One frame description in the text model's wire format.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_builder::Builder,
    derive_getters::Getters,
)]
#[builder(setter(into))]
pub struct ScriptEntry {
    /// Sequence order, 1-based
    frame_number: i64,
    /// Camera or shot descriptor
    shot_type: String,
    /// Director's visual instructions
    action_description: String,
    /// Detailed prompt for the image model
    visual_generation_prompt: String,
    /// Spoken words or audio description
    voiceover_script: String,
    /// Shot duration, e.g. "2s"
    estimated_duration: String,
}

impl ScriptEntry {
    /// Creates a new builder for `ScriptEntry`.
    pub fn builder() -> ScriptEntryBuilder {
        ScriptEntryBuilder::default()
    }

    fn require_text(&self) -> Result<(), StoryboardError> {
        let fields = [
            ("shot_type", &self.shot_type),
            ("action_description", &self.action_description),
            ("visual_generation_prompt", &self.visual_generation_prompt),
            ("voiceover_script", &self.voiceover_script),
            ("estimated_duration", &self.estimated_duration),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(StoryboardError::new(StoryboardErrorKind::EmptyField {
                    frame_number: self.frame_number,
                    field: name.to_string(),
                }));
            }
        }
        Ok(())
    }

    fn into_frame(self, id: FrameId) -> Result<StoryboardFrame, BuilderError> {
        StoryboardFrame::builder()
            .id(id)
            .shot_type(self.shot_type)
            .description(self.action_description)
            .visual_prompt(self.visual_generation_prompt)
            .voiceover(self.voiceover_script)
            .time(self.estimated_duration)
            .build()
            .map_err(|e| BuilderError::new(BuilderErrorKind::MissingField(e.to_string())))
    }
}

/// Structured response of the script generator.
///
/// # Examples
///
/// ```
/// use advision_core::ScriptResult;
///
/// let json = r#"{"storyboard": []}"#;
/// let script: ScriptResult = serde_json::from_str(json).unwrap();
/// assert!(script.storyboard().is_empty());
/// assert!(script.into_frames().is_err());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct ScriptResult {
    /// Frame descriptions, nominally in frame order
    storyboard: Vec<ScriptEntry>,
}

impl ScriptResult {
    /// Wrap a list of entries.
    pub fn new(storyboard: Vec<ScriptEntry>) -> Self {
        Self { storyboard }
    }

    /// Validate and normalize into idle storyboard frames.
    ///
    /// Entries are ordered by `frame_number`; the result must hold exactly
    /// [`FRAME_COUNT`] entries numbered `1..=FRAME_COUNT` with every text field
    /// populated. Frame ids follow the sorted position, so they match
    /// `frame_number`.
    pub fn into_frames(self) -> advision_error::AdvisionResult<Vec<StoryboardFrame>> {
        let mut entries = self.storyboard;
        if entries.len() != FRAME_COUNT {
            return Err(StoryboardError::new(StoryboardErrorKind::FrameCount {
                expected: FRAME_COUNT,
                actual: entries.len(),
            })
            .into());
        }

        entries.sort_by_key(|entry| entry.frame_number);
        let numbers: Vec<i64> = entries.iter().map(|entry| entry.frame_number).collect();
        let contiguous = numbers
            .iter()
            .enumerate()
            .all(|(index, number)| *number == index as i64 + 1);
        if !contiguous {
            return Err(StoryboardError::new(StoryboardErrorKind::FrameNumbering {
                expected: FRAME_COUNT,
                actual: numbers,
            })
            .into());
        }

        let mut frames = Vec::with_capacity(FRAME_COUNT);
        for (index, entry) in entries.into_iter().enumerate() {
            entry.require_text()?;
            frames.push(entry.into_frame(index as FrameId + 1)?);
        }
        Ok(frames)
    }
}
