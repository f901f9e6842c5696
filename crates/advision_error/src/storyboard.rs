//! Storyboard validation and orchestration errors.

/// Storyboard error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum StoryboardErrorKind {
    /// Product brief is missing a required field
    #[display("Invalid product brief: {}", _0)]
    InvalidBrief(String),
    /// Script did not contain the expected number of frames
    #[display("Expected {} storyboard frames, got {}", expected, actual)]
    FrameCount {
        /// Number of frames required
        expected: usize,
        /// Number of frames received
        actual: usize,
    },
    /// Frame numbers are not a contiguous 1-based sequence
    #[display("Frame numbers must be 1..={} without gaps or duplicates, got {:?}", expected, actual)]
    FrameNumbering {
        /// Highest frame number expected
        expected: usize,
        /// Frame numbers received, in sorted order
        actual: Vec<i64>,
    },
    /// A script field was empty
    #[display("Frame {} has an empty '{}' field", frame_number, field)]
    EmptyField {
        /// Frame number of the offending entry
        frame_number: i64,
        /// Wire name of the empty field
        field: String,
    },
    /// No frame with this id exists in the current storyboard
    #[display("Unknown frame id {}", _0)]
    UnknownFrame(u32),
    /// The session could not produce a storyboard for the brief
    #[display("Storyboard generation failed: {}", _0)]
    ScriptRejected(String),
}

/// Storyboard error with source location tracking.
///
/// # Examples
///
/// ```
/// use advision_error::{StoryboardError, StoryboardErrorKind};
///
/// let err = StoryboardError::new(StoryboardErrorKind::FrameCount { expected: 6, actual: 5 });
/// assert!(format!("{}", err).contains("got 5"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storyboard Error: {} at line {} in {}", kind, line, file)]
pub struct StoryboardError {
    /// The kind of error that occurred
    pub kind: StoryboardErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoryboardError {
    /// Create a new StoryboardError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoryboardErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
