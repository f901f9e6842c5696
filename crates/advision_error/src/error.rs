//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, GeminiError, IoError, JsonError, StoryboardError};

/// Every error condition the workspace can surface.
///
/// # Examples
///
/// ```
/// use advision_error::{AdvisionError, IoError};
///
/// let io_err = IoError::new("Failed to read stdin");
/// let err: AdvisionError = io_err.into();
/// assert!(format!("{}", err).contains("IO Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum AdvisionErrorKind {
    /// Terminal or file I/O error
    #[from(IoError)]
    Io(IoError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Gemini provider error
    #[from(GeminiError)]
    Gemini(GeminiError),
    /// Storyboard validation or orchestration error
    #[from(StoryboardError)]
    Storyboard(StoryboardError),
}

/// AdVision error with kind discrimination.
///
/// # Examples
///
/// ```
/// use advision_error::{AdvisionResult, ConfigError};
///
/// fn might_fail() -> AdvisionResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("AdVision Error: {}", _0)]
pub struct AdvisionError(Box<AdvisionErrorKind>);

impl AdvisionError {
    /// Create a new error from a kind.
    pub fn new(kind: AdvisionErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AdvisionErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to AdvisionErrorKind
impl<T> From<T> for AdvisionError
where
    T: Into<AdvisionErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for AdVision operations.
pub type AdvisionResult<T> = std::result::Result<T, AdvisionError>;
