//! Rendered image payloads and aspect ratios.

use advision_error::{ConfigError, GeminiError, GeminiErrorKind};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// MIME type assumed when the provider does not report one.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Aspect ratios the image model accepts.
///
/// # Examples
///
/// ```
/// use advision_core::AspectRatio;
///
/// let ratio: AspectRatio = "9:16".parse().unwrap();
/// assert_eq!(ratio, AspectRatio::Portrait);
/// assert_eq!(AspectRatio::default().to_string(), "16:9");
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
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum AspectRatio {
    /// Widescreen, 16:9
    #[default]
    #[serde(rename = "16:9")]
    #[display("16:9")]
    Widescreen,
    /// Vertical video, 9:16
    #[serde(rename = "9:16")]
    #[display("9:16")]
    Portrait,
    /// Square, 1:1
    #[serde(rename = "1:1")]
    #[display("1:1")]
    Square,
    /// Classic television, 4:3
    #[serde(rename = "4:3")]
    #[display("4:3")]
    Standard,
    /// Classic portrait, 3:4
    #[serde(rename = "3:4")]
    #[display("3:4")]
    StandardPortrait,
}

impl AspectRatio {
    /// Wire representation sent to the image model.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Widescreen => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Square => "1:1",
            AspectRatio::Standard => "4:3",
            AspectRatio::StandardPortrait => "3:4",
        }
    }
}

impl std::str::FromStr for AspectRatio {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16:9" => Ok(AspectRatio::Widescreen),
            "9:16" => Ok(AspectRatio::Portrait),
            "1:1" => Ok(AspectRatio::Square),
            "4:3" => Ok(AspectRatio::Standard),
            "3:4" => Ok(AspectRatio::StandardPortrait),
            other => Err(ConfigError::new(format!("Unknown aspect ratio: {}", other))),
        }
    }
}

/// One rendered image, held as decoded bytes.
///
/// The bytes are exactly what the provider sent; [`ImagePayload::to_data_uri`]
/// only re-encodes them into a directly displayable wrapper.
#[derive(Clone, PartialEq, Eq, Hash, derive_getters::Getters)]
pub struct ImagePayload {
    /// MIME type of the image
    mime_type: String,
    /// Raw encoded image bytes (PNG, JPEG, ...)
    data: Vec<u8>,
}

impl ImagePayload {
    /// Wrap raw image bytes.
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Decode a base64 payload as delivered in an inline data part.
    ///
    /// A missing or blank MIME type falls back to [`DEFAULT_IMAGE_MIME`].
    ///
    /// # Examples
    ///
    /// ```
    /// use advision_core::ImagePayload;
    ///
    /// let payload = ImagePayload::from_base64(None, "iVBORw0KGgo=").unwrap();
    /// assert_eq!(payload.mime_type(), "image/png");
    /// assert_eq!(payload.to_data_uri(), "data:image/png;base64,iVBORw0KGgo=");
    /// ```
    pub fn from_base64(mime_type: Option<&str>, encoded: &str) -> Result<Self, GeminiError> {
        let data = STANDARD
            .decode(encoded.trim())
            .map_err(|e| GeminiError::new(GeminiErrorKind::Base64Decode(e.to_string())))?;
        let mime_type = mime_type
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME);
        Ok(Self::new(mime_type, data))
    }

    /// Base64 encoding of the image bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Self-contained `data:` URI suitable for direct display.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    /// Size of the image in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Serialize for ImagePayload {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_data_uri())
    }
}
