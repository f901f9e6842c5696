//! Product brief collected from the user.

use advision_error::{BuilderError, BuilderErrorKind, StoryboardError, StoryboardErrorKind};
use serde::{Deserialize, Serialize};

/// Tone used when the user does not supply one.
pub const DEFAULT_TONE: &str = "Cinematic, Professional, High-End";

/// The creative brief a storyboard is generated from.
///
/// # Examples
///
/// ```
/// use advision_core::{DEFAULT_TONE, ProductBrief};
///
/// let brief = ProductBrief::builder()
///     .product_name("AeroSynth Oil")
///     .description("High-performance di-ester base engine oil.")
///     .build()
///     .unwrap();
///
/// assert_eq!(brief.tone(), DEFAULT_TONE);
/// ```
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
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct ProductBrief {
    /// Product or brand name
    product_name: String,
    /// Product description and key selling points
    description: String,
    /// Visual tone and style
    #[builder(default = "DEFAULT_TONE.to_string()")]
    tone: String,
}

impl ProductBrief {
    /// Creates a new builder for `ProductBrief`.
    pub fn builder() -> ProductBriefBuilder {
        ProductBriefBuilder::default()
    }

    /// Checks that the required fields carry text.
    pub fn validate(&self) -> Result<(), StoryboardError> {
        if self.product_name.trim().is_empty() {
            return Err(StoryboardError::new(StoryboardErrorKind::InvalidBrief(
                "product name is required".to_string(),
            )));
        }
        if self.description.trim().is_empty() {
            return Err(StoryboardError::new(StoryboardErrorKind::InvalidBrief(
                "product description is required".to_string(),
            )));
        }
        Ok(())
    }
}

impl ProductBriefBuilder {
    /// Build the brief, rejecting missing or blank required fields.
    ///
    /// A blank tone falls back to [`DEFAULT_TONE`].
    pub fn build(&self) -> advision_error::AdvisionResult<ProductBrief> {
        let mut brief = self.build_internal().map_err(|e| {
            BuilderError::new(BuilderErrorKind::MissingField(e.to_string()))
        })?;
        brief.validate()?;
        if brief.tone.trim().is_empty() {
            brief.tone = DEFAULT_TONE.to_string();
        }
        Ok(brief)
    }
}
