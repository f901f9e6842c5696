//! Trait definitions for script and image generation backends.

use advision_core::{AspectRatio, ImagePayload, ProductBrief, ScriptResult};
use advision_error::AdvisionResult;
use async_trait::async_trait;

/// Turns a product brief into a six-frame storyboard script.
///
/// Implementations return the raw script; ordering and field validation are
/// applied by the caller.
#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    /// Generate the storyboard script for a brief.
    async fn generate_script(&self, brief: &ProductBrief) -> AdvisionResult<ScriptResult>;

    /// Model identifier (e.g., "gemini-3-pro-preview").
    fn model_name(&self) -> &str;
}

/// Renders one image per visual prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Render a single image.
    ///
    /// Fails if the response carries no image; when several are present the
    /// first one wins.
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> AdvisionResult<ImagePayload>;

    /// Model identifier (e.g., "gemini-2.5-flash-image").
    fn model_name(&self) -> &str;
}
