//! Generation orchestrator.
//!
//! Turns a brief into a storyboard and drives one image request per frame.
//! Requests for a batch run concurrently on the calling task and settle into
//! the [`FrameStore`] in whatever order they complete.

use advision_core::{AspectRatio, FrameId, FrameOutcome, FrameStatus, ProductBrief};
use advision_error::{AdvisionResult, StoryboardError, StoryboardErrorKind};
use advision_interface::{ImageGenerator, ScriptGenerator};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{Epoch, FrameAction, FrameStore};

/// How a single image request ended up in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Settlement {
    /// The outcome was written; the frame now has this status
    Applied(FrameStatus),
    /// The storyboard was replaced while the request was in flight
    Discarded,
}

/// Summary of a bulk render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct BatchReport {
    /// Epoch the batch was issued under
    epoch: Epoch,
    /// Frames that rendered
    succeeded: Vec<FrameId>,
    /// Frames whose request failed
    failed: Vec<FrameId>,
    /// Frames whose result arrived after the storyboard was replaced
    discarded: Vec<FrameId>,
}

impl BatchReport {
    fn from_settlements(epoch: Epoch, settlements: Vec<(FrameId, Settlement)>) -> Self {
        let mut report = Self {
            epoch,
            ..Default::default()
        };
        for (id, settlement) in settlements {
            match settlement {
                Settlement::Applied(FrameStatus::Success) => report.succeeded.push(id),
                Settlement::Applied(_) => report.failed.push(id),
                Settlement::Discarded => report.discarded.push(id),
            }
        }
        report
    }

    /// Number of frames the batch covered.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len() + self.discarded.len()
    }

    /// Whether every frame in the batch rendered.
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty() && self.discarded.is_empty()
    }
}

/// Drives script and image generation into a [`FrameStore`].
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use advision_core::ProductBrief;
/// use advision_models::GeminiClient;
/// use advision_storyboard::Orchestrator;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Arc::new(GeminiClient::new()?);
/// let orchestrator = Orchestrator::new(client.clone(), client);
///
/// let brief = ProductBrief::builder()
///     .product_name("AeroSynth Oil")
///     .description("High-performance di-ester base engine oil.")
///     .build()?;
/// let report = orchestrator.create_storyboard(&brief).await?;
/// println!("{} of {} frames rendered", report.succeeded().len(), report.total());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Orchestrator {
    store: FrameStore,
    script_generator: Arc<dyn ScriptGenerator>,
    image_generator: Arc<dyn ImageGenerator>,
    aspect_ratio: AspectRatio,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("script_model", &self.script_generator.model_name())
            .field("image_model", &self.image_generator.model_name())
            .field("aspect_ratio", &self.aspect_ratio)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Create an orchestrator with an empty store and the default aspect ratio.
    pub fn new(
        script_generator: Arc<dyn ScriptGenerator>,
        image_generator: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            store: FrameStore::new(),
            script_generator,
            image_generator,
            aspect_ratio: AspectRatio::default(),
        }
    }

    /// Request every image in this aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: AspectRatio) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Write into an existing store instead of a private one.
    pub fn with_store(mut self, store: FrameStore) -> Self {
        self.store = store;
        self
    }

    /// The store this orchestrator writes to.
    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    /// Aspect ratio requested for every image.
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// Generate a script for the brief and install it as the new storyboard.
    ///
    /// All or nothing: on any failure the store is left untouched.
    #[instrument(skip(self, brief), fields(product = %brief.product_name()))]
    pub async fn load_script(&self, brief: &ProductBrief) -> AdvisionResult<Epoch> {
        brief.validate()?;
        let script = self.script_generator.generate_script(brief).await?;
        let frames = script.into_frames()?;
        let epoch = self.store.replace(frames).await;
        info!(epoch = %epoch, "Storyboard script loaded");
        Ok(epoch)
    }

    /// Generate a script, then render every frame.
    ///
    /// Fails only if the script step fails; image failures are reported per
    /// frame in the returned [`BatchReport`].
    pub async fn create_storyboard(&self, brief: &ProductBrief) -> AdvisionResult<BatchReport> {
        self.load_script(brief).await?;
        Ok(self.regenerate_all().await)
    }

    /// Render the listed frames concurrently.
    ///
    /// Every listed frame goes to `loading` in the same store mutation that
    /// raises `images_loading`, before any request is issued. Returns once every request has settled; never fails.
    /// Ids not in the store are skipped.
    #[instrument(skip(self, ids), fields(frames = ids.len()))]
    pub async fn generate(&self, ids: &[FrameId]) -> BatchReport {
        let (epoch, frames) = self.store.begin_batch(ids).await;
        info!(epoch = %epoch, frames = frames.len(), "Rendering storyboard frames");

        let settlements = join_all(
            frames
                .iter()
                .map(|frame| self.render(epoch, *frame.id(), frame.visual_prompt())),
        )
        .await;

        self.store.finish_batch(epoch).await;

        let report = BatchReport::from_settlements(epoch, settlements);
        info!(
            epoch = %epoch,
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            discarded = report.discarded.len(),
            "Storyboard render finished"
        );
        report
    }

    /// Render every frame of the current storyboard again.
    pub async fn regenerate_all(&self) -> BatchReport {
        let ids = self.store.ids().await;
        self.generate(&ids).await
    }

    /// Render one frame with the given prompt.
    ///
    /// Touches no other frame. Fails with `UnknownFrame` if the id is not in
    /// the current storyboard, in which case no request is made.
    #[instrument(skip(self, prompt))]
    pub async fn regenerate(&self, id: FrameId, prompt: &str) -> AdvisionResult<Settlement> {
        let (epoch, marked) = self.store.mark_loading(&[id]).await;
        if marked.is_empty() {
            return Err(StoryboardError::new(StoryboardErrorKind::UnknownFrame(id)).into());
        }
        let (_, settlement) = self.render(epoch, id, prompt).await;
        Ok(settlement)
    }

    /// Render one frame again with its stored prompt.
    #[instrument(skip(self))]
    pub async fn regenerate_frame(&self, id: FrameId) -> AdvisionResult<Settlement> {
        let (epoch, marked) = self.store.mark_loading(&[id]).await;
        let Some(frame) = marked.into_iter().next() else {
            return Err(StoryboardError::new(StoryboardErrorKind::UnknownFrame(id)).into());
        };
        let (_, settlement) = self.render(epoch, id, frame.visual_prompt()).await;
        Ok(settlement)
    }

    async fn render(&self, epoch: Epoch, id: FrameId, prompt: &str) -> (FrameId, Settlement) {
        let outcome = match self
            .image_generator
            .generate_image(prompt, self.aspect_ratio)
            .await
        {
            Ok(image) => {
                debug!(frame = id, bytes = image.len(), "Frame rendered");
                FrameOutcome::Rendered(image)
            }
            Err(e) => {
                warn!(frame = id, error = %e, "Failed to render frame");
                FrameOutcome::Failed(e.to_string())
            }
        };

        let status = outcome.status();
        let settlement = match self
            .store
            .apply(FrameAction::Settle { epoch, id, outcome })
            .await
        {
            Some(_) => Settlement::Applied(status),
            None => Settlement::Discarded,
        };
        (id, settlement)
    }
}
