//! View state for a storyboard front end.

use advision_core::{FrameId, ProductBrief};
use advision_error::AdvisionResult;
use serde::Serialize;
use tracing::{info, warn};

use crate::{BatchReport, FrameAction, FrameStore, Orchestrator, Settlement, StoreSnapshot};

/// Which screen the session is on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Collecting a brief
    #[default]
    #[display("input")]
    Input,
    /// Showing a storyboard
    #[display("preview")]
    Preview,
}

/// A user's session: current view, error banner, and the storyboard.
///
/// The session is in [`View::Input`] exactly when the store holds no frames.
#[derive(Debug)]
pub struct StoryboardSession {
    orchestrator: Orchestrator,
    view: View,
    error: Option<String>,
    script_loading: bool,
    brief: Option<ProductBrief>,
}

impl StoryboardSession {
    /// Start a session on the input view.
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            view: View::Input,
            error: None,
            script_loading: false,
            brief: None,
        }
    }

    /// Current view.
    pub fn view(&self) -> View {
        self.view
    }

    /// Global error banner, set only by a failed script generation.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a script request is in flight.
    pub fn is_script_loading(&self) -> bool {
        self.script_loading
    }

    /// Brief of the current storyboard.
    pub fn brief(&self) -> Option<&ProductBrief> {
        self.brief.as_ref()
    }

    /// Orchestrator driving this session.
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Store holding the frames.
    pub fn store(&self) -> &FrameStore {
        self.orchestrator.store()
    }

    /// Current frames.
    pub async fn snapshot(&self) -> StoreSnapshot {
        self.store().snapshot().await
    }

    /// Generate a storyboard from the brief and render it.
    ///
    /// On a script failure the session stays on the input view with one error
    /// message and an empty store, and `None` is returned. Otherwise the view
    /// switches to preview before images are requested.
    pub async fn submit(&mut self, brief: ProductBrief) -> Option<BatchReport> {
        self.script_loading = true;
        self.error = None;
        let loaded = self.orchestrator.load_script(&brief).await;
        self.script_loading = false;

        if let Err(e) = loaded {
            warn!(error = %e, "Failed to generate script");
            if !self.store().snapshot().await.is_empty() {
                self.store().apply(FrameAction::Clear).await;
            }
            self.error = Some(e.to_string());
            self.view = View::Input;
            self.brief = None;
            return None;
        }

        self.view = View::Preview;
        self.brief = Some(brief);
        Some(self.orchestrator.regenerate_all().await)
    }

    /// Render one frame again with its stored prompt.
    pub async fn regenerate(&self, id: FrameId) -> AdvisionResult<Settlement> {
        self.orchestrator.regenerate_frame(id).await
    }

    /// Render every frame again.
    pub async fn regenerate_all(&self) -> BatchReport {
        self.orchestrator.regenerate_all().await
    }

    /// Start a new project: clear the storyboard and return to the input view.
    pub async fn reset(&mut self) {
        self.store().apply(FrameAction::Clear).await;
        self.view = View::Input;
        self.error = None;
        self.brief = None;
        info!("Started new project");
    }
}
