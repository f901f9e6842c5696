//! Frame state store.
//!
//! Frames are keyed by id and exposed in ascending id order. Every mutation
//! goes through [`FrameStore::apply`], which runs the reducer under the store
//! lock and publishes a [`StoreSnapshot`] to subscribers before releasing it.
//!
//! Each storyboard generation gets a fresh [`Epoch`]. Loading marks and
//! settlements carry the epoch they were issued under; the reducer drops any
//! that do not match the current one, so a request from a discarded storyboard
//! can never write into its replacement.
//!
//! Bulk renders are counted per epoch. The snapshot reports `images_loading`
//! while at least one batch of the current epoch is still running.

use advision_core::{FrameId, FrameOutcome, FrameStatus, StoryboardFrame};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tracing::debug;

/// Generation tag of a storyboard; bumped on every replace or clear.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    derive_more::Display,
)]
#[display("{}", _0)]
pub struct Epoch(u64);

impl Epoch {
    /// Numeric value of the epoch.
    pub fn value(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// A mutation of the store.
#[derive(Debug, Clone)]
pub enum FrameAction {
    /// Discard every frame and install a new storyboard under a new epoch
    Replace(Vec<StoryboardFrame>),
    /// Discard every frame, bumping the epoch
    Clear,
    /// Put the listed frames into `loading`, keeping their images
    MarkLoading {
        /// Epoch the frames were read under
        epoch: Epoch,
        /// Frames to mark
        ids: Vec<FrameId>,
    },
    /// Apply the result of one image request
    Settle {
        /// Epoch the request was issued under
        epoch: Epoch,
        /// Frame the request belongs to
        id: FrameId,
        /// Rendered image or failure
        outcome: FrameOutcome,
    },
    /// Start a bulk render: mark the listed frames `loading` and count the batch
    BeginBatch {
        /// Epoch the frames were read under
        epoch: Epoch,
        /// Frames to mark
        ids: Vec<FrameId>,
    },
    /// A bulk render issued under `epoch` has settled every request
    FinishBatch {
        /// Epoch the batch was issued under
        epoch: Epoch,
    },
}

/// Point-in-time copy of the store contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct StoreSnapshot {
    /// Epoch of the current storyboard
    epoch: Epoch,
    /// Whether a bulk render of this epoch is in progress
    images_loading: bool,
    /// Frames in ascending id order
    frames: Vec<StoryboardFrame>,
}

impl StoreSnapshot {
    /// Frame with the given id.
    pub fn frame(&self, id: FrameId) -> Option<&StoryboardFrame> {
        self.frames.iter().find(|frame| *frame.id() == id)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the store holds no storyboard.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Whether every frame has a settled status.
    pub fn all_settled(&self) -> bool {
        self.frames.iter().all(|frame| frame.status().is_settled())
    }

    /// Number of frames in the given status.
    pub fn count(&self, status: FrameStatus) -> usize {
        self.frames
            .iter()
            .filter(|frame| *frame.status() == status)
            .count()
    }
}

#[derive(Debug, Default)]
struct StoreState {
    epoch: Epoch,
    batches_in_flight: usize,
    frames: BTreeMap<FrameId, StoryboardFrame>,
}

impl StoreState {
    /// Returns the epoch in effect after the action, or `None` if it was dropped.
    fn reduce(&mut self, action: FrameAction) -> Option<Epoch> {
        match action {
            FrameAction::Replace(frames) => {
                self.epoch = self.epoch.next();
                self.batches_in_flight = 0;
                self.frames = frames
                    .into_iter()
                    .map(|frame| (*frame.id(), frame))
                    .collect();
                debug!(epoch = %self.epoch, frames = self.frames.len(), "Replaced storyboard");
            }
            FrameAction::Clear => {
                self.epoch = self.epoch.next();
                self.batches_in_flight = 0;
                self.frames.clear();
                debug!(epoch = %self.epoch, "Cleared storyboard");
            }
            FrameAction::MarkLoading { epoch, ids } => {
                if epoch != self.epoch {
                    debug!(stale = %epoch, current = %self.epoch, "Dropping stale loading mark");
                    return None;
                }
                self.mark(&ids);
            }
            FrameAction::BeginBatch { epoch, ids } => {
                if epoch != self.epoch {
                    debug!(stale = %epoch, current = %self.epoch, "Dropping stale batch");
                    return None;
                }
                self.mark(&ids);
                self.batches_in_flight += 1;
                debug!(epoch = %epoch, batches = self.batches_in_flight, "Batch started");
            }
            FrameAction::FinishBatch { epoch } => {
                // Replace and Clear already reset the count.
                if epoch != self.epoch {
                    return None;
                }
                self.batches_in_flight = self.batches_in_flight.saturating_sub(1);
                debug!(epoch = %epoch, batches = self.batches_in_flight, "Batch finished");
            }
            FrameAction::Settle { epoch, id, outcome } => {
                if epoch != self.epoch {
                    debug!(frame = id, stale = %epoch, current = %self.epoch, "Dropping stale settlement");
                    return None;
                }
                let Some(frame) = self.frames.get_mut(&id) else {
                    debug!(frame = id, "Dropping settlement for unknown frame");
                    return None;
                };
                frame.settle(outcome);
                debug!(frame = id, status = %frame.status(), "Frame settled");
            }
        }
        Some(self.epoch)
    }

    fn mark(&mut self, ids: &[FrameId]) {
        for id in ids {
            if let Some(frame) = self.frames.get_mut(id) {
                frame.mark_loading();
            }
        }
    }

    fn marked(&self, ids: &[FrameId]) -> Vec<StoryboardFrame> {
        ids.iter()
            .filter_map(|id| self.frames.get(id).cloned())
            .collect()
    }

    fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            epoch: self.epoch,
            images_loading: self.batches_in_flight > 0,
            frames: self.frames.values().cloned().collect(),
        }
    }
}

/// Shared, race-safe store of storyboard frames.
///
/// Cloning yields another handle to the same store.
///
/// # Example
///
/// ```
/// use advision_core::{FrameOutcome, FrameStatus, ImagePayload, StoryboardFrame};
/// use advision_storyboard::{FrameAction, FrameStore};
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = FrameStore::new();
/// let frame = StoryboardFrame::builder()
///     .id(1u32)
///     .shot_type("Wide Shot")
///     .description("Sunrise over the track")
///     .visual_prompt("racetrack at dawn")
///     .voiceover("Music swells")
///     .time("2s")
///     .build()
///     .unwrap();
///
/// let epoch = store.apply(FrameAction::Replace(vec![frame])).await.unwrap();
/// store
///     .apply(FrameAction::Settle {
///         epoch,
///         id: 1,
///         outcome: FrameOutcome::Rendered(ImagePayload::new("image/png", vec![1, 2, 3])),
///     })
///     .await;
///
/// let snapshot = store.snapshot().await;
/// assert_eq!(*snapshot.frame(1).unwrap().status(), FrameStatus::Success);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FrameStore {
    state: Arc<RwLock<StoreState>>,
    updates: Arc<watch::Sender<StoreSnapshot>>,
}

impl Default for FrameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStore {
    /// Create an empty store at epoch 0.
    pub fn new() -> Self {
        let (updates, _) = watch::channel(StoreSnapshot::default());
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            updates: Arc::new(updates),
        }
    }

    /// Apply one mutation atomically.
    ///
    /// Returns the epoch in effect afterwards, or `None` when the action was
    /// dropped (stale epoch, or a settlement for a frame that no longer exists).
    pub async fn apply(&self, action: FrameAction) -> Option<Epoch> {
        let mut state = self.state.write().await;
        let applied = state.reduce(action);
        if applied.is_some() {
            self.updates.send_replace(state.snapshot());
        }
        applied
    }

    /// Install a new storyboard and return its epoch.
    pub async fn replace(&self, frames: Vec<StoryboardFrame>) -> Epoch {
        let mut state = self.state.write().await;
        state.reduce(FrameAction::Replace(frames));
        self.updates.send_replace(state.snapshot());
        state.epoch
    }

    /// Mark the listed frames `loading` under the current epoch.
    ///
    /// Returns that epoch together with the frames that were marked; ids not in
    /// the store are skipped.
    pub async fn mark_loading(&self, ids: &[FrameId]) -> (Epoch, Vec<StoryboardFrame>) {
        let mut state = self.state.write().await;
        let epoch = state.epoch;
        state.reduce(FrameAction::MarkLoading {
            epoch,
            ids: ids.to_vec(),
        });
        self.updates.send_replace(state.snapshot());
        (epoch, state.marked(ids))
    }

    /// Start a bulk render of the listed frames under the current epoch.
    ///
    /// Marks the frames `loading` and raises `images_loading` in one update.
    /// Every call must be paired with [`FrameStore::finish_batch`].
    pub async fn begin_batch(&self, ids: &[FrameId]) -> (Epoch, Vec<StoryboardFrame>) {
        let mut state = self.state.write().await;
        let epoch = state.epoch;
        state.reduce(FrameAction::BeginBatch {
            epoch,
            ids: ids.to_vec(),
        });
        self.updates.send_replace(state.snapshot());
        (epoch, state.marked(ids))
    }

    /// End a bulk render started with [`FrameStore::begin_batch`].
    ///
    /// `images_loading` drops once no batch of the current epoch is running.
    pub async fn finish_batch(&self, epoch: Epoch) {
        self.apply(FrameAction::FinishBatch { epoch }).await;
    }

    /// Copy of the current contents.
    pub async fn snapshot(&self) -> StoreSnapshot {
        self.state.read().await.snapshot()
    }

    /// Copy of one frame.
    pub async fn frame(&self, id: FrameId) -> Option<StoryboardFrame> {
        self.state.read().await.frames.get(&id).cloned()
    }

    /// Ids of the current storyboard, ascending.
    pub async fn ids(&self) -> Vec<FrameId> {
        self.state.read().await.frames.keys().copied().collect()
    }

    /// Current epoch.
    pub async fn epoch(&self) -> Epoch {
        self.state.read().await.epoch
    }

    /// Receive a snapshot after every applied mutation.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.updates.subscribe()
    }
}
