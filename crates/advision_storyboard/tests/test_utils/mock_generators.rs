//! Mock script and image generators for testing.

use advision_core::{AspectRatio, FrameStatus, ImagePayload, ProductBrief, ScriptResult};
use advision_error::{AdvisionResult, GeminiError, GeminiErrorKind};
use advision_interface::{ImageGenerator, ScriptGenerator};
use advision_storyboard::{FrameAction, FrameStore, StoreSnapshot};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Behavior configuration for the mock script generator.
#[derive(Debug, Clone)]
pub enum MockScriptBehavior {
    /// Always return this script
    Success(ScriptResult),
    /// Always fail with this error
    Error(GeminiErrorKind),
}

/// Mock script generator.
pub struct MockScriptGenerator {
    behavior: MockScriptBehavior,
    call_count: Arc<Mutex<usize>>,
}

impl MockScriptGenerator {
    /// Always return the given script.
    pub fn new_success(script: ScriptResult) -> Self {
        Self {
            behavior: MockScriptBehavior::Success(script),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Always fail with the given error.
    pub fn new_error(error: GeminiErrorKind) -> Self {
        Self {
            behavior: MockScriptBehavior::Error(error),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Number of generate_script() calls.
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl ScriptGenerator for MockScriptGenerator {
    async fn generate_script(&self, _brief: &ProductBrief) -> AdvisionResult<ScriptResult> {
        *self.call_count.lock().unwrap() += 1;
        match &self.behavior {
            MockScriptBehavior::Success(script) => Ok(script.clone()),
            MockScriptBehavior::Error(kind) => Err(GeminiError::new(kind.clone()).into()),
        }
    }

    fn model_name(&self) -> &str {
        "mock-script"
    }
}

/// Behavior configuration for the mock image generator.
#[derive(Debug, Clone)]
pub enum MockImageBehavior {
    /// Render every prompt; bytes are "<prompt>#<call number>"
    Success,
    /// Fail for the listed prompts, render the rest
    FailFor(Vec<String>),
    /// Always fail with this error
    Error(GeminiErrorKind),
}

/// Side effect run at the start of every image call.
#[derive(Debug, Clone, Default)]
pub enum MockHook {
    /// Nothing
    #[default]
    None,
    /// Record a snapshot of the store
    Observe(FrameStore),
    /// Clear the store on the first call, as a "new project" mid-render would
    ClearOnFirstCall(FrameStore),
}

/// Mock image generator.
///
/// Completes without delay unless per-call delays are configured, so any
/// ordering a test observes comes from the orchestrator rather than from timing.
pub struct MockImageGenerator {
    behavior: MockImageBehavior,
    hook: MockHook,
    delays: Vec<Duration>,
    call_count: Arc<Mutex<usize>>,
    prompts: Arc<Mutex<Vec<String>>>,
    completed: Arc<Mutex<Vec<String>>>,
    observed: Arc<Mutex<Vec<StoreSnapshot>>>,
    aspect_ratios: Arc<Mutex<Vec<AspectRatio>>>,
}

impl MockImageGenerator {
    /// Create a mock with the given behavior and no hook.
    pub fn new(behavior: MockImageBehavior) -> Self {
        Self {
            behavior,
            hook: MockHook::None,
            delays: Vec::new(),
            call_count: Arc::new(Mutex::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
            completed: Arc::new(Mutex::new(Vec::new())),
            observed: Arc::new(Mutex::new(Vec::new())),
            aspect_ratios: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Render every prompt.
    pub fn new_success() -> Self {
        Self::new(MockImageBehavior::Success)
    }

    /// Attach a side effect run before each call resolves.
    #[allow(dead_code)]
    pub fn with_hook(mut self, hook: MockHook) -> Self {
        self.hook = hook;
        self
    }

    /// Sleep before resolving; entry N applies to call N + 1, later calls
    /// resolve at once.
    #[allow(dead_code)]
    pub fn with_call_delays(mut self, delays: Vec<Duration>) -> Self {
        self.delays = delays;
        self
    }

    /// Bytes the mock returns for the given prompt on the given call (1-based).
    #[allow(dead_code)]
    pub fn expected_bytes(prompt: &str, call: usize) -> Vec<u8> {
        format!("{}#{}", prompt, call).into_bytes()
    }

    /// Number of generate_image() calls.
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Prompts received, in call order.
    #[allow(dead_code)]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Prompts in the order their calls resolved.
    #[allow(dead_code)]
    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    /// Aspect ratios received, in call order.
    #[allow(dead_code)]
    pub fn aspect_ratios(&self) -> Vec<AspectRatio> {
        self.aspect_ratios.lock().unwrap().clone()
    }

    /// Snapshots recorded by [`MockHook::Observe`].
    #[allow(dead_code)]
    pub fn observed(&self) -> Vec<StoreSnapshot> {
        self.observed.lock().unwrap().clone()
    }

    /// Whether no observed snapshot held an `idle` frame.
    #[allow(dead_code)]
    pub fn observed_no_idle(&self) -> bool {
        self.observed()
            .iter()
            .all(|snapshot| snapshot.count(FrameStatus::Idle) == 0)
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> AdvisionResult<ImagePayload> {
        let call = {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
            *count
        };
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.aspect_ratios.lock().unwrap().push(aspect_ratio);

        match &self.hook {
            MockHook::None => {}
            MockHook::Observe(store) => {
                let snapshot = store.snapshot().await;
                self.observed.lock().unwrap().push(snapshot);
            }
            MockHook::ClearOnFirstCall(store) => {
                if call == 1 {
                    store.apply(FrameAction::Clear).await;
                }
            }
        }

        if let Some(delay) = self.delays.get(call - 1) {
            tokio::time::sleep(*delay).await;
        }
        self.completed.lock().unwrap().push(prompt.to_string());

        let fail = match &self.behavior {
            MockImageBehavior::Success => None,
            MockImageBehavior::FailFor(prompts) => prompts
                .iter()
                .any(|p| p == prompt)
                .then_some(GeminiErrorKind::NoImageData),
            MockImageBehavior::Error(kind) => Some(kind.clone()),
        };

        match fail {
            Some(kind) => Err(GeminiError::new(kind).into()),
            None => Ok(ImagePayload::new(
                "image/png",
                Self::expected_bytes(prompt, call),
            )),
        }
    }

    fn model_name(&self) -> &str {
        "mock-image"
    }
}
