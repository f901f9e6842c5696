//! Google Gemini REST API implementation.
//!
//! One [`GeminiClient`] serves both collaborators of the storyboard pipeline:
//! - [`ScriptGenerator`] on the configured text model, with a JSON response schema
//! - [`ImageGenerator`] on the configured image model, one inline image per call
//!
//! The client is cheap to clone and safe to share between concurrent requests;
//! `reqwest::Client` pools connections internally.
//!
//! No retry, timeout, or rate limiting is applied: every call runs to
//! completion or failure exactly once.

use async_trait::async_trait;
use std::env;
use std::time::Instant;
use tracing::{debug, instrument, warn};

use advision_core::{AdvisionConfig, AspectRatio, GeminiConfig, ImagePayload, ProductBrief, ScriptResult};
use advision_error::{AdvisionResult, GeminiError, GeminiErrorKind, JsonError};
use advision_interface::{ImageGenerator, ScriptGenerator};

use super::GeminiResult;
use super::dto::{GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageConfig};
use super::prompt::{SCRIPT_SYSTEM_INSTRUCTION, script_prompt, script_response_schema, strip_code_fences};
use crate::metrics::{GenerationMetrics, classify_error};

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    config: GeminiConfig,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", self.config.base_url())
            .field("script_model", self.config.script_model())
            .field("image_model", self.config.image_model())
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client from the layered configuration files.
    ///
    /// Reads the API key from the `GEMINI_API_KEY` environment variable.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use advision_models::GeminiClient;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = GeminiClient::new()?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "gemini_client_new")]
    pub fn new() -> AdvisionResult<Self> {
        let config = AdvisionConfig::load()?;
        Self::from_env(config.gemini().clone())
    }

    /// Create a client for the given endpoint settings, reading the API key
    /// from `GEMINI_API_KEY`.
    #[instrument(name = "gemini_client_from_env", skip(config))]
    pub fn from_env(config: GeminiConfig) -> AdvisionResult<Self> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::new(GeminiErrorKind::MissingApiKey))?;
        Ok(Self::with_api_key(api_key, config)?)
    }

    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is blank or the HTTP client cannot be built.
    #[instrument(name = "gemini_client_with_api_key", skip_all)]
    pub fn with_api_key(api_key: impl Into<String>, config: GeminiConfig) -> GeminiResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::new(GeminiErrorKind::MissingApiKey));
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| GeminiError::new(GeminiErrorKind::ClientCreation(e.to_string())))?;

        debug!(
            base_url = %config.base_url(),
            script_model = %config.script_model(),
            image_model = %config.image_model(),
            "Created Gemini client"
        );

        Ok(Self {
            http,
            api_key,
            config,
        })
    }

    /// Endpoint settings in use.
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url().trim_end_matches('/'),
            model
        )
    }

    /// Send one `generateContent` call and decode the response.
    async fn generate_content(
        &self,
        operation: &'static str,
        model: &str,
        body: &GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        let metrics = GenerationMetrics::get();
        let started = Instant::now();

        let result = self.send(model, body).await;

        match &result {
            Ok(_) => {
                metrics.record_request(operation, model, started.elapsed().as_secs_f64());
            }
            Err(e) => {
                metrics.record_error(operation, model, classify_error(&e.kind));
            }
        }
        result
    }

    async fn send(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> GeminiResult<GenerateContentResponse> {
        let url = self.endpoint(model);
        debug!(url = %url, "Sending Gemini API request");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ApiRequest(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeminiError::new(GeminiErrorKind::HttpError {
                status_code: status.as_u16(),
                message,
            }));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| GeminiError::new(GeminiErrorKind::ResponseParse(e.to_string())))
    }
}

#[async_trait]
impl ScriptGenerator for GeminiClient {
    #[instrument(skip(self, brief), fields(model = %self.config.script_model(), product = %brief.product_name()))]
    async fn generate_script(&self, brief: &ProductBrief) -> AdvisionResult<ScriptResult> {
        let body = GenerateContentRequest::user_text(script_prompt(brief))
            .with_system_instruction(SCRIPT_SYSTEM_INSTRUCTION)
            .with_generation_config(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(script_response_schema()),
                ..Default::default()
            });

        let response = self
            .generate_content("script", self.config.script_model(), &body)
            .await
            .inspect_err(|e| warn!(error = %e, "Error generating script"))?;

        let Some(text) = response.text() else {
            warn!(reason = ?response.empty_reason(), "Script response carried no text");
            return Err(GeminiError::new(GeminiErrorKind::EmptyResponse).into());
        };

        let script: ScriptResult = serde_json::from_str(strip_code_fences(&text))
            .map_err(|e| JsonError::new(format!("Failed to parse storyboard script: {}", e)))?;

        debug!(entries = script.storyboard().len(), "Parsed storyboard script");
        Ok(script)
    }

    fn model_name(&self) -> &str {
        self.config.script_model()
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.config.image_model(), aspect_ratio = %aspect_ratio))]
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: AspectRatio,
    ) -> AdvisionResult<ImagePayload> {
        let body = GenerateContentRequest::user_text(prompt).with_generation_config(
            GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: aspect_ratio.as_str().to_string(),
                }),
                ..Default::default()
            },
        );

        let response = self
            .generate_content("image", self.config.image_model(), &body)
            .await?;

        let Some(inline) = response.first_inline_data() else {
            return Err(GeminiError::new(GeminiErrorKind::NoImageData).into());
        };

        let payload = ImagePayload::from_base64(inline.mime_type.as_deref(), &inline.data)?;
        debug!(bytes = payload.len(), mime = %payload.mime_type(), "Received image");
        Ok(payload)
    }

    fn model_name(&self) -> &str {
        self.config.image_model()
    }
}
