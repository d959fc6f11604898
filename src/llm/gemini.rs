//! Gemini REST client.

use super::types::{GenerateContentRequest, GenerateContentResponse};
use super::ContentGenerator;
use crate::config::GeminiSettings;
use crate::error::{Result, VoxError};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default timeout for Gemini API requests (5 minutes).
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an HTTP client with the given timeout.
pub fn create_http_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    Ok(client)
}

/// Client for `models/{model}:generateContent`.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client with the default timeout.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        Self::with_timeout(base_url, api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom timeout.
    pub fn with_timeout(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: create_http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Create a client from settings, reading the API key from the environment.
    pub fn from_settings(settings: &GeminiSettings) -> Result<Self> {
        let api_key = settings.api_key().ok_or_else(|| {
            VoxError::Config(format!(
                "{} not set. Set it with: export {}='...'",
                settings.api_key_env, settings.api_key_env
            ))
        })?;
        Self::with_timeout(
            &settings.base_url,
            &api_key,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    #[instrument(skip(self, request))]
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        debug!("POST {}", self.endpoint(model));

        let response = self
            .http
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoxError::Provider(format!(
                "{} returned {}: {}",
                model,
                status,
                error_message(&body)
            )));
        }

        let body = response.json::<GenerateContentResponse>().await?;
        debug!("Received {} candidates", body.candidates.len());
        Ok(body)
    }
}

/// Extract `error.message` from an API error body, or return the body as is.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| body.trim().to_string())
}
