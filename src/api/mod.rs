use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

pub mod types;

use crate::config::GenerationConfig;
use crate::errors::GenerationError;
use types::*;

/// Trait abstraction over the text-generation service, enabling test mocking.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Cheap reachability check with a short timeout.
    async fn probe(&self) -> Result<(), GenerationError>;

    /// Send `prompt` and return the raw generated text.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Model name, for display.
    fn model(&self) -> &str;
}

/// HTTP client for an Ollama-style `/api/generate` endpoint.
pub struct OllamaClient {
    client: Client,
    endpoint: String,
    model: String,
    probe_timeout: Duration,
    request_timeout: Duration,
}

impl OllamaClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        probe_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self> {
        // Timeouts are applied per request so the probe and generation calls
        // can share one connection pool.
        let client = Client::builder()
            .connect_timeout(probe_timeout.max(Duration::from_millis(100)))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            probe_timeout,
            request_timeout,
        })
    }

    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            config.model.clone(),
            config.probe_timeout(),
            config.request_timeout(),
        )
    }

    async fn post(&self, prompt: &str, timeout: Duration) -> Result<String, GenerationError> {
        debug!("Sending generation request to {} ({} chars)", self.endpoint, prompt.len());

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(timeout)
            .json(&GenerateRequest::new(&self.model, prompt))
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::ServiceUnavailable {
                status: status.as_u16(),
            });
        }

        let body_text = response.text().await.map_err(|e| classify(e, timeout))?;
        debug!("Generation response body ({} chars)", body_text.len());

        let envelope: GenerateResponse = serde_json::from_str(&body_text).map_err(|e| {
            GenerationError::MalformedResponse(format!("invalid response envelope: {}", e))
        })?;
        Ok(envelope.response)
    }
}

fn classify(e: reqwest::Error, timeout: Duration) -> GenerationError {
    if e.is_timeout() {
        GenerationError::Timeout {
            after_ms: whole_millis(timeout),
        }
    } else {
        GenerationError::Transport(e.to_string())
    }
}

fn whole_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[async_trait]
impl GenerationClient for OllamaClient {
    async fn probe(&self) -> Result<(), GenerationError> {
        self.post("test", self.probe_timeout).await.map(|_| ())
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.post(prompt, self.request_timeout).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}
