//! Transport to the inference service.
//!
//! [`CompletionBackend`] is the seam between inference logic and the network;
//! [`HttpCompletionBackend`] speaks the OpenAI chat-completions protocol.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use super::types::{ChatRequest, ChatResponse};
use crate::core::config::InferenceConfig;
use crate::core::errors::{NamewiseError, NamewiseResultExt, Result};

/// Something that turns a chat request into the model's reply text.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send `request` and return `choices[0].message.content`.
    async fn complete(&self, request: &ChatRequest) -> Result<String>;
}

/// HTTP backend for OpenAI-compatible chat-completions endpoints.
#[derive(Debug, Clone)]
pub struct HttpCompletionBackend {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpCompletionBackend {
    /// Build a backend with the endpoint, key and timeout from `config`
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_generic_err("building HTTP client")?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<String> {
        if self.api_key.trim().is_empty() {
            return Err(NamewiseError::config_field(
                "no API key configured; set NAMEWISE_API_KEY or inference.api_key",
                "inference.api_key",
            ));
        }

        debug!("POST {} (model {})", self.api_url, request.model);
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(NamewiseError::authentication(format!("{status}: {body}")));
        }
        if !status.is_success() {
            return Err(NamewiseError::service_status(
                status.as_u16(),
                format!("{status}: {body}"),
            ));
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            NamewiseError::unparseable(format!("response body is not a chat completion: {e}"), &body)
        })?;
        parsed
            .into_content()
            .ok_or_else(|| NamewiseError::unparseable("response contained no message content", body))
    }
}

fn transport_error(err: reqwest::Error) -> NamewiseError {
    let message = if err.is_timeout() {
        format!("request timed out: {err}")
    } else {
        err.to_string()
    };
    match err.status() {
        Some(status) => NamewiseError::service_status(status.as_u16(), message),
        None => NamewiseError::service_unavailable(message),
    }
}
