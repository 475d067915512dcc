// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Ollama chat API.
//!
//! Provides [`OllamaClient`], which posts non-streaming chat requests and
//! maps every failure (transport, status, decoding) to
//! [`SqlGateError::ExpertUnavailable`]. Requests are never retried.

use std::time::Duration;

use sqlgate_core::SqlGateError;
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// HTTP client for one Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Creates a client for the server at `base_url` (e.g. `http://localhost:11434`).
    ///
    /// `timeout` bounds each HTTP request end to end.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SqlGateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SqlGateError::Config(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a chat request and returns the parsed response.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, SqlGateError> {
        let mut req = request.clone();
        req.stream = false;

        let response = self
            .client
            .post(self.endpoint("/api/chat"))
            .json(&req)
            .send()
            .await
            .map_err(|e| SqlGateError::ExpertUnavailable {
                message: format!("HTTP request to Ollama failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, model = %req.model, "chat response received");

        let body = response
            .text()
            .await
            .map_err(|e| SqlGateError::ExpertUnavailable {
                message: format!("failed to read Ollama response body: {e}"),
                source: Some(Box::new(e)),
            })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!("Ollama error ({status}): {}", api_err.error),
                Err(_) => format!("Ollama returned {status}: {body}"),
            };
            return Err(SqlGateError::expert(message));
        }

        serde_json::from_str(&body).map_err(|e| SqlGateError::ExpertUnavailable {
            message: format!("failed to parse Ollama response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Checks that the server answers `GET /api/tags`.
    pub async fn ping(&self) -> Result<reqwest::StatusCode, SqlGateError> {
        let response = self
            .client
            .get(self.endpoint("/api/tags"))
            .send()
            .await
            .map_err(|e| SqlGateError::ExpertUnavailable {
                message: format!("Ollama is unreachable: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(response.status())
    }
}
