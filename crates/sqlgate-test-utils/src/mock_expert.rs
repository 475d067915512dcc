// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock expert adapter for deterministic testing.
//!
//! `MockExpert` implements `ExpertAdapter` with pre-configured responses and
//! records every request it receives, so tests can assert both what was
//! escalated and how often.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use sqlgate_core::{
    AdapterType, ExpertAdapter, ExpertRequest, ExpertResponse, HealthStatus, PluginAdapter,
    SqlGateError,
};

/// A mock expert that returns pre-configured responses.
///
/// Responses are popped from a FIFO queue. When the queue is empty,
/// a default "mock expert advice" text is returned.
#[derive(Clone, Default)]
pub struct MockExpert {
    responses: Arc<Mutex<VecDeque<String>>>,
    requests: Arc<Mutex<Vec<ExpertRequest>>>,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl MockExpert {
    /// Create a new mock expert with an empty response queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock expert pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            ..Self::default()
        }
    }

    /// Every call fails with `ExpertUnavailable` carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Sleep for `delay` before answering. Pairs with paused tokio time.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(text.into());
    }

    /// All requests received so far, in call order.
    pub async fn requests(&self) -> Vec<ExpertRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock expert advice".to_string())
    }
}

#[async_trait]
impl PluginAdapter for MockExpert {
    fn name(&self) -> &str {
        "mock-expert"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Expert
    }

    async fn health_check(&self) -> Result<HealthStatus, SqlGateError> {
        match &self.failure {
            Some(message) => Ok(HealthStatus::Unhealthy(message.clone())),
            None => Ok(HealthStatus::Healthy),
        }
    }
}

#[async_trait]
impl ExpertAdapter for MockExpert {
    async fn consult(&self, request: ExpertRequest) -> Result<ExpertResponse, SqlGateError> {
        self.requests.lock().await.push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(message) = &self.failure {
            return Err(SqlGateError::expert(message.clone()));
        }

        Ok(ExpertResponse {
            content: self.next_response().await,
            model: Some("mock-model".to_string()),
        })
    }
}
