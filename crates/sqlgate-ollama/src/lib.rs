// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama expert adapter for SQL Gate.
//!
//! This crate implements [`ExpertAdapter`] on top of a local Ollama server's
//! non-streaming `/api/chat` endpoint. The model's reply is handed back to the
//! caller verbatim.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use sqlgate_config::model::ExpertConfig;
use sqlgate_core::{
    AdapterType, ExpertAdapter, ExpertRequest, ExpertResponse, HealthStatus, PluginAdapter,
    SqlGateError,
};
use tracing::{debug, info};

use crate::client::OllamaClient;
use crate::types::{ChatMessage, ChatRequest};

/// Expert collaborator backed by an Ollama model.
pub struct OllamaExpert {
    client: OllamaClient,
    system_prompt: String,
}

impl OllamaExpert {
    /// Creates an expert from the `[expert]` configuration section.
    pub fn new(config: &ExpertConfig) -> Result<Self, SqlGateError> {
        let client = OllamaClient::new(
            config.base_url.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(
            model = config.model,
            base_url = config.base_url,
            "Ollama expert initialized"
        );

        Ok(Self::with_client(client, config.system_prompt.clone()))
    }

    /// Creates an expert around an existing client.
    pub fn with_client(client: OllamaClient, system_prompt: String) -> Self {
        Self {
            client,
            system_prompt,
        }
    }

    fn to_chat_request(&self, request: &ExpertRequest) -> ChatRequest {
        ChatRequest {
            model: self.client.model().to_string(),
            messages: vec![
                ChatMessage::system(self.system_prompt.clone()),
                ChatMessage::user(user_prompt(request)),
            ],
            stream: false,
        }
    }
}

/// The user turn sent for one query.
pub fn user_prompt(request: &ExpertRequest) -> String {
    format!(
        "Dialect: {}\nSQL:\n{}\n\nRecommend indexes.",
        request.dialect, request.query
    )
}

#[async_trait]
impl PluginAdapter for OllamaExpert {
    fn name(&self) -> &str {
        "ollama"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Expert
    }

    async fn health_check(&self) -> Result<HealthStatus, SqlGateError> {
        match self.client.ping().await {
            Ok(status) if status.is_success() => Ok(HealthStatus::Healthy),
            Ok(status) => Ok(HealthStatus::Degraded(format!(
                "Ollama answered {status}"
            ))),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl ExpertAdapter for OllamaExpert {
    async fn consult(&self, request: ExpertRequest) -> Result<ExpertResponse, SqlGateError> {
        let chat = self.to_chat_request(&request);
        debug!(model = %chat.model, dialect = %request.dialect, "consulting Ollama");

        let response = self.client.chat(&chat).await?;
        Ok(ExpertResponse {
            content: response.message.content,
            model: response.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn expert_for(server: &MockServer) -> OllamaExpert {
        let config = ExpertConfig {
            base_url: server.uri(),
            ..ExpertConfig::default()
        };
        OllamaExpert::new(&config).unwrap()
    }

    #[test]
    fn user_prompt_layout() {
        let request = ExpertRequest::new("SELECT 1", "postgresql");
        assert_eq!(
            user_prompt(&request),
            "Dialect: postgresql\nSQL:\nSELECT 1\n\nRecommend indexes."
        );
    }

    #[tokio::test]
    async fn consult_sends_prompt_and_returns_content_verbatim() {
        let server = MockServer::start().await;
        let query = "SELECT u.id FROM users u JOIN orders o ON u.id=o.uid";
        let advice = "  CREATE INDEX idx_orders_uid ON orders(uid);\n";

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(serde_json::json!({
                "model": "qwen2.5-coder:7b",
                "messages": [
                    {"role": "system", "content": "You are a senior SQL performance expert."},
                    {"role": "user", "content": format!("Dialect: mysql\nSQL:\n{query}\n\nRecommend indexes.")}
                ],
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "model": "qwen2.5-coder:7b",
                "message": {"role": "assistant", "content": advice},
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let expert = expert_for(&server);
        let response = expert
            .consult(ExpertRequest::new(query, "mysql"))
            .await
            .unwrap();
        assert_eq!(response.content, advice);
        assert_eq!(response.model.as_deref(), Some("qwen2.5-coder:7b"));
    }

    #[tokio::test]
    async fn consult_failure_is_unavailable() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let expert = expert_for(&server);
        let err = expert
            .consult(ExpertRequest::new("SELECT 1", "mysql"))
            .await
            .unwrap_err();
        assert!(err.is_expert_unavailable());
    }

    #[tokio::test]
    async fn health_check_reflects_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"models": []})))
            .mount(&server)
            .await;

        let expert = expert_for(&server);
        assert_eq!(expert.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn health_check_unreachable_is_unhealthy() {
        let config = ExpertConfig {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 1,
            ..ExpertConfig::default()
        };
        let expert = OllamaExpert::new(&config).unwrap();
        assert!(matches!(
            expert.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }

    #[test]
    fn plugin_adapter_metadata() {
        let expert = OllamaExpert::new(&ExpertConfig::default()).unwrap();
        assert_eq!(expert.name(), "ollama");
        assert_eq!(expert.adapter_type(), AdapterType::Expert);
        assert_eq!(expert.version(), semver::Version::new(0, 1, 0));
    }
}
