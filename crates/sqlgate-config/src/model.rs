// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so unrecognized keys are
//! rejected at startup.

use serde::{Deserialize, Serialize};

/// Top-level SQL Gate configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SqlGateConfig {
    /// Process identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Expert collaborator (Ollama) settings.
    #[serde(default)]
    pub expert: ExpertConfig,

    /// Local analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Process identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in logs.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "sqlgate".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Expert collaborator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExpertConfig {
    /// Base URL of the Ollama server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model consulted for complex queries.
    #[serde(default = "default_expert_model")]
    pub model: String,

    /// HTTP timeout for one expert call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// System prompt sent with every expert request.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for ExpertConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_expert_model(),
            timeout_secs: default_timeout_secs(),
            system_prompt: default_system_prompt(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_expert_model() -> String {
    "qwen2.5-coder:7b".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_system_prompt() -> String {
    "You are a senior SQL performance expert.".to_string()
}

/// Local analysis configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Dialect passed to the expert when the caller does not name one.
    #[serde(default = "default_dialect")]
    pub default_dialect: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_dialect: default_dialect(),
        }
    }
}

fn default_dialect() -> String {
    "mysql".to_string()
}
