// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter. Reported by `sqlgate doctor`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Expert,
}

/// A request to the expert collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertRequest {
    /// The SQL text exactly as the caller supplied it.
    pub query: String,
    /// SQL dialect hint (e.g. `mysql`, `postgresql`).
    pub dialect: String,
}

impl ExpertRequest {
    pub fn new(query: impl Into<String>, dialect: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            dialect: dialect.into(),
        }
    }
}

/// The expert's answer. `content` is passed through to callers verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertResponse {
    pub content: String,
    /// Model that produced the answer, when the backend reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}
