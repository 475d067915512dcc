// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for SQL Gate.

use thiserror::Error;

/// The error type surfaced by the dispatcher, the expert adapters, and tools.
///
/// Malformed query text is not represented here: the classifier degrades it
/// to a complex verdict instead of failing.
#[derive(Debug, Error)]
pub enum SqlGateError {
    /// Configuration errors (invalid TOML, bad values, client construction).
    #[error("configuration error: {0}")]
    Config(String),

    /// The expert collaborator could not produce an answer (timeout,
    /// transport failure, non-success status, unreadable response).
    #[error("expert unavailable: {message}")]
    ExpertUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A tool was invoked with unusable input.
    #[error("tool error: {message}")]
    Tool {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SqlGateError {
    /// Shorthand for an [`SqlGateError::ExpertUnavailable`] without a source.
    pub fn expert(message: impl Into<String>) -> Self {
        Self::ExpertUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when the error came from the expert collaborator.
    pub fn is_expert_unavailable(&self) -> bool {
        matches!(self, Self::ExpertUnavailable { .. })
    }
}
