// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Expert adapter trait for queries outside the simple-query grammar.

use async_trait::async_trait;

use crate::error::SqlGateError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ExpertRequest, ExpertResponse};

/// An external reasoning capability consulted for complex SQL.
///
/// Implementations accept the query text unchanged and return free-form
/// analysis. Failures surface as [`SqlGateError::ExpertUnavailable`]; callers
/// must not substitute a locally fabricated answer.
#[async_trait]
pub trait ExpertAdapter: PluginAdapter {
    /// Asks the expert to analyze the query and recommend indexes.
    async fn consult(&self, request: ExpertRequest) -> Result<ExpertResponse, SqlGateError>;
}
