// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `analyze_sql` tool.
//!
//! Simple single-table queries are answered with a local index
//! recommendation. Everything else is handed to the expert and its reply is
//! returned as `expert_advice`. The output content is always the JSON payload
//! produced by [`Analysis::to_json`](sqlgate_router::Analysis::to_json).

use async_trait::async_trait;
use sqlgate_core::SqlGateError;
use sqlgate_router::QueryDispatcher;
use tracing::debug;

use crate::tool::{Tool, ToolOutput};

pub struct AnalyzeSqlTool {
    dispatcher: QueryDispatcher,
}

impl AnalyzeSqlTool {
    pub fn new(dispatcher: QueryDispatcher) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl Tool for AnalyzeSqlTool {
    fn name(&self) -> &str {
        "analyze_sql"
    }

    fn description(&self) -> &str {
        "Recommend indexes for a SQL query. Simple single-table SELECTs are \
         answered locally; other queries are analyzed by a SQL expert model."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The SQL query to analyze"
                },
                "dialect": {
                    "type": "string",
                    "description": "SQL dialect, e.g. mysql or postgresql",
                    "default": self.dispatcher.default_dialect()
                }
            },
            "required": ["query"]
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SqlGateError> {
        let query = match input.get("query") {
            Some(serde_json::Value::String(q)) => q.clone(),
            // Non-string input cannot be a simple query; it is escalated as text.
            Some(other) if !other.is_null() => other.to_string(),
            _ => {
                return Err(SqlGateError::Tool {
                    message: "missing required 'query' parameter".to_string(),
                    source: None,
                });
            }
        };
        let dialect = input.get("dialect").and_then(|d| d.as_str());
        debug!(dialect = ?dialect, "analyze_sql invoked");

        let analysis = self.dispatcher.analyze(&query, dialect).await?;
        Ok(ToolOutput {
            content: analysis.to_json().to_string(),
            is_error: false,
        })
    }
}
