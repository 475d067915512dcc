// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-branch dispatch: local recommendation or expert escalation.
//!
//! Simple queries get an index recommendation built from the classifier's
//! verdict. Everything else is forwarded unchanged to the expert, whose answer
//! is returned verbatim. Expert failures propagate; there is no retry and no
//! locally fabricated fallback.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use sqlgate_core::{ExpertAdapter, ExpertRequest, SqlGateError};
use tracing::{debug, info, warn};

use crate::classifier::{classify, ClassificationVerdict};

/// Dialect sent to the expert when none is configured.
pub const DEFAULT_DIALECT: &str = "mysql";

/// Index recommendation for a simple query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    columns: Vec<String>,
}

impl Recommendation {
    /// Builds a recommendation from a simple verdict; `None` for complex ones.
    pub fn from_verdict(verdict: &ClassificationVerdict) -> Option<Self> {
        verdict.is_simple().then(|| Self {
            columns: verdict.where_columns().to_vec(),
        })
    }

    /// Columns to index, in extraction order. Empty when there is no `WHERE`.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Index definitions in `INDEX(a, b)` form; empty when nothing applies.
    pub fn index_definitions(&self) -> Vec<String> {
        if self.columns.is_empty() {
            Vec::new()
        } else {
            vec![format!("INDEX({})", self.columns.join(", "))]
        }
    }

    pub fn reason(&self) -> &'static str {
        if self.columns.is_empty() {
            "Query has no WHERE clause."
        } else {
            "Simple SELECT: index the columns used in the WHERE clause."
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.columns.as_slice() {
            [] => f.write_str(
                "No index recommendation: the query has no WHERE clause, \
                 so there is no filtering predicate to index.",
            ),
            [column] => write!(f, "Create an index on column `{column}`: INDEX({column})."),
            columns => {
                let quoted: Vec<String> = columns.iter().map(|c| format!("`{c}`")).collect();
                write!(
                    f,
                    "Create a composite index on columns {} (in this order): INDEX({}).",
                    quoted.join(", "),
                    columns.join(", ")
                )
            }
        }
    }
}

/// Outcome of analyzing one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// Answered locally from the classifier's verdict.
    Local {
        verdict: ClassificationVerdict,
        recommendation: Recommendation,
    },
    /// Answered by the expert; `advice` is its unmodified response.
    Expert { advice: String },
}

impl Analysis {
    /// `"simple"` or `"complex"`.
    pub fn mode(&self) -> &'static str {
        match self {
            Analysis::Local { .. } => "simple",
            Analysis::Expert { .. } => "complex",
        }
    }

    /// The caller-facing text: the recommendation, or the expert's answer verbatim.
    pub fn into_text(self) -> String {
        match self {
            Analysis::Local { recommendation, .. } => recommendation.to_string(),
            Analysis::Expert { advice } => advice,
        }
    }

    /// JSON payload handed back to an agent through the `analyze_sql` tool.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Analysis::Local { recommendation, .. } => serde_json::json!({
                "mode": self.mode(),
                "index_recommendation": recommendation.index_definitions(),
                "reason": recommendation.reason(),
                "message": recommendation.to_string(),
            }),
            Analysis::Expert { advice } => serde_json::json!({
                "mode": self.mode(),
                "expert_advice": advice,
            }),
        }
    }
}

/// Routes queries between the local recommendation path and the expert.
///
/// Holds no per-query state; one dispatcher can serve concurrent callers.
#[derive(Clone)]
pub struct QueryDispatcher {
    expert: Arc<dyn ExpertAdapter>,
    default_dialect: String,
    timeout: Option<Duration>,
}

impl QueryDispatcher {
    /// Create a dispatcher with the default dialect and no timeout.
    pub fn new(expert: Arc<dyn ExpertAdapter>) -> Self {
        Self {
            expert,
            default_dialect: DEFAULT_DIALECT.to_string(),
            timeout: None,
        }
    }

    /// Dialect used when [`analyze`](Self::analyze) is not given one.
    pub fn with_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.default_dialect = dialect.into();
        self
    }

    /// Bound each expert call. Expiry surfaces as `ExpertUnavailable`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn default_dialect(&self) -> &str {
        &self.default_dialect
    }

    /// Classify `query` and answer it locally or via the expert.
    pub async fn analyze(
        &self,
        query: &str,
        dialect: Option<&str>,
    ) -> Result<Analysis, SqlGateError> {
        let verdict = classify(query);

        if let Some(recommendation) = Recommendation::from_verdict(&verdict) {
            debug!(columns = ?recommendation.columns(), "answering simple query locally");
            return Ok(Analysis::Local {
                verdict,
                recommendation,
            });
        }

        let dialect = dialect.unwrap_or(&self.default_dialect);
        info!(
            reason = verdict.reason(),
            dialect,
            expert = self.expert.name(),
            "escalating query to expert"
        );
        let request = ExpertRequest::new(query, dialect);
        let advice = consult(self.expert.as_ref(), request, self.timeout).await?;
        Ok(Analysis::Expert { advice })
    }

    /// Same as [`analyze`](Self::analyze) with the default dialect, returning text.
    pub async fn handle(&self, query: &str) -> Result<String, SqlGateError> {
        self.analyze(query, None).await.map(Analysis::into_text)
    }
}

impl fmt::Debug for QueryDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryDispatcher")
            .field("expert", &self.expert.name())
            .field("default_dialect", &self.default_dialect)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Answer `query` with `expert` injected, using the default dialect and no timeout.
pub async fn handle(query: &str, expert: &dyn ExpertAdapter) -> Result<String, SqlGateError> {
    let verdict = classify(query);
    match Recommendation::from_verdict(&verdict) {
        Some(recommendation) => Ok(recommendation.to_string()),
        None => consult(expert, ExpertRequest::new(query, DEFAULT_DIALECT), None).await,
    }
}

async fn consult(
    expert: &dyn ExpertAdapter,
    request: ExpertRequest,
    timeout: Option<Duration>,
) -> Result<String, SqlGateError> {
    let call = expert.consult(request);
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(elapsed) => Err(SqlGateError::ExpertUnavailable {
                message: format!("expert call timed out after {limit:?}"),
                source: Some(Box::new(elapsed)),
            }),
        },
        None => call.await,
    };

    match result {
        Ok(response) => Ok(response.content),
        Err(err) => {
            warn!(error = %err, "expert call failed");
            Err(err)
        }
    }
}
