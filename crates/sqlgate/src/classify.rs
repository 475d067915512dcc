// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sqlgate classify`: print the verdict only.

use sqlgate_core::SqlGateError;
use sqlgate_router::{classify, ClassificationVerdict};

pub fn run_classify(query: &str, json: bool) -> Result<(), SqlGateError> {
    let verdict = classify(query);
    if json {
        let rendered = serde_json::to_string(&verdict)
            .map_err(|e| SqlGateError::Internal(format!("failed to render verdict: {e}")))?;
        println!("{rendered}");
    } else {
        println!("{}", describe(&verdict));
    }
    Ok(())
}

fn describe(verdict: &ClassificationVerdict) -> String {
    if !verdict.is_simple() {
        return format!("complex ({})", verdict.reason());
    }
    match verdict.where_columns() {
        [] => "simple (no WHERE clause)".to_string(),
        columns => format!("simple (where columns: {})", columns.join(", ")),
    }
}
