// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sqlgate analyze` and `sqlgate tools`.

use std::sync::Arc;
use std::time::Duration;

use sqlgate_config::SqlGateConfig;
use sqlgate_core::SqlGateError;
use sqlgate_ollama::OllamaExpert;
use sqlgate_router::QueryDispatcher;
use sqlgate_skill::builtin::register_builtins;
use sqlgate_skill::ToolRegistry;

/// Flags of the `analyze` subcommand.
#[derive(Debug, Default)]
pub struct AnalyzeOptions {
    pub dialect: Option<String>,
    pub json: bool,
    pub timeout_secs: Option<u64>,
}

fn build_dispatcher(
    config: &SqlGateConfig,
    timeout_secs: Option<u64>,
) -> Result<QueryDispatcher, SqlGateError> {
    let expert = OllamaExpert::new(&config.expert)?;
    let dispatcher = QueryDispatcher::new(Arc::new(expert))
        .with_dialect(config.analysis.default_dialect.clone());
    Ok(match timeout_secs {
        Some(secs) => dispatcher.with_timeout(Duration::from_secs(secs)),
        None => dispatcher,
    })
}

fn build_registry(dispatcher: QueryDispatcher) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry, dispatcher);
    registry
}

pub async fn run_analyze(
    config: &SqlGateConfig,
    query: &str,
    options: AnalyzeOptions,
) -> Result<(), SqlGateError> {
    let dispatcher = build_dispatcher(config, options.timeout_secs)?;

    if options.json {
        let registry = build_registry(dispatcher);
        let mut input = serde_json::json!({ "query": query });
        if let Some(dialect) = options.dialect {
            input["dialect"] = serde_json::Value::String(dialect);
        }
        let output = registry.invoke("analyze_sql", input).await?;
        println!("{}", output.content);
    } else {
        let analysis = dispatcher
            .analyze(query, options.dialect.as_deref())
            .await?;
        println!("{}", analysis.into_text());
    }
    Ok(())
}

pub fn run_tools(config: &SqlGateConfig) -> Result<(), SqlGateError> {
    let registry = build_registry(build_dispatcher(config, None)?);
    let definitions = serde_json::Value::Array(registry.tool_definitions());
    let rendered = serde_json::to_string_pretty(&definitions)
        .map_err(|e| SqlGateError::Internal(format!("failed to render tool definitions: {e}")))?;
    println!("{rendered}");
    Ok(())
}
