// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `sqlgate doctor` command implementation.
//!
//! Reports the loaded configuration and whether the expert backend answers.

use std::time::{Duration, Instant};

use sqlgate_config::SqlGateConfig;
use sqlgate_core::{ExpertAdapter, HealthStatus, SqlGateError};
use sqlgate_ollama::OllamaExpert;

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Warn,
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub duration: Duration,
}

/// Run the `sqlgate doctor` command.
///
/// Any failed check is reported as `ExpertUnavailable` so the process exits 2.
pub async fn run_doctor(config: &SqlGateConfig) -> Result<(), SqlGateError> {
    let mut results = vec![check_config(config)];
    match OllamaExpert::new(&config.expert) {
        Ok(expert) => results.push(check_expert(&expert).await),
        Err(e) => results.push(CheckResult {
            name: "Expert".to_string(),
            status: CheckStatus::Fail,
            message: e.to_string(),
            duration: Duration::ZERO,
        }),
    }

    println!();
    println!("  sqlgate doctor");
    println!("  {}", "-".repeat(50));
    for result in &results {
        println!("{}", render_line(result));
    }
    println!();

    let fail_count = results
        .iter()
        .filter(|r| r.status == CheckStatus::Fail)
        .count();
    let warn_count = results
        .iter()
        .filter(|r| r.status == CheckStatus::Warn)
        .count();
    println!("  {}", summary(fail_count + warn_count));

    if fail_count > 0 {
        return Err(SqlGateError::expert(format!(
            "{fail_count} doctor check(s) failed"
        )));
    }
    Ok(())
}

fn render_line(result: &CheckResult) -> String {
    let tag = match result.status {
        CheckStatus::Pass => "[OK]  ",
        CheckStatus::Warn => "[WARN]",
        CheckStatus::Fail => "[FAIL]",
    };
    format!(
        "    {tag} {:<20} {} ({}ms)",
        result.name,
        result.message,
        result.duration.as_millis()
    )
}

fn summary(issues: usize) -> String {
    match issues {
        0 => "All checks passed.".to_string(),
        1 => "1 issue found.".to_string(),
        n => format!("{n} issues found."),
    }
}

/// The config already passed validation by the time this runs.
fn check_config(config: &SqlGateConfig) -> CheckResult {
    CheckResult {
        name: "Config".to_string(),
        status: CheckStatus::Pass,
        message: format!(
            "model {} at {}, dialect {}",
            config.expert.model, config.expert.base_url, config.analysis.default_dialect
        ),
        duration: Duration::ZERO,
    }
}

async fn check_expert(expert: &dyn ExpertAdapter) -> CheckResult {
    let start = Instant::now();
    let label = format!(
        "{} {} v{}",
        expert.adapter_type(),
        expert.name(),
        expert.version()
    );
    let (status, message) = match expert.health_check().await {
        Ok(HealthStatus::Healthy) => (CheckStatus::Pass, format!("{label} reachable")),
        Ok(HealthStatus::Degraded(reason)) => (CheckStatus::Warn, format!("{label}: {reason}")),
        Ok(HealthStatus::Unhealthy(reason)) => (CheckStatus::Fail, format!("{label}: {reason}")),
        Err(e) => (CheckStatus::Fail, format!("{label}: {e}")),
    };
    CheckResult {
        name: "Expert".to_string(),
        status,
        message,
        duration: start.elapsed(),
    }
}
