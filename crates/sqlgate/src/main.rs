// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQL Gate - index recommendations for simple SQL queries.
//!
//! This is the binary entry point. Simple single-table queries are answered
//! locally; everything else is escalated to an Ollama-hosted expert model.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod analyze;
mod classify;
mod doctor;

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sqlgate_core::SqlGateError;

/// Exit status for configuration and usage errors.
const EXIT_CONFIG: i32 = 1;
/// Exit status when the expert could not answer.
const EXIT_EXPERT: i32 = 2;

/// SQL Gate - index recommendations for simple SQL queries.
#[derive(Parser, Debug)]
#[command(name = "sqlgate", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Recommend indexes for a query, consulting the expert when needed.
    Analyze {
        /// SQL query; read from stdin when omitted or `-`.
        query: Option<String>,
        /// SQL dialect passed to the expert.
        #[arg(long)]
        dialect: Option<String>,
        /// Print the JSON tool payload instead of plain text.
        #[arg(long)]
        json: bool,
        /// Give up on the expert after this many seconds.
        #[arg(long, value_name = "N")]
        timeout_secs: Option<u64>,
    },
    /// Print the simple/complex verdict without contacting the expert.
    Classify {
        /// SQL query; read from stdin when omitted or `-`.
        query: Option<String>,
        /// Print the verdict as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print tool definitions for agent integration.
    Tools,
    /// Check the configuration and that the expert backend is reachable.
    Doctor,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => sqlgate_config::load_and_validate_path(path),
        None => sqlgate_config::load_and_validate(),
    };
    let config = match config {
        Ok(config) => config,
        Err(errors) => {
            sqlgate_config::render_errors(&errors);
            std::process::exit(EXIT_CONFIG);
        }
    };

    init_tracing(&config.agent.log_level);
    tracing::debug!(agent = %config.agent.name, "configuration loaded");

    let result = match cli.command {
        Commands::Analyze {
            query,
            dialect,
            json,
            timeout_secs,
        } => match read_query(query) {
            Ok(query) => {
                let options = analyze::AnalyzeOptions {
                    dialect,
                    json,
                    timeout_secs,
                };
                analyze::run_analyze(&config, &query, options).await
            }
            Err(e) => Err(e),
        },
        Commands::Classify { query, json } => {
            read_query(query).and_then(|query| classify::run_classify(&query, json))
        }
        Commands::Tools => analyze::run_tools(&config),
        Commands::Doctor => doctor::run_doctor(&config).await,
    };

    if let Err(e) = result {
        eprintln!("sqlgate: {e}");
        std::process::exit(exit_code(&e));
    }
}

fn exit_code(err: &SqlGateError) -> i32 {
    if err.is_expert_unavailable() {
        EXIT_EXPERT
    } else {
        EXIT_CONFIG
    }
}

/// Returns the positional query, or stdin when it is absent or `-`.
fn read_query(arg: Option<String>) -> Result<String, SqlGateError> {
    match arg {
        Some(query) if query != "-" => Ok(query),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| SqlGateError::Internal(format!("failed to read stdin: {e}")))?;
            Ok(buf)
        }
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so stdout carries only command output.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

fn default_filter(log_level: &str) -> String {
    let crates = [
        "sqlgate",
        "sqlgate_config",
        "sqlgate_router",
        "sqlgate_ollama",
        "sqlgate_skill",
    ];
    let mut directives: Vec<String> = crates
        .iter()
        .map(|name| format!("{name}={log_level}"))
        .collect();
    directives.push("warn".to_string());
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc supports advancing the epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = sqlgate_config::load_and_validate_str("").expect("defaults should be valid");
        assert_eq!(config.agent.name, "sqlgate");
    }

    #[test]
    fn parses_analyze_flags() {
        let cli = Cli::try_parse_from([
            "sqlgate",
            "analyze",
            "SELECT * FROM t",
            "--dialect",
            "postgresql",
            "--json",
            "--timeout-secs",
            "30",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze {
                query,
                dialect,
                json,
                timeout_secs,
            } => {
                assert_eq!(query.as_deref(), Some("SELECT * FROM t"));
                assert_eq!(dialect.as_deref(), Some("postgresql"));
                assert!(json);
                assert_eq!(timeout_secs, Some(30));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["sqlgate", "tools", "--config", "/tmp/x.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
        assert!(matches!(cli.command, Commands::Tools));
    }

    #[test]
    fn parses_doctor() {
        let cli = Cli::try_parse_from(["sqlgate", "doctor"]).unwrap();
        assert!(matches!(cli.command, Commands::Doctor));
        assert!(Cli::try_parse_from(["sqlgate", "doctor", "--deep"]).is_err());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["sqlgate"]).is_err());
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exit_code(&SqlGateError::expert("down")), EXIT_EXPERT);
        assert_eq!(exit_code(&SqlGateError::Config("bad".into())), EXIT_CONFIG);
    }

    #[test]
    fn default_filter_covers_workspace_crates() {
        let filter = default_filter("debug");
        assert!(filter.starts_with("sqlgate=debug,"));
        assert!(filter.contains("sqlgate_router=debug"));
        assert!(filter.ends_with(",warn"));
    }

    #[test]
    fn explicit_query_is_not_read_from_stdin() {
        assert_eq!(read_query(Some("SELECT 1".into())).unwrap(), "SELECT 1");
    }
}
