// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the SQL Gate configuration system.

use sqlgate_config::diagnostic::ConfigError;
use sqlgate_config::model::SqlGateConfig;
use sqlgate_config::{load_and_validate_str, load_config_from_str};

#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[agent]
name = "gate"
log_level = "debug"

[expert]
base_url = "http://ollama.internal:11434"
model = "qwen2.5-coder:14b"
timeout_secs = 30
system_prompt = "You review SQL."

[analysis]
default_dialect = "postgresql"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "gate");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.expert.base_url, "http://ollama.internal:11434");
    assert_eq!(config.expert.model, "qwen2.5-coder:14b");
    assert_eq!(config.expert.timeout_secs, 30);
    assert_eq!(config.expert.system_prompt, "You review SQL.");
    assert_eq!(config.analysis.default_dialect, "postgresql");
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.agent.name, "sqlgate");
    assert_eq!(config.expert.model, "qwen2.5-coder:7b");
    assert_eq!(config.analysis.default_dialect, "mysql");
}

#[test]
fn unknown_field_in_expert_produces_error() {
    let toml = r#"
[expert]
modle = "x"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("modle"),
        "error should mention the bad key, got: {err_str}"
    );
}

#[test]
fn unknown_field_becomes_diagnostic_with_suggestion() {
    let toml = r#"
[expert]
modle = "x"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "modle" && suggestion.as_deref() == Some("model")
        )
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telemetry]
enabled = true
"#;

    let err = load_config_from_str(toml).expect_err("unknown section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("telemetry"),
        "got: {err_str}"
    );
}

#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[expert]
timeout_secs = "soon"
"#;

    let errors = load_and_validate_str(toml).expect_err("string timeout should be rejected");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. } | ConfigError::Other(_))),
        "got: {errors:?}"
    );
}

#[test]
fn validation_errors_surface_through_load_and_validate() {
    let toml = r#"
[expert]
timeout_secs = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero timeout should fail");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("timeout_secs"))));
}

#[test]
fn dotted_override_replaces_toml_value() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let toml_content = r#"
[expert]
base_url = "http://from-toml:11434"
"#;

    // Stands in for SQLGATE_EXPERT_BASE_URL after key mapping.
    let config: SqlGateConfig = Figment::new()
        .merge(Serialized::defaults(SqlGateConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("expert.base_url", "http://from-env:11434"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.expert.base_url, "http://from-env:11434");
}

#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: SqlGateConfig = Figment::new()
        .merge(Serialized::defaults(SqlGateConfig::default()))
        .merge(Toml::file("/nonexistent/path/sqlgate.toml"))
        .extract()
        .expect("missing file should be skipped");

    assert_eq!(config.agent.name, "sqlgate");
}

#[test]
fn load_from_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    std::io::Write::write_all(
        &mut file,
        b"[expert]\nmodel = \"llama3.1:8b\"\ntimeout_secs = 30\n",
    )
    .expect("write config");

    let config = sqlgate_config::load_and_validate_path(file.path()).expect("should load");
    assert_eq!(config.expert.model, "llama3.1:8b");
    assert_eq!(config.expert.timeout_secs, 30);
    assert_eq!(config.analysis.default_dialect, "mysql");
}

#[test]
fn load_from_path_reports_unknown_key_with_source() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    std::io::Write::write_all(&mut file, b"[analysis]\ndefault_dialct = \"sqlite\"\n")
        .expect("write config");

    let errors = sqlgate_config::load_and_validate_path(file.path()).unwrap_err();
    assert!(
        errors.iter().any(|e| matches!(
            e,
            ConfigError::UnknownKey { suggestion: Some(s), .. } if s == "default_dialect"
        )),
        "expected suggestion, got: {errors:?}"
    );
}

#[test]
fn hierarchy_merges_local_file_and_env() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "sqlgate.toml",
            "[expert]\nmodel = \"from-file\"\nbase_url = \"http://file:11434\"\n",
        )?;
        jail.set_env("SQLGATE_EXPERT_BASE_URL", "http://env:11434");
        jail.set_env("SQLGATE_AGENT_LOG_LEVEL", "debug");

        let config = sqlgate_config::load_and_validate().expect("should load");
        assert_eq!(config.expert.model, "from-file");
        assert_eq!(config.expert.base_url, "http://env:11434");
        assert_eq!(config.agent.log_level, "debug");
        Ok(())
    });
}

#[test]
fn env_values_are_validated() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("SQLGATE_EXPERT_TIMEOUT_SECS", "0");

        let errors = sqlgate_config::load_and_validate().unwrap_err();
        assert!(
            errors.iter().all(|e| matches!(
                e,
                ConfigError::Validation { message } if message.contains("timeout_secs")
            )),
            "expected only a timeout validation error, got: {errors:?}"
        );
        assert_eq!(errors.len(), 1);
        Ok(())
    });
}
