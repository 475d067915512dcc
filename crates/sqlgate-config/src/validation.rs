// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::SqlGateConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &SqlGateConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.agent.log_level.trim().to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level `{}` must be one of: {}",
                config.agent.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    let base_url = config.expert.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "expert.base_url must not be empty".to_string(),
        });
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("expert.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.expert.model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "expert.model must not be empty".to_string(),
        });
    }

    if config.expert.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "expert.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.analysis.default_dialect.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "analysis.default_dialect must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_message(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = SqlGateConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn non_http_base_url_fails_validation() {
        let mut config = SqlGateConfig::default();
        config.expert.base_url = "localhost:11434".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "expert.base_url"));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = SqlGateConfig::default();
        config.expert.timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "timeout_secs"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = SqlGateConfig::default();
        config.agent.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_message(&errors, "agent.log_level"));
    }

    #[test]
    fn all_errors_are_collected() {
        let mut config = SqlGateConfig::default();
        config.expert.model = " ".to_string();
        config.expert.timeout_secs = 0;
        config.analysis.default_dialect = String::new();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn uppercase_log_level_is_accepted() {
        let mut config = SqlGateConfig::default();
        config.agent.log_level = "DEBUG".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
