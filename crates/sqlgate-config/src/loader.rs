// SPDX-FileCopyrightText: 2026 SQL Gate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading with Figment.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `/etc/sqlgate/sqlgate.toml`
//! 3. `~/.config/sqlgate/sqlgate.toml`
//! 4. `./sqlgate.toml`
//! 5. `SQLGATE_*` environment variables

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SqlGateConfig;

pub(crate) const LOCAL_CONFIG: &str = "sqlgate.toml";
pub(crate) const SYSTEM_CONFIG: &str = "/etc/sqlgate/sqlgate.toml";

pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sqlgate").join(LOCAL_CONFIG))
}

/// Load configuration from the standard hierarchy with env var overrides.
pub fn load_config() -> Result<SqlGateConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<SqlGateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SqlGateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SqlGateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SqlGateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for hierarchy loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(SqlGateConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

/// `SQLGATE_EXPERT_BASE_URL` maps to `expert.base_url`.
///
/// Only the section prefix is rewritten; `Env::split("_")` would also split
/// the underscores inside key names.
fn env_provider() -> Env {
    Env::prefixed("SQLGATE_").map(|key| map_env_key(key.as_str()).into())
}

const SECTIONS: &[&str] = &["agent", "expert", "analysis"];

/// Figment hands over the key in its original (upper) case.
fn map_env_key(key: &str) -> String {
    let key = key.to_ascii_lowercase();
    SECTIONS
        .iter()
        .find_map(|section| {
            key.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|field| format!("{section}.{field}"))
        })
        .unwrap_or(key)
}
