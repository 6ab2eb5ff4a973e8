// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./glados.toml` > `~/.config/glados/glados.toml` >
//! `/etc/glados/glados.toml` with environment variable overrides via the
//! `GLADOS_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::GladosConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/glados/glados.toml` (system-wide)
/// 3. `~/.config/glados/glados.toml` (user XDG config)
/// 4. `./glados.toml` (local directory)
/// 5. `GLADOS_*` environment variables
pub fn load_config() -> Result<GladosConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GladosConfig::default()))
        .merge(Toml::file("/etc/glados/glados.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("glados/glados.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("glados.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and for loading an explicit config string.
pub fn load_config_from_str(toml_content: &str) -> Result<GladosConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GladosConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GladosConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GladosConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `GLADOS_ANTHROPIC_API_KEY` must map to
/// `anthropic.api_key`, not `anthropic.api.key`.
fn env_provider() -> Env {
    Env::prefixed("GLADOS_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("safety_", "safety.", 1);
        mapped.into()
    })
}
