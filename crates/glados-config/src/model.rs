// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the GLaDOS assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level GLaDOS configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GladosConfig {
    /// Agent identity and pipeline settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Youth-protection safety settings.
    #[serde(default)]
    pub safety: SafetyConfig,
}

/// Agent identity and pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Number of recent conversation turns loaded as context.
    #[serde(default = "default_history_window")]
    pub history_window: usize,

    /// Hard bound on model calls per inbound message.
    #[serde(default = "default_max_model_calls")]
    pub max_model_calls: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            history_window: default_history_window(),
            max_model_calls: default_max_model_calls(),
        }
    }
}

fn default_agent_name() -> String {
    "GLaDOS".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_history_window() -> usize {
    20
}

fn default_max_model_calls() -> usize {
    10
}

/// Anthropic API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Anthropic API key. `None` requires environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Default model for the agent loop.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Model for risk classification (small and fast).
    #[serde(default = "default_classifier_model")]
    pub classifier_model: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_model(),
            classifier_model: default_classifier_model(),
            max_tokens: default_max_tokens(),
            api_version: default_api_version(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_classifier_model() -> String {
    "claude-haiku-4-5-20250901".to_string()
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("glados").join("glados.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("glados.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Youth-protection safety configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SafetyConfig {
    /// Validity window of alert acknowledgment tokens, in days.
    #[serde(default = "default_ack_token_ttl_days")]
    pub ack_token_ttl_days: i64,

    /// Queue name for escalation notification tasks.
    #[serde(default = "default_notification_queue")]
    pub notification_queue: String,

    /// Poll interval of the notification worker, in seconds.
    #[serde(default = "default_notify_poll_secs")]
    pub notify_poll_secs: u64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            ack_token_ttl_days: default_ack_token_ttl_days(),
            notification_queue: default_notification_queue(),
            notify_poll_secs: default_notify_poll_secs(),
        }
    }
}

fn default_ack_token_ttl_days() -> i64 {
    7
}

fn default_notification_queue() -> String {
    "safety_notifications".to_string()
}

fn default_notify_poll_secs() -> u64 {
    5
}
