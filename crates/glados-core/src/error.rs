// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the GLaDOS assistant pipeline.

use thiserror::Error;

/// The primary error type used across all GLaDOS adapter traits and core operations.
#[derive(Debug, Error)]
pub enum GladosError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Chat transport errors (delivery failure, unknown target, rate limiting).
    #[error("transport error: {message}")]
    Transport {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Model provider errors (API failure, token limits, model not found).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Risk classification errors. The classifier itself fails open and never
    /// surfaces this to the pipeline; the variant exists for internal reporting.
    #[error("classification error: {0}")]
    Classification(String),

    /// Team-data domain errors (unknown record, invalid mutation).
    #[error("domain error: {0}")]
    Domain(String),

    /// The caller's role does not permit the requested read surface.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
