// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the GLaDOS team assistant.
//!
//! This crate provides the foundational trait definitions, error type, and
//! common types used throughout the GLaDOS workspace. The orchestration
//! pipeline depends only on the traits defined here, never on concrete
//! collaborators.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GladosError;
pub use types::{ClassificationResult, MessageId, RiskLevel};

// Re-export all adapter traits at crate root.
pub use traits::{
    AuditLog, ChatTransport, Classifier, HistoryStore, ModelProvider, SafetyStore, TaskQueue,
    TeamDirectory,
};
