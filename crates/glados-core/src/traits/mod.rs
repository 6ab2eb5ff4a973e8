// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the GLaDOS pipeline.
//!
//! Every external collaborator (model inference, chat delivery, persistence,
//! scheduling, risk classification) sits behind a trait here so the
//! orchestration pipeline can be exercised with deterministic stubs.

pub mod classifier;
pub mod provider;
pub mod queue;
pub mod storage;
pub mod transport;

pub use classifier::Classifier;
pub use provider::ModelProvider;
pub use queue::TaskQueue;
pub use storage::{AuditLog, HistoryStore, SafetyStore, TeamDirectory};
pub use transport::ChatTransport;
