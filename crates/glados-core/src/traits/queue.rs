// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asynchronous task queue trait with at-least-once delivery.

use async_trait::async_trait;

use crate::error::GladosError;
use crate::types::QueueTask;

/// Durable task queue used for fire-and-forget work such as safety
/// notification delivery.
///
/// Delivery is at-least-once: a crashed consumer's claim expires and the task
/// is handed out again, so consumers must be idempotent against redelivery.
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Enqueues a payload on the named queue. Returns the task id.
    async fn enqueue(&self, queue_name: &str, payload: &str) -> Result<i64, GladosError>;

    /// Claims the next pending task, or `None` if the queue is empty.
    async fn dequeue(&self, queue_name: &str) -> Result<Option<QueueTask>, GladosError>;

    /// Acknowledges successful processing of a claimed task.
    async fn ack(&self, task_id: i64) -> Result<(), GladosError>;

    /// Records a failed attempt; the task is retried until its attempt budget
    /// is exhausted.
    async fn fail(&self, task_id: i64) -> Result<(), GladosError>;
}
