// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable task queue operations.
//!
//! Delivery is at-least-once: a claimed task holds a lease, and a worker that
//! dies mid-task lets the lease expire so another dequeue can reclaim it.
//! Consumers must be idempotent.

use chrono::{Duration, SecondsFormat, Utc};
use glados_core::GladosError;
use glados_core::types::QueueTask;
use rusqlite::params;

use crate::database::Database;

/// How long a claimed task stays invisible to other workers.
const LEASE_MINUTES: i64 = 5;

/// Enqueue a payload, returning the task id.
pub async fn enqueue(db: &Database, queue_name: &str, payload: &str) -> Result<i64, GladosError> {
    let queue_name = queue_name.to_string();
    let payload = payload.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO task_queue (queue_name, payload) VALUES (?1, ?2)",
                params![queue_name, payload],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Claim the oldest available task, if any.
///
/// A task is available when it is pending, or when it is processing but its
/// lease has expired. The select and the claim run inside one transaction.
pub async fn dequeue(db: &Database, queue_name: &str) -> Result<Option<QueueTask>, GladosError> {
    let queue_name = queue_name.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            let now = Utc::now();
            let now_str = now.to_rfc3339_opts(SecondsFormat::Millis, true);
            let lease = (now + Duration::minutes(LEASE_MINUTES))
                .to_rfc3339_opts(SecondsFormat::Millis, true);

            let task = {
                let mut stmt = tx.prepare(
                    "SELECT id, queue_name, payload, attempts, max_attempts FROM task_queue
                     WHERE queue_name = ?1
                       AND (status = 'pending'
                            OR (status = 'processing' AND locked_until < ?2))
                     ORDER BY id ASC LIMIT 1",
                )?;
                let mut rows = stmt.query_map(params![queue_name, now_str], |row| {
                    Ok(QueueTask {
                        id: row.get(0)?,
                        queue_name: row.get(1)?,
                        payload: row.get(2)?,
                        attempts: row.get(3)?,
                        max_attempts: row.get(4)?,
                    })
                })?;
                match rows.next() {
                    Some(row) => Some(row?),
                    None => None,
                }
            };

            let task = match task {
                Some(task) => task,
                None => return Ok(None),
            };

            tx.execute(
                "UPDATE task_queue
                 SET status = 'processing', locked_until = ?2, updated_at = ?3
                 WHERE id = ?1",
                params![task.id, lease, now_str],
            )?;
            tx.commit()?;
            Ok(Some(task))
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark a claimed task as completed.
pub async fn ack(db: &Database, task_id: i64) -> Result<(), GladosError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE task_queue
                 SET status = 'completed', locked_until = NULL,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?1",
                params![task_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Record a failed attempt.
///
/// The task goes back to pending until its attempts are exhausted, then it is
/// parked as failed and never redelivered.
pub async fn fail(db: &Database, task_id: i64) -> Result<(), GladosError> {
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE task_queue
                 SET attempts = attempts + 1,
                     status = CASE WHEN attempts + 1 >= max_attempts
                              THEN 'failed' ELSE 'pending' END,
                     locked_until = NULL,
                     updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                 WHERE id = ?1",
                params![task_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
