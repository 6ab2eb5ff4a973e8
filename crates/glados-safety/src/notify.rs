// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification worker: drains the safety queue and DMs designated contacts.
//!
//! Runs detached from the request path so delivery latency or failure never
//! blocks a user-facing response. The queue redelivers on crash, and the
//! `notified_at` marker on the token makes redelivery a no-op.

use std::sync::Arc;
use std::time::Duration;

use glados_core::types::RichContent;
use glados_core::{ChatTransport, GladosError, SafetyStore, TaskQueue};
use tracing::{debug, error, info, warn};

use crate::escalation::NotificationPayload;
use crate::now_string;

/// Polls the notification queue and delivers alert DMs.
pub struct NotificationWorker {
    queue: Arc<dyn TaskQueue>,
    safety: Arc<dyn SafetyStore>,
    transport: Arc<dyn ChatTransport>,
    queue_name: String,
    poll_interval: Duration,
}

impl NotificationWorker {
    pub fn new(
        queue: Arc<dyn TaskQueue>,
        safety: Arc<dyn SafetyStore>,
        transport: Arc<dyn ChatTransport>,
        queue_name: impl Into<String>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            queue,
            safety,
            transport,
            queue_name: queue_name.into(),
            poll_interval,
        }
    }

    /// Runs forever. Spawn on its own task.
    pub async fn run(self) {
        info!(queue = %self.queue_name, "notification worker started");
        loop {
            match self.tick().await {
                Ok(true) => {} // Processed a task; poll again immediately.
                Ok(false) => tokio::time::sleep(self.poll_interval).await,
                Err(e) => {
                    error!(error = %e, "notification worker tick failed");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }

    /// Processes at most one task. Returns whether a task was claimed.
    pub async fn tick(&self) -> Result<bool, GladosError> {
        let Some(task) = self.queue.dequeue(&self.queue_name).await? else {
            return Ok(false);
        };

        match self.deliver(&task.payload).await {
            Ok(()) => self.queue.ack(task.id).await?,
            Err(e) => {
                warn!(
                    task_id = task.id,
                    attempts = task.attempts,
                    error = %e,
                    "notification delivery failed"
                );
                self.queue.fail(task.id).await?;
            }
        }
        Ok(true)
    }

    async fn deliver(&self, payload_json: &str) -> Result<(), GladosError> {
        let payload: NotificationPayload = serde_json::from_str(payload_json)
            .map_err(|e| GladosError::Internal(format!("notification payload decode: {e}")))?;

        // Redelivery check: the marker is set only after a successful send,
        // so a send that failed stays deliverable and a send that succeeded
        // is not repeated.
        let Some(token) = self.safety.find_ack_token(&payload.token).await? else {
            warn!(token = %payload.token, "notification references unknown token, dropping");
            return Ok(());
        };
        if token.notified_at.is_some() {
            debug!(token = %payload.token, "notification already delivered, skipping");
            return Ok(());
        }

        // Two acknowledgment paths: reply in the chat surface, or the CLI
        // token link. Both consume the same token.
        let rich = RichContent {
            title: "Safety alert".to_string(),
            body: format!(
                "A message on your team was flagged for review.\n\
                 Reply here with: ack {token}\n\
                 Or from a terminal: glados ack {token}",
                token = payload.token
            ),
            fields: vec![
                ("Severity".to_string(), payload.severity.to_string()),
                ("Reason".to_string(), payload.trigger_reason.clone()),
                ("Alert".to_string(), payload.alert_id.clone()),
            ],
        };
        self.transport
            .send_message(
                &payload.dm_target,
                "A safety alert needs your attention.",
                Some(rich),
            )
            .await?;

        self.safety
            .mark_token_notified(&payload.token, &now_string())
            .await?;

        info!(
            alert_id = %payload.alert_id,
            contact = %payload.contact_user_id,
            "safety notification delivered"
        );
        Ok(())
    }
}
