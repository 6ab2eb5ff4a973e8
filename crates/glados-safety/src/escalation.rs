// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Alert creation and acknowledgment.
//!
//! Creating an alert is durable-first: the alert row and one single-use
//! acknowledgment token per designated contact are written before any
//! notification is enqueued. Delivery failures can never lose the record.

use std::sync::Arc;

use chrono::{Duration, SecondsFormat, Utc};
use glados_core::types::{AlertAckToken, AlertSeverity, AlertStatus, SafetyAlert, YppContact};
use glados_core::{GladosError, SafetyStore, TaskQueue, TeamDirectory};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::now_string;

/// Everything needed to raise an alert for one flagged message.
#[derive(Debug, Clone)]
pub struct AlertRequest {
    pub team_id: String,
    pub user_id: String,
    pub channel_id: Option<String>,
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub trigger_reason: String,
    pub message_content: String,
}

/// Result of raising an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAlert {
    pub alert_id: String,
    /// Contacts a notification task was enqueued for.
    pub notified_count: usize,
}

/// Receipt returned to the contact who acknowledged an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AckReceipt {
    pub alert_id: String,
    pub team_id: String,
}

/// Why an acknowledgment was rejected.
///
/// Expiry is checked before use state, so an expired-and-used token reports
/// expiry.
#[derive(Debug, thiserror::Error)]
pub enum AckError {
    #[error("invalid_token")]
    InvalidToken,
    #[error("expired_token")]
    ExpiredToken,
    #[error("already_used")]
    AlreadyUsed,
    #[error("alert_not_found")]
    AlertNotFound,
    #[error("storage failure during acknowledgment")]
    Storage(#[from] GladosError),
}

// Rejection kinds compare by discriminant; wrapped storage errors are not
// comparable and two `Storage` values count as the same kind.
impl PartialEq for AckError {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Eq for AckError {}

/// Queue payload for one contact's notification. Serialized into the durable
/// task queue; the worker re-reads current token state before delivering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPayload {
    pub token: String,
    pub alert_id: String,
    pub contact_user_id: String,
    pub dm_target: String,
    pub severity: AlertSeverity,
    pub trigger_reason: String,
    pub team_id: String,
}

/// Raises alerts and processes acknowledgments.
pub struct EscalationService {
    safety: Arc<dyn SafetyStore>,
    teams: Arc<dyn TeamDirectory>,
    queue: Arc<dyn TaskQueue>,
    queue_name: String,
    token_ttl_days: i64,
}

impl EscalationService {
    pub fn new(
        safety: Arc<dyn SafetyStore>,
        teams: Arc<dyn TeamDirectory>,
        queue: Arc<dyn TaskQueue>,
        queue_name: impl Into<String>,
        token_ttl_days: i64,
    ) -> Self {
        Self {
            safety,
            teams,
            queue,
            queue_name: queue_name.into(),
            token_ttl_days,
        }
    }

    /// Records an alert and enqueues a notification per reachable contact.
    ///
    /// A contact without a DM target still gets a token minted (the alert is
    /// acknowledgeable through any surface) but no notification task.
    pub async fn create_alert(&self, request: AlertRequest) -> Result<CreatedAlert, GladosError> {
        let now = now_string();
        let alert = SafetyAlert {
            id: Uuid::new_v4().to_string(),
            team_id: request.team_id.clone(),
            user_id: request.user_id,
            channel_id: request.channel_id,
            alert_type: request.alert_type,
            severity: request.severity,
            trigger_reason: request.trigger_reason.clone(),
            message_content: request.message_content,
            status: AlertStatus::Pending,
            created_at: now.clone(),
        };
        self.safety.insert_alert(&alert).await?;

        let contacts = self.teams.contacts_for_team(&request.team_id).await?;
        if contacts.is_empty() {
            warn!(
                alert_id = %alert.id,
                team_id = %request.team_id,
                "alert raised for team with no designated contacts"
            );
        }

        let mut notified_count = 0;
        for contact in &contacts {
            let token = self.mint_token(&alert.id, contact, &now).await?;
            let Some(dm_target) = contact.dm_target.clone() else {
                warn!(
                    alert_id = %alert.id,
                    contact = %contact.user_id,
                    "contact has no DM target, skipping notification"
                );
                continue;
            };
            let payload = NotificationPayload {
                token,
                alert_id: alert.id.clone(),
                contact_user_id: contact.user_id.clone(),
                dm_target,
                severity: alert.severity,
                trigger_reason: request.trigger_reason.clone(),
                team_id: request.team_id.clone(),
            };
            let payload_json = serde_json::to_string(&payload)
                .map_err(|e| GladosError::Internal(format!("notification payload: {e}")))?;
            self.queue.enqueue(&self.queue_name, &payload_json).await?;
            notified_count += 1;
        }

        info!(
            alert_id = %alert.id,
            severity = %alert.severity,
            notified_count,
            "safety alert raised"
        );
        Ok(CreatedAlert {
            alert_id: alert.id,
            notified_count,
        })
    }

    async fn mint_token(
        &self,
        alert_id: &str,
        contact: &YppContact,
        now: &str,
    ) -> Result<String, GladosError> {
        let expires_at = (Utc::now() + Duration::days(self.token_ttl_days))
            .to_rfc3339_opts(SecondsFormat::Millis, true);
        let token = AlertAckToken {
            token: Uuid::new_v4().to_string(),
            alert_id: alert_id.to_string(),
            contact_user_id: contact.user_id.clone(),
            expires_at,
            used_at: None,
            used_by: None,
            notified_at: None,
            created_at: now.to_string(),
        };
        self.safety.insert_ack_token(&token).await?;
        Ok(token.token)
    }

    /// Consumes an acknowledgment token and advances the alert to reviewed.
    ///
    /// Consumption is exactly-once: the conditional update in the store
    /// decides the winner under concurrency, not the preceding read.
    pub async fn acknowledge(
        &self,
        token_value: &str,
        acked_by: &str,
    ) -> Result<AckReceipt, AckError> {
        let token = self
            .safety
            .find_ack_token(token_value)
            .await?
            .ok_or(AckError::InvalidToken)?;

        let now = Utc::now();
        let now_str = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        // String comparison is chronological for this fixed RFC 3339 layout.
        if token.expires_at.as_str() <= now_str.as_str() {
            return Err(AckError::ExpiredToken);
        }
        if token.used_at.is_some() {
            return Err(AckError::AlreadyUsed);
        }

        let won = self
            .safety
            .consume_ack_token(token_value, acked_by, &now_str)
            .await?;
        if !won {
            return Err(AckError::AlreadyUsed);
        }

        let alert = self
            .safety
            .get_alert(&token.alert_id)
            .await?
            .ok_or(AckError::AlertNotFound)?;

        if alert.status.can_transition_to(AlertStatus::Reviewed) {
            self.safety
                .set_alert_status(&alert.id, AlertStatus::Reviewed)
                .await?;
        }

        info!(alert_id = %alert.id, acked_by, "alert acknowledged");
        Ok(AckReceipt {
            alert_id: alert.id,
            team_id: alert.team_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryQueue, MemorySafetyStore, MemoryTeams};
    use glados_core::types::Team;

    fn service(
        safety: Arc<MemorySafetyStore>,
        teams: Arc<MemoryTeams>,
        queue: Arc<MemoryQueue>,
    ) -> EscalationService {
        EscalationService::new(safety, teams, queue, "safety_notifications", 7)
    }

    fn team_with_contacts(contacts: Vec<YppContact>) -> Arc<MemoryTeams> {
        Arc::new(MemoryTeams::new(
            vec![Team {
                id: "team-1".into(),
                name: "Team".into(),
                guild_id: None,
            }],
            contacts,
        ))
    }

    fn request() -> AlertRequest {
        AlertRequest {
            team_id: "team-1".into(),
            user_id: "student-1".into(),
            channel_id: Some("chan-1".into()),
            alert_type: "message_screening".into(),
            severity: AlertSeverity::High,
            trigger_reason: "self_harm".into(),
            message_content: "flagged text".into(),
        }
    }

    #[tokio::test]
    async fn create_alert_mints_token_per_contact_and_enqueues() {
        let safety = Arc::new(MemorySafetyStore::default());
        let teams = team_with_contacts(vec![
            YppContact {
                team_id: "team-1".into(),
                user_id: "mentor-a".into(),
                dm_target: Some("dm-a".into()),
            },
            YppContact {
                team_id: "team-1".into(),
                user_id: "mentor-b".into(),
                dm_target: Some("dm-b".into()),
            },
        ]);
        let queue = Arc::new(MemoryQueue::default());
        let svc = service(safety.clone(), teams, queue.clone());

        let created = svc.create_alert(request()).await.unwrap();
        assert_eq!(created.notified_count, 2);
        assert!(safety.get_alert(&created.alert_id).await.unwrap().is_some());
        assert_eq!(queue.len("safety_notifications"), 2);

        let task = queue.dequeue("safety_notifications").await.unwrap().unwrap();
        let payload: NotificationPayload = serde_json::from_str(&task.payload).unwrap();
        assert_eq!(payload.alert_id, created.alert_id);
        assert_eq!(payload.contact_user_id, "mentor-a");
    }

    #[tokio::test]
    async fn contact_without_dm_target_gets_no_notification() {
        let safety = Arc::new(MemorySafetyStore::default());
        let teams = team_with_contacts(vec![YppContact {
            team_id: "team-1".into(),
            user_id: "mentor-a".into(),
            dm_target: None,
        }]);
        let queue = Arc::new(MemoryQueue::default());
        let svc = service(safety.clone(), teams, queue.clone());

        let created = svc.create_alert(request()).await.unwrap();
        assert_eq!(created.notified_count, 0);
        assert_eq!(queue.len("safety_notifications"), 0);
        // The token still exists for out-of-band acknowledgment.
        assert_eq!(safety.token_count(), 1);
    }

    #[tokio::test]
    async fn acknowledge_happy_path_reviews_alert() {
        let safety = Arc::new(MemorySafetyStore::default());
        let teams = team_with_contacts(vec![YppContact {
            team_id: "team-1".into(),
            user_id: "mentor-a".into(),
            dm_target: Some("dm-a".into()),
        }]);
        let queue = Arc::new(MemoryQueue::default());
        let svc = service(safety.clone(), teams, queue.clone());

        let created = svc.create_alert(request()).await.unwrap();
        let task = queue.dequeue("safety_notifications").await.unwrap().unwrap();
        let payload: NotificationPayload = serde_json::from_str(&task.payload).unwrap();

        let receipt = svc.acknowledge(&payload.token, "mentor-a").await.unwrap();
        assert_eq!(receipt.alert_id, created.alert_id);
        assert_eq!(receipt.team_id, "team-1");

        let alert = safety.get_alert(&created.alert_id).await.unwrap().unwrap();
        assert_eq!(alert.status, AlertStatus::Reviewed);
    }

    #[tokio::test]
    async fn second_acknowledge_is_already_used() {
        let safety = Arc::new(MemorySafetyStore::default());
        let teams = team_with_contacts(vec![YppContact {
            team_id: "team-1".into(),
            user_id: "mentor-a".into(),
            dm_target: Some("dm-a".into()),
        }]);
        let queue = Arc::new(MemoryQueue::default());
        let svc = service(safety.clone(), teams, queue.clone());

        svc.create_alert(request()).await.unwrap();
        let task = queue.dequeue("safety_notifications").await.unwrap().unwrap();
        let payload: NotificationPayload = serde_json::from_str(&task.payload).unwrap();

        svc.acknowledge(&payload.token, "mentor-a").await.unwrap();
        let err = svc.acknowledge(&payload.token, "mentor-b").await.unwrap_err();
        assert_eq!(err, AckError::AlreadyUsed);
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let safety = Arc::new(MemorySafetyStore::default());
        let teams = team_with_contacts(vec![]);
        let queue = Arc::new(MemoryQueue::default());
        let svc = service(safety, teams, queue);

        let err = svc.acknowledge("no-such-token", "mentor-a").await.unwrap_err();
        assert_eq!(err, AckError::InvalidToken);
    }

    #[tokio::test]
    async fn expiry_dominates_used_state() {
        let safety = Arc::new(MemorySafetyStore::default());
        let token = AlertAckToken {
            token: "tok-expired".into(),
            alert_id: "alert-1".into(),
            contact_user_id: "mentor-a".into(),
            expires_at: "2020-01-01T00:00:00.000Z".into(),
            used_at: Some("2020-01-02T00:00:00.000Z".into()),
            used_by: Some("mentor-a".into()),
            notified_at: None,
            created_at: "2019-12-25T00:00:00.000Z".into(),
        };
        safety.insert_ack_token(&token).await.unwrap();

        let svc = service(
            safety,
            team_with_contacts(vec![]),
            Arc::new(MemoryQueue::default()),
        );
        let err = svc.acknowledge("tok-expired", "mentor-a").await.unwrap_err();
        assert_eq!(err, AckError::ExpiredToken);
    }

    #[tokio::test]
    async fn dangling_token_reports_alert_not_found() {
        let safety = Arc::new(MemorySafetyStore::default());
        let token = AlertAckToken {
            token: "tok-dangling".into(),
            alert_id: "missing-alert".into(),
            contact_user_id: "mentor-a".into(),
            expires_at: "2099-01-01T00:00:00.000Z".into(),
            used_at: None,
            used_by: None,
            notified_at: None,
            created_at: "2026-01-01T00:00:00.000Z".into(),
        };
        safety.insert_ack_token(&token).await.unwrap();

        let svc = service(
            safety,
            team_with_contacts(vec![]),
            Arc::new(MemoryQueue::default()),
        );
        let err = svc.acknowledge("tok-dangling", "mentor-a").await.unwrap_err();
        assert_eq!(err, AckError::AlertNotFound);
    }

    #[test]
    fn ack_error_codes_are_stable() {
        assert_eq!(AckError::InvalidToken.to_string(), "invalid_token");
        assert_eq!(AckError::ExpiredToken.to_string(), "expired_token");
        assert_eq!(AckError::AlreadyUsed.to_string(), "already_used");
        assert_eq!(AckError::AlertNotFound.to_string(), "alert_not_found");
    }

    #[test]
    fn ack_error_compares_by_kind() {
        assert_eq!(AckError::InvalidToken, AckError::InvalidToken);
        assert_ne!(AckError::InvalidToken, AckError::ExpiredToken);
        // Wrapped storage errors carry non-comparable sources; the kind is
        // what callers branch on.
        let a = AckError::Storage(GladosError::Internal("a".into()));
        let b = AckError::Storage(GladosError::Internal("b".into()));
        assert_eq!(a, b);
    }
}
