// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed implementations of the persistence traits.
//!
//! `SqliteStorage` is a thin facade over the query modules. Access control for
//! audit reads is enforced here, in front of the SQL, so no query path exists
//! that skips the role check.

use async_trait::async_trait;
use glados_core::GladosError;
use glados_core::traits::{AuditLog, HistoryStore, SafetyStore, TaskQueue, TeamDirectory};
use glados_core::types::{
    AlertAckToken, AlertStatus, AuditLogEntry, ConversationTurn, QueueTask, Role, SafetyAlert,
    Team, TurnRole, YppContact,
};
use tracing::warn;

use crate::database::{Database, now_rfc3339};
use crate::queries;

/// All persistence traits, backed by one SQLite database.
#[derive(Clone)]
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn require_elevated(role: Role, surface: &str) -> Result<(), GladosError> {
        if role.is_elevated() {
            Ok(())
        } else {
            warn!(role = %role, surface, "audit read denied");
            Err(GladosError::AccessDenied(format!(
                "role '{role}' may not read {surface}"
            )))
        }
    }
}

#[async_trait]
impl HistoryStore for SqliteStorage {
    async fn append_turn(
        &self,
        team_id: &str,
        channel_id: &str,
        role: TurnRole,
        content: &str,
    ) -> Result<(), GladosError> {
        queries::history::append_turn(&self.db, team_id, channel_id, role, content, &now_rfc3339())
            .await
    }

    async fn recent_turns(
        &self,
        team_id: &str,
        channel_id: &str,
        limit: usize,
    ) -> Result<Vec<ConversationTurn>, GladosError> {
        queries::history::recent_turns(&self.db, team_id, channel_id, limit).await
    }
}

#[async_trait]
impl AuditLog for SqliteStorage {
    async fn append(&self, entry: &AuditLogEntry) -> Result<(), GladosError> {
        queries::audit::append_entry(&self.db, entry).await
    }

    async fn entries_for_team(
        &self,
        role: Role,
        team_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLogEntry>, GladosError> {
        Self::require_elevated(role, "audit entries")?;
        queries::audit::entries_for_team(&self.db, team_id, limit).await
    }

    async fn entries_for_user(
        &self,
        role: Role,
        team_id: &str,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLogEntry>, GladosError> {
        Self::require_elevated(role, "audit entries")?;
        queries::audit::entries_for_user(&self.db, team_id, user_id, limit).await
    }

    async fn safety_entries(
        &self,
        role: Role,
        team_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLogEntry>, GladosError> {
        Self::require_elevated(role, "safety audit entries")?;
        queries::audit::safety_entries(&self.db, team_id, limit).await
    }

    async fn count_since(
        &self,
        role: Role,
        team_id: &str,
        since: &str,
    ) -> Result<u64, GladosError> {
        Self::require_elevated(role, "audit counts")?;
        queries::audit::count_since(&self.db, team_id, since).await
    }
}

#[async_trait]
impl SafetyStore for SqliteStorage {
    async fn insert_alert(&self, alert: &SafetyAlert) -> Result<(), GladosError> {
        queries::alerts::insert_alert(&self.db, alert).await
    }

    async fn get_alert(&self, alert_id: &str) -> Result<Option<SafetyAlert>, GladosError> {
        queries::alerts::get_alert(&self.db, alert_id).await
    }

    async fn set_alert_status(
        &self,
        alert_id: &str,
        status: AlertStatus,
    ) -> Result<(), GladosError> {
        queries::alerts::set_alert_status(&self.db, alert_id, status).await
    }

    async fn insert_ack_token(&self, token: &AlertAckToken) -> Result<(), GladosError> {
        queries::alerts::insert_ack_token(&self.db, token).await
    }

    async fn find_ack_token(&self, token: &str) -> Result<Option<AlertAckToken>, GladosError> {
        queries::alerts::find_ack_token(&self.db, token).await
    }

    async fn consume_ack_token(
        &self,
        token: &str,
        used_by: &str,
        used_at: &str,
    ) -> Result<bool, GladosError> {
        queries::alerts::consume_ack_token(&self.db, token, used_by, used_at).await
    }

    async fn mark_token_notified(
        &self,
        token: &str,
        notified_at: &str,
    ) -> Result<bool, GladosError> {
        queries::alerts::mark_token_notified(&self.db, token, notified_at).await
    }
}

#[async_trait]
impl TeamDirectory for SqliteStorage {
    async fn get_team(&self, team_id: &str) -> Result<Option<Team>, GladosError> {
        queries::teams::get_team(&self.db, team_id).await
    }

    async fn contacts_for_team(&self, team_id: &str) -> Result<Vec<YppContact>, GladosError> {
        queries::teams::contacts_for_team(&self.db, team_id).await
    }
}

#[async_trait]
impl TaskQueue for SqliteStorage {
    async fn enqueue(&self, queue_name: &str, payload: &str) -> Result<i64, GladosError> {
        queries::queue::enqueue(&self.db, queue_name, payload).await
    }

    async fn dequeue(&self, queue_name: &str) -> Result<Option<QueueTask>, GladosError> {
        queries::queue::dequeue(&self.db, queue_name).await
    }

    async fn ack(&self, task_id: i64) -> Result<(), GladosError> {
        queries::queue::ack(&self.db, task_id).await
    }

    async fn fail(&self, task_id: i64) -> Result<(), GladosError> {
        queries::queue::fail(&self.db, task_id).await
    }
}
