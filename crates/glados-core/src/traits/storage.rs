// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence traits: conversation history, audit log, safety records, and
//! the team directory.
//!
//! These are narrow, purpose-built seams rather than one wide storage trait
//! so pipeline tests can stub exactly the surfaces they exercise.

use async_trait::async_trait;

use crate::error::GladosError;
use crate::types::{
    AlertAckToken, AlertStatus, AuditLogEntry, ConversationTurn, Role, SafetyAlert, Team,
    TurnRole, YppContact,
};

/// Append-only, team+channel scoped conversation history.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Appends one turn. History is never updated or deleted.
    async fn append_turn(
        &self,
        team_id: &str,
        channel_id: &str,
        role: TurnRole,
        content: &str,
    ) -> Result<(), GladosError>;

    /// Returns the most recent `limit` turns in chronological order.
    async fn recent_turns(
        &self,
        team_id: &str,
        channel_id: &str,
        limit: usize,
    ) -> Result<Vec<ConversationTurn>, GladosError>;
}

/// Append-only audit record of every interaction.
///
/// Read surfaces require an elevated role; they are never exposed to the
/// reporting end-user. No update or delete operation exists — corrections are
/// appended as superseding entries.
#[async_trait]
pub trait AuditLog: Send + Sync {
    async fn append(&self, entry: &AuditLogEntry) -> Result<(), GladosError>;

    async fn entries_for_team(
        &self,
        role: Role,
        team_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLogEntry>, GladosError>;

    async fn entries_for_user(
        &self,
        role: Role,
        team_id: &str,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLogEntry>, GladosError>;

    /// Entries with `contains_safety_alert = true`, newest first.
    async fn safety_entries(
        &self,
        role: Role,
        team_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditLogEntry>, GladosError>;

    /// Number of entries recorded since an RFC 3339 timestamp.
    async fn count_since(
        &self,
        role: Role,
        team_id: &str,
        since: &str,
    ) -> Result<u64, GladosError>;
}

/// Durable safety records: alerts and acknowledgment tokens.
#[async_trait]
pub trait SafetyStore: Send + Sync {
    /// Inserts an alert row. Alerts are never deleted.
    async fn insert_alert(&self, alert: &SafetyAlert) -> Result<(), GladosError>;

    async fn get_alert(&self, alert_id: &str) -> Result<Option<SafetyAlert>, GladosError>;

    /// Applies a status change. The caller enforces monotonic transitions;
    /// the store only writes.
    async fn set_alert_status(
        &self,
        alert_id: &str,
        status: AlertStatus,
    ) -> Result<(), GladosError>;

    async fn insert_ack_token(&self, token: &AlertAckToken) -> Result<(), GladosError>;

    async fn find_ack_token(&self, token: &str) -> Result<Option<AlertAckToken>, GladosError>;

    /// Atomically marks the token used iff it is currently unused.
    ///
    /// Returns `true` only for the single caller that consumed it; concurrent
    /// callers observe `false`. The store must provide at least
    /// read-committed consistency for this check-then-set to be race-free.
    async fn consume_ack_token(
        &self,
        token: &str,
        used_by: &str,
        used_at: &str,
    ) -> Result<bool, GladosError>;

    /// Marks the token's notification as delivered iff not already marked.
    /// Returns `false` on redelivery so consumers stay idempotent.
    async fn mark_token_notified(
        &self,
        token: &str,
        notified_at: &str,
    ) -> Result<bool, GladosError>;
}

/// Team and YPP-contact lookup.
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    async fn get_team(&self, team_id: &str) -> Result<Option<Team>, GladosError>;

    /// The team's designated safety contacts, in registration order.
    async fn contacts_for_team(&self, team_id: &str) -> Result<Vec<YppContact>, GladosError>;
}
