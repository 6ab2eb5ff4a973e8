// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only audit log operations.
//!
//! The tool-call trace is structured in memory and serialized to JSON only
//! here, at the storage boundary. No UPDATE or DELETE statements exist for
//! this table.

use glados_core::GladosError;
use glados_core::types::{AuditLogEntry, ToolCallRecord};
use rusqlite::params;

use crate::database::Database;

const ENTRY_COLUMNS: &str = "team_id, user_id, channel_id, user_message, agent_response, \
                             tool_calls, contains_safety_alert, created_at";

fn entry_from_row(row: &rusqlite::Row<'_>) -> Result<AuditLogEntry, rusqlite::Error> {
    let tool_calls_json: String = row.get(5)?;
    let tool_calls: Vec<ToolCallRecord> =
        serde_json::from_str(&tool_calls_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;
    Ok(AuditLogEntry {
        team_id: row.get(0)?,
        user_id: row.get(1)?,
        channel_id: row.get(2)?,
        user_message: row.get(3)?,
        agent_response: row.get(4)?,
        tool_calls,
        contains_safety_alert: row.get::<_, i64>(6)? != 0,
        created_at: row.get(7)?,
    })
}

/// Append one interaction record.
pub async fn append_entry(db: &Database, entry: &AuditLogEntry) -> Result<(), GladosError> {
    let entry = entry.clone();
    let tool_calls_json = serde_json::to_string(&entry.tool_calls)
        .map_err(|e| GladosError::Internal(format!("audit tool_calls encode: {e}")))?;
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO audit_log
                 (team_id, user_id, channel_id, user_message, agent_response,
                  tool_calls, contains_safety_alert, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    entry.team_id,
                    entry.user_id,
                    entry.channel_id,
                    entry.user_message,
                    entry.agent_response,
                    tool_calls_json,
                    entry.contains_safety_alert as i64,
                    entry.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// A team's entries, newest first.
pub async fn entries_for_team(
    db: &Database,
    team_id: &str,
    limit: usize,
) -> Result<Vec<AuditLogEntry>, GladosError> {
    let team_id = team_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ENTRY_COLUMNS} FROM audit_log
                 WHERE team_id = ?1 ORDER BY id DESC LIMIT ?2"
            ))?;
            let rows = stmt.query_map(params![team_id, limit as i64], entry_from_row)?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// One user's entries within a team, newest first.
pub async fn entries_for_user(
    db: &Database,
    team_id: &str,
    user_id: &str,
    limit: usize,
) -> Result<Vec<AuditLogEntry>, GladosError> {
    let team_id = team_id.to_string();
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ENTRY_COLUMNS} FROM audit_log
                 WHERE team_id = ?1 AND user_id = ?2 ORDER BY id DESC LIMIT ?3"
            ))?;
            let rows = stmt.query_map(params![team_id, user_id, limit as i64], entry_from_row)?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Entries that recorded a safety alert, newest first.
pub async fn safety_entries(
    db: &Database,
    team_id: &str,
    limit: usize,
) -> Result<Vec<AuditLogEntry>, GladosError> {
    let team_id = team_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ENTRY_COLUMNS} FROM audit_log
                 WHERE team_id = ?1 AND contains_safety_alert = 1
                 ORDER BY id DESC LIMIT ?2"
            ))?;
            let rows = stmt.query_map(params![team_id, limit as i64], entry_from_row)?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Number of entries recorded at or after `since` (RFC 3339).
pub async fn count_since(db: &Database, team_id: &str, since: &str) -> Result<u64, GladosError> {
    let team_id = team_id.to_string();
    let since = since.to_string();
    db.connection()
        .call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM audit_log WHERE team_id = ?1 AND created_at >= ?2",
                params![team_id, since],
                |row| row.get(0),
            )?;
            Ok(count as u64)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
