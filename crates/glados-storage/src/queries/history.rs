// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation history operations, scoped to team + channel.

use std::str::FromStr;

use glados_core::GladosError;
use glados_core::types::{ConversationTurn, TurnRole};
use rusqlite::params;

use crate::database::Database;

/// Append one turn to the conversation.
pub async fn append_turn(
    db: &Database,
    team_id: &str,
    channel_id: &str,
    role: TurnRole,
    content: &str,
    created_at: &str,
) -> Result<(), GladosError> {
    let team_id = team_id.to_string();
    let channel_id = channel_id.to_string();
    let role = role.to_string();
    let content = content.to_string();
    let created_at = created_at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversation_turns (team_id, channel_id, role, content, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![team_id, channel_id, role, content, created_at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The most recent `limit` turns, returned oldest first.
///
/// Selects newest-first for the LIMIT, then reverses so callers can feed the
/// result straight into a model request.
pub async fn recent_turns(
    db: &Database,
    team_id: &str,
    channel_id: &str,
    limit: usize,
) -> Result<Vec<ConversationTurn>, GladosError> {
    let team_id = team_id.to_string();
    let channel_id = channel_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT role, content, created_at FROM conversation_turns
                 WHERE team_id = ?1 AND channel_id = ?2
                 ORDER BY id DESC LIMIT ?3",
            )?;
            let rows = stmt.query_map(params![team_id, channel_id, limit as i64], |row| {
                let role: String = row.get(0)?;
                Ok(ConversationTurn {
                    role: TurnRole::from_str(&role).map_err(|_| {
                        rusqlite::Error::FromSqlConversionFailure(
                            0,
                            rusqlite::types::Type::Text,
                            format!("unknown turn role: {role}").into(),
                        )
                    })?,
                    content: row.get(1)?,
                    created_at: row.get(2)?,
                })
            })?;
            let mut turns = Vec::new();
            for row in rows {
                turns.push(row?);
            }
            turns.reverse();
            Ok(turns)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
