// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Safety alert and acknowledgment token operations.
//!
//! Alerts are compliance records: inserted once, status-advanced by humans,
//! never deleted. Token consumption and notification marking are conditional
//! single-row UPDATEs so concurrent callers race safely inside SQLite's
//! write serialization.

use std::str::FromStr;

use glados_core::GladosError;
use glados_core::types::{AlertAckToken, AlertSeverity, AlertStatus, SafetyAlert};
use rusqlite::params;

use crate::database::Database;

fn alert_from_row(row: &rusqlite::Row<'_>) -> Result<SafetyAlert, rusqlite::Error> {
    let severity: String = row.get(5)?;
    let status: String = row.get(8)?;
    Ok(SafetyAlert {
        id: row.get(0)?,
        team_id: row.get(1)?,
        user_id: row.get(2)?,
        channel_id: row.get(3)?,
        alert_type: row.get(4)?,
        severity: AlertSeverity::from_str(&severity).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                rusqlite::types::Type::Text,
                format!("unknown severity: {severity}").into(),
            )
        })?,
        trigger_reason: row.get(6)?,
        message_content: row.get(7)?,
        status: AlertStatus::from_str(&status).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                8,
                rusqlite::types::Type::Text,
                format!("unknown status: {status}").into(),
            )
        })?,
        created_at: row.get(9)?,
    })
}

const ALERT_COLUMNS: &str = "id, team_id, user_id, channel_id, alert_type, severity, \
                             trigger_reason, message_content, status, created_at";

/// Insert a new alert record.
pub async fn insert_alert(db: &Database, alert: &SafetyAlert) -> Result<(), GladosError> {
    let alert = alert.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO safety_alerts
                 (id, team_id, user_id, channel_id, alert_type, severity,
                  trigger_reason, message_content, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    alert.id,
                    alert.team_id,
                    alert.user_id,
                    alert.channel_id,
                    alert.alert_type,
                    alert.severity.to_string(),
                    alert.trigger_reason,
                    alert.message_content,
                    alert.status.to_string(),
                    alert.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch one alert by id.
pub async fn get_alert(db: &Database, alert_id: &str) -> Result<Option<SafetyAlert>, GladosError> {
    let alert_id = alert_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {ALERT_COLUMNS} FROM safety_alerts WHERE id = ?1"
            ))?;
            let mut rows = stmt.query_map(params![alert_id], alert_from_row)?;
            match rows.next() {
                Some(row) => Ok(Some(row?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Write a new alert status. Transition legality is the caller's concern.
pub async fn set_alert_status(
    db: &Database,
    alert_id: &str,
    status: AlertStatus,
) -> Result<(), GladosError> {
    let alert_id = alert_id.to_string();
    let status = status.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE safety_alerts SET status = ?2 WHERE id = ?1",
                params![alert_id, status],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert a freshly minted acknowledgment token.
pub async fn insert_ack_token(db: &Database, token: &AlertAckToken) -> Result<(), GladosError> {
    let token = token.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO alert_ack_tokens
                 (token, alert_id, contact_user_id, expires_at, used_at, used_by,
                  notified_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    token.token,
                    token.alert_id,
                    token.contact_user_id,
                    token.expires_at,
                    token.used_at,
                    token.used_by,
                    token.notified_at,
                    token.created_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Look up a token by its value.
pub async fn find_ack_token(
    db: &Database,
    token: &str,
) -> Result<Option<AlertAckToken>, GladosError> {
    let token = token.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT token, alert_id, contact_user_id, expires_at, used_at, used_by,
                        notified_at, created_at
                 FROM alert_ack_tokens WHERE token = ?1",
            )?;
            let mut rows = stmt.query_map(params![token], |row| {
                Ok(AlertAckToken {
                    token: row.get(0)?,
                    alert_id: row.get(1)?,
                    contact_user_id: row.get(2)?,
                    expires_at: row.get(3)?,
                    used_at: row.get(4)?,
                    used_by: row.get(5)?,
                    notified_at: row.get(6)?,
                    created_at: row.get(7)?,
                })
            })?;
            match rows.next() {
                Some(row) => Ok(Some(row?)),
                None => Ok(None),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Atomically consume a token iff it is currently unused.
///
/// Returns `true` for the single caller whose UPDATE matched; a concurrent
/// second caller matches zero rows and gets `false`.
pub async fn consume_ack_token(
    db: &Database,
    token: &str,
    used_by: &str,
    used_at: &str,
) -> Result<bool, GladosError> {
    let token = token.to_string();
    let used_by = used_by.to_string();
    let used_at = used_at.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE alert_ack_tokens SET used_at = ?2, used_by = ?3
                 WHERE token = ?1 AND used_at IS NULL",
                params![token, used_at, used_by],
            )?;
            Ok(changed == 1)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mark the token's notification as delivered iff not already marked.
///
/// The `false` return on redelivery is what keeps the notification consumer
/// idempotent under the queue's at-least-once contract.
pub async fn mark_token_notified(
    db: &Database,
    token: &str,
    notified_at: &str,
) -> Result<bool, GladosError> {
    let token = token.to_string();
    let notified_at = notified_at.to_string();
    db.connection()
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE alert_ack_tokens SET notified_at = ?2
                 WHERE token = ?1 AND notified_at IS NULL",
                params![token, notified_at],
            )?;
            Ok(changed == 1)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
