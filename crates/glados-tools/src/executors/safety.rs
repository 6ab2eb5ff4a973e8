// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Safety reporting tool: a user-initiated concern about a teammate.
//!
//! The tool result deliberately reveals nothing about who gets notified or
//! how many contacts exist; the model only learns that the report was filed.

use glados_core::types::AlertSeverity;
use glados_safety::{AlertRequest, EscalationService};
use serde::Deserialize;
use serde_json::{Value, json};

use super::unhandled;
use crate::dispatcher::{CallContext, ToolResult, decode};

#[derive(Deserialize)]
struct ReportConcernInput {
    #[serde(default)]
    subject_user_id: Option<String>,
    description: String,
}

pub async fn execute(
    escalation: &EscalationService,
    ctx: &CallContext,
    name: &str,
    input: &Value,
) -> ToolResult {
    match name {
        "safety_report_concern" => {
            let args: ReportConcernInput = match decode(input) {
                Ok(args) => args,
                Err(result) => return result,
            };
            let subject = args
                .subject_user_id
                .map(|id| format!(" (about {id})"))
                .unwrap_or_default();
            let request = AlertRequest {
                team_id: ctx.team_id.clone(),
                user_id: ctx.user_id.clone(),
                channel_id: ctx.channel_id.clone(),
                alert_type: "user_report".to_string(),
                severity: AlertSeverity::Medium,
                trigger_reason: format!("member-filed concern{subject}"),
                message_content: args.description,
            };
            match escalation.create_alert(request).await {
                Ok(_created) => ToolResult::ok(json!({
                    "status": "reported",
                    "note": "The team's designated adults have been notified."
                })),
                Err(e) => ToolResult::error(e.to_string()),
            }
        }
        other => unhandled(other),
    }
}
