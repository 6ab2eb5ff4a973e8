// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Member roster tools.

use serde_json::Value;

use super::{list_payload, unhandled};
use crate::dispatcher::{CallContext, ToolResult};
use crate::domain::DomainStore;

pub async fn execute(
    domain: &dyn DomainStore,
    ctx: &CallContext,
    name: &str,
    _input: &Value,
) -> ToolResult {
    match name {
        "members_list" => match domain.list_members(&ctx.team_id).await {
            Ok(members) => ToolResult::ok(list_payload(&members)),
            Err(e) => ToolResult::error(e.to_string()),
        },
        other => unhandled(other),
    }
}
