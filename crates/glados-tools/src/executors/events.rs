// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event schedule tools.

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
        "events_list" => match domain.list_events(&ctx.team_id).await {
            Ok(events) => ToolResult::ok(list_payload(&events)),
            Err(e) => ToolResult::error(e.to_string()),
        },
        other => unhandled(other),
    }
}
