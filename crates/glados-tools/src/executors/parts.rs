// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inventory tools.

use serde::Deserialize;
use serde_json::Value;

use super::{from_domain, list_payload, unhandled};
use crate::dispatcher::{CallContext, ToolResult, decode};
use crate::domain::DomainStore;

#[derive(Deserialize)]
struct ListInput {
    #[serde(default)]
    category: Option<String>,
}

#[derive(Deserialize)]
struct GetInput {
    part_id: String,
}

#[derive(Deserialize)]
struct AdjustInput {
    part_id: String,
    delta: i64,
}

pub async fn execute(
    domain: &dyn DomainStore,
    ctx: &CallContext,
    name: &str,
    input: &Value,
) -> ToolResult {
    match name {
        "parts_list" => {
            let args: ListInput = match decode(input) {
                Ok(args) => args,
                Err(result) => return result,
            };
            match domain.list_parts(&ctx.team_id, args.category.as_deref()).await {
                Ok(parts) => ToolResult::ok(list_payload(&parts)),
                Err(e) => ToolResult::error(e.to_string()),
            }
        }
        "parts_get" => {
            let args: GetInput = match decode(input) {
                Ok(args) => args,
                Err(result) => return result,
            };
            from_domain(domain.get_part(&ctx.team_id, &args.part_id).await)
        }
        "parts_adjust_quantity" => {
            let args: AdjustInput = match decode(input) {
                Ok(args) => args,
                Err(result) => return result,
            };
            from_domain(
                domain
                    .adjust_part_quantity(&ctx.team_id, &args.part_id, args.delta)
                    .await,
            )
        }
        other => unhandled(other),
    }
}
