// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bill-of-materials tools.

use serde::Deserialize;
use serde_json::Value;

use super::{from_domain, list_payload, unhandled};
use crate::dispatcher::{CallContext, ToolResult, decode};
use crate::domain::DomainStore;

#[derive(Deserialize)]
struct AddItemInput {
    part_name: String,
    quantity: i64,
    #[serde(default)]
    subsystem: Option<String>,
}

pub async fn execute(
    domain: &dyn DomainStore,
    ctx: &CallContext,
    name: &str,
    input: &Value,
) -> ToolResult {
    match name {
        "bom_list" => match domain.list_bom(&ctx.team_id).await {
            Ok(items) => ToolResult::ok(list_payload(&items)),
            Err(e) => ToolResult::error(e.to_string()),
        },
        "bom_add_item" => {
            let args: AddItemInput = match decode(input) {
                Ok(args) => args,
                Err(result) => return result,
            };
            from_domain(
                domain
                    .add_bom_item(
                        &ctx.team_id,
                        &args.part_name,
                        args.quantity,
                        args.subsystem.as_deref(),
                    )
                    .await,
            )
        }
        other => unhandled(other),
    }
}
