// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Purchase order tools.

use serde::Deserialize;
use serde_json::Value;

use super::{from_domain, list_payload, unhandled};
use crate::dispatcher::{CallContext, ToolResult, decode};
use crate::domain::{DomainStore, OrderStatus};

#[derive(Deserialize)]
struct ListInput {
    #[serde(default)]
    status: Option<OrderStatus>,
}

#[derive(Deserialize)]
struct GetInput {
    order_id: String,
}

#[derive(Deserialize)]
struct SetStatusInput {
    order_id: String,
    status: OrderStatus,
}

pub async fn execute(
    domain: &dyn DomainStore,
    ctx: &CallContext,
    name: &str,
    input: &Value,
) -> ToolResult {
    match name {
        "orders_list" => {
            let args: ListInput = match decode(input) {
                Ok(args) => args,
                Err(result) => return result,
            };
            match domain.list_orders(&ctx.team_id, args.status).await {
                Ok(orders) => ToolResult::ok(list_payload(&orders)),
                Err(e) => ToolResult::error(e.to_string()),
            }
        }
        "orders_get" => {
            let args: GetInput = match decode(input) {
                Ok(args) => args,
                Err(result) => return result,
            };
            from_domain(domain.get_order(&ctx.team_id, &args.order_id).await)
        }
        "orders_set_status" => {
            let args: SetStatusInput = match decode(input) {
                Ok(args) => args,
                Err(result) => return result,
            };
            from_domain(
                domain
                    .set_order_status(&ctx.team_id, &args.order_id, args.status)
                    .await,
            )
        }
        other => unhandled(other),
    }
}
