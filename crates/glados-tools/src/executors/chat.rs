// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat platform tools.

use glados_core::ChatTransport;
use serde::Deserialize;
use serde_json::{Value, json};

use super::unhandled;
use crate::dispatcher::{CallContext, ToolResult, decode};

#[derive(Deserialize)]
struct SendMessageInput {
    channel_id: String,
    text: String,
}

pub async fn execute(
    transport: &dyn ChatTransport,
    ctx: &CallContext,
    name: &str,
    input: &Value,
) -> ToolResult {
    match name {
        "chat_send_message" => {
            let args: SendMessageInput = match decode(input) {
                Ok(args) => args,
                Err(result) => return result,
            };
            match transport.send_message(&args.channel_id, &args.text, None).await {
                Ok(message_id) => ToolResult::ok(json!({"message_id": message_id.0})),
                Err(e) => ToolResult::error(e.to_string()),
            }
        }
        "chat_list_channels" => {
            let Some(guild_id) = ctx.guild_id.as_deref() else {
                return ToolResult::error("this team has no linked chat guild");
            };
            match transport.list_channels(guild_id).await {
                Ok(channels) => ToolResult::ok(super::list_payload(&channels)),
                Err(e) => ToolResult::error(e.to_string()),
            }
        }
        other => unhandled(other),
    }
}
