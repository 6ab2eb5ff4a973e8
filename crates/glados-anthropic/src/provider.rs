// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`ModelProvider`] implementation backed by [`AnthropicClient`].
//!
//! Maps the pipeline's provider-neutral request/response types onto the
//! Messages API wire format. Serialization lives here only; the pipeline
//! never sees wire types.

use async_trait::async_trait;

use glados_core::GladosError;
use glados_core::traits::ModelProvider;
use glados_core::types::{
    ChatRole, MessageBlock, ModelMessage, ModelRequest, ModelResponse, StopReason,
};

use crate::client::AnthropicClient;
use crate::types::{
    ApiContent, ApiContentBlock, ApiMessage, MessageRequest, ResponseContentBlock, ToolDefinition,
};

/// Anthropic-backed model provider.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: AnthropicClient,
}

impl AnthropicProvider {
    pub fn new(client: AnthropicClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ModelProvider for AnthropicProvider {
    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, GladosError> {
        let wire = to_wire_request(&request, self.client.default_model());
        let response = self.client.complete_message(&wire).await?;

        let content = response
            .content
            .into_iter()
            .map(|block| match block {
                ResponseContentBlock::Text { text } => MessageBlock::Text { text },
                ResponseContentBlock::ToolUse { id, name, input } => {
                    MessageBlock::ToolUse { id, name, input }
                }
            })
            .collect();

        Ok(ModelResponse {
            content,
            stop_reason: parse_stop_reason(response.stop_reason.as_deref()),
        })
    }
}

fn to_wire_request(request: &ModelRequest, model: &str) -> MessageRequest {
    let tools = if request.tools.is_empty() {
        None
    } else {
        Some(
            request
                .tools
                .iter()
                .map(|tool| ToolDefinition {
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    input_schema: tool.input_schema.clone(),
                })
                .collect(),
        )
    };

    MessageRequest {
        model: model.to_string(),
        messages: request.messages.iter().map(to_wire_message).collect(),
        system: if request.system.is_empty() {
            None
        } else {
            Some(request.system.clone())
        },
        max_tokens: request.max_tokens,
        tools,
    }
}

fn to_wire_message(message: &ModelMessage) -> ApiMessage {
    let role = match message.role {
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    };

    // A single text block collapses to the plain-string content form.
    if let [MessageBlock::Text { text }] = message.content.as_slice() {
        return ApiMessage {
            role: role.to_string(),
            content: ApiContent::Text(text.clone()),
        };
    }

    let blocks = message
        .content
        .iter()
        .map(|block| match block {
            MessageBlock::Text { text } => ApiContentBlock::Text { text: text.clone() },
            MessageBlock::ToolUse { id, name, input } => ApiContentBlock::ToolUse {
                id: id.clone(),
                name: name.clone(),
                input: input.clone(),
            },
            MessageBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => ApiContentBlock::ToolResult {
                tool_use_id: tool_use_id.clone(),
                content: content.clone(),
                is_error: if *is_error { Some(true) } else { None },
            },
        })
        .collect();

    ApiMessage {
        role: role.to_string(),
        content: ApiContent::Blocks(blocks),
    }
}

fn parse_stop_reason(raw: Option<&str>) -> StopReason {
    match raw {
        Some("end_turn") | None => StopReason::EndTurn,
        Some("tool_use") => StopReason::ToolUse,
        Some("max_tokens") => StopReason::MaxTokens,
        Some(other) => StopReason::Other(other.to_string()),
    }
}
