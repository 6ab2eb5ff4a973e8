// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The tool dispatcher: pure routing from tool name to owning executor.
//!
//! The route table is built once from the catalog at construction. Dispatch
//! never panics and never returns `Err` to the agent loop; every failure
//! mode, including an unknown tool name, becomes a structured error
//! tool-result the model can react to.

use std::collections::HashMap;
use std::sync::Arc;

use glados_core::ChatTransport;
use glados_core::types::{ToolDefinition, ToolOutcome};
use glados_safety::EscalationService;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::DomainStore;
use crate::executors;
use crate::namespace::{ToolNamespace, ToolSpec, catalog};

/// Per-message context every executor receives.
#[derive(Debug, Clone)]
pub struct CallContext {
    pub team_id: String,
    pub user_id: String,
    pub channel_id: Option<String>,
    /// The team's chat guild, when linked.
    pub guild_id: Option<String>,
}

/// Result of one tool execution, fed back to the model and into the audit
/// trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    pub content: Value,
    pub is_error: bool,
}

impl ToolResult {
    pub fn ok(content: Value) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: json!({"error": message.into()}),
            is_error: true,
        }
    }

    /// The audit-trace form of this result.
    pub fn outcome(&self) -> ToolOutcome {
        if self.is_error {
            let error = self
                .content
                .get("error")
                .and_then(Value::as_str)
                .unwrap_or("tool error")
                .to_string();
            ToolOutcome::Error { error }
        } else {
            ToolOutcome::Output {
                output: self.content.clone(),
            }
        }
    }

    /// The model-facing string form of this result.
    pub fn render(&self) -> String {
        self.content.to_string()
    }
}

/// Deserialize a tool's typed input exactly once, at the dispatch boundary.
pub(crate) fn decode<T: DeserializeOwned>(input: &Value) -> Result<T, ToolResult> {
    serde_json::from_value(input.clone())
        .map_err(|e| ToolResult::error(format!("invalid input: {e}")))
}

/// Routes tool calls to namespace executors.
pub struct Dispatcher {
    routes: HashMap<&'static str, ToolNamespace>,
    specs: Vec<ToolSpec>,
    domain: Arc<dyn DomainStore>,
    transport: Arc<dyn ChatTransport>,
    escalation: Arc<EscalationService>,
}

impl Dispatcher {
    pub fn new(
        domain: Arc<dyn DomainStore>,
        transport: Arc<dyn ChatTransport>,
        escalation: Arc<EscalationService>,
    ) -> Self {
        let specs = catalog();
        let routes = specs.iter().map(|s| (s.name, s.namespace)).collect();
        Self {
            routes,
            specs,
            domain,
            transport,
            escalation,
        }
    }

    /// Model-facing definitions of every registered tool.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.specs.iter().map(ToolSpec::to_definition).collect()
    }

    /// Executes one tool call.
    pub async fn dispatch(&self, ctx: &CallContext, name: &str, input: &Value) -> ToolResult {
        let Some(namespace) = self.routes.get(name) else {
            debug!(tool = name, "unknown tool requested");
            return ToolResult::error(format!("unknown tool: {name}"));
        };

        debug!(tool = name, namespace = %namespace, team_id = %ctx.team_id, "dispatching tool");
        match namespace {
            ToolNamespace::Parts => {
                executors::parts::execute(self.domain.as_ref(), ctx, name, input).await
            }
            ToolNamespace::Orders => {
                executors::orders::execute(self.domain.as_ref(), ctx, name, input).await
            }
            ToolNamespace::Bom => {
                executors::bom::execute(self.domain.as_ref(), ctx, name, input).await
            }
            ToolNamespace::Members => {
                executors::members::execute(self.domain.as_ref(), ctx, name, input).await
            }
            ToolNamespace::Events => {
                executors::events::execute(self.domain.as_ref(), ctx, name, input).await
            }
            ToolNamespace::Chat => {
                executors::chat::execute(self.transport.as_ref(), ctx, name, input).await
            }
            ToolNamespace::Safety => {
                executors::safety::execute(&self.escalation, ctx, name, input).await
            }
        }
    }
}
