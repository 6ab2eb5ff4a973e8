// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Namespace executors. Each module owns the tools of one namespace and is
//! the only place that namespace's side effects happen.

pub mod bom;
pub mod chat;
pub mod events;
pub mod members;
pub mod orders;
pub mod parts;
pub mod safety;

use serde::Serialize;
use serde_json::json;

use crate::dispatcher::ToolResult;
use crate::domain::DomainError;

/// Standard conversion of a domain answer into a tool result.
pub(crate) fn from_domain<T: Serialize>(result: Result<T, DomainError>) -> ToolResult {
    match result {
        Ok(value) => match serde_json::to_value(&value) {
            Ok(content) => ToolResult::ok(content),
            Err(e) => ToolResult::error(format!("encode failure: {e}")),
        },
        Err(e) => ToolResult::error(e.to_string()),
    }
}

/// A tool name that routed to this namespace but is not one of its tools.
/// Unreachable while the catalog and executors agree; reported, not panicked.
pub(crate) fn unhandled(name: &str) -> ToolResult {
    ToolResult::error(format!("unknown tool: {name}"))
}

pub(crate) fn list_payload<T: Serialize>(items: &[T]) -> serde_json::Value {
    json!({"count": items.len(), "items": items})
}
