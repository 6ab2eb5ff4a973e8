// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool namespaces and the tool catalog.
//!
//! Every tool is tagged with the namespace that owns it. Routing uses this
//! tag through a table built at registration; nothing anywhere matches on
//! name prefixes.

use glados_core::types::ToolDefinition;
use serde_json::json;
use strum::Display;

/// Owning namespace of a tool. One executor per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ToolNamespace {
    Parts,
    Orders,
    Bom,
    Members,
    Events,
    Chat,
    Safety,
}

/// One entry in the tool catalog.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub namespace: ToolNamespace,
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: serde_json::Value,
}

impl ToolSpec {
    /// The model-facing form of this spec.
    pub fn to_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: self.input_schema.clone(),
        }
    }
}

fn no_args() -> serde_json::Value {
    json!({"type": "object", "properties": {}, "required": []})
}

/// The full tool catalog, all namespaces concatenated.
pub fn catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            namespace: ToolNamespace::Parts,
            name: "parts_list",
            description: "List the team's parts inventory, optionally filtered by category.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": {"type": "string", "description": "Category filter, e.g. 'motors'"}
                },
                "required": []
            }),
        },
        ToolSpec {
            namespace: ToolNamespace::Parts,
            name: "parts_get",
            description: "Get one inventory part by id.",
            input_schema: json!({
                "type": "object",
                "properties": {"part_id": {"type": "string"}},
                "required": ["part_id"]
            }),
        },
        ToolSpec {
            namespace: ToolNamespace::Parts,
            name: "parts_adjust_quantity",
            description: "Adjust a part's stocked quantity by a positive or negative delta.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "part_id": {"type": "string"},
                    "delta": {"type": "integer", "description": "Signed quantity change"}
                },
                "required": ["part_id", "delta"]
            }),
        },
        ToolSpec {
            namespace: ToolNamespace::Orders,
            name: "orders_list",
            description: "List the team's purchase orders, optionally filtered by status.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "status": {
                        "type": "string",
                        "enum": ["pending", "submitted", "received", "cancelled"]
                    }
                },
                "required": []
            }),
        },
        ToolSpec {
            namespace: ToolNamespace::Orders,
            name: "orders_get",
            description: "Get one purchase order by id.",
            input_schema: json!({
                "type": "object",
                "properties": {"order_id": {"type": "string"}},
                "required": ["order_id"]
            }),
        },
        ToolSpec {
            namespace: ToolNamespace::Orders,
            name: "orders_set_status",
            description: "Set a purchase order's status.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "order_id": {"type": "string"},
                    "status": {
                        "type": "string",
                        "enum": ["pending", "submitted", "received", "cancelled"]
                    }
                },
                "required": ["order_id", "status"]
            }),
        },
        ToolSpec {
            namespace: ToolNamespace::Bom,
            name: "bom_list",
            description: "List the robot's bill of materials.",
            input_schema: no_args(),
        },
        ToolSpec {
            namespace: ToolNamespace::Bom,
            name: "bom_add_item",
            description: "Add an item to the bill of materials.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "part_name": {"type": "string"},
                    "quantity": {"type": "integer", "minimum": 1},
                    "subsystem": {"type": "string", "description": "e.g. 'drivetrain'"}
                },
                "required": ["part_name", "quantity"]
            }),
        },
        ToolSpec {
            namespace: ToolNamespace::Members,
            name: "members_list",
            description: "List the team's registered members and their roles.",
            input_schema: no_args(),
        },
        ToolSpec {
            namespace: ToolNamespace::Events,
            name: "events_list",
            description: "List the team's upcoming events and competitions.",
            input_schema: no_args(),
        },
        ToolSpec {
            namespace: ToolNamespace::Chat,
            name: "chat_send_message",
            description: "Send a message to a team chat channel.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "channel_id": {"type": "string"},
                    "text": {"type": "string"}
                },
                "required": ["channel_id", "text"]
            }),
        },
        ToolSpec {
            namespace: ToolNamespace::Chat,
            name: "chat_list_channels",
            description: "List the chat channels of the team's guild.",
            input_schema: no_args(),
        },
        ToolSpec {
            namespace: ToolNamespace::Safety,
            name: "safety_report_concern",
            description: "Confidentially report a safety or wellbeing concern \
                          about a teammate to the team's designated adults.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "subject_user_id": {"type": "string", "description": "Who the concern is about, if known"},
                    "description": {"type": "string"}
                },
                "required": ["description"]
            }),
        },
    ]
}
