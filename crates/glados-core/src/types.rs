// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the GLaDOS pipeline.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a delivered chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

// --- Risk classification ---

/// Ordinal youth-protection severity of a single message.
///
/// Totally ordered: a higher level is strictly more severe. The policy table
/// in `glados-safety` is the only place behavior is derived from a level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Safe,
    FlagOnly,
    AlertMentor,
    Block,
}

impl RiskLevel {
    /// Clamp an untrusted numeric level into the valid range.
    ///
    /// Classifier implementations are responsible for calling this; the
    /// behavior policy is defined only for the four levels.
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            i64::MIN..=0 => RiskLevel::Safe,
            1 => RiskLevel::FlagOnly,
            2 => RiskLevel::AlertMentor,
            _ => RiskLevel::Block,
        }
    }
}

/// Result of pre-screening one message. Produced fresh per message, never
/// mutated, never persisted directly (its consequences are).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub risk_level: RiskLevel,
    /// Short string tags such as `distress` or `self_harm`.
    pub flags: Vec<String>,
    pub reasoning: Option<String>,
}

impl ClassificationResult {
    /// A SAFE result with no flags.
    pub fn safe() -> Self {
        Self {
            risk_level: RiskLevel::Safe,
            flags: Vec::new(),
            reasoning: None,
        }
    }
}

// --- Safety escalation ---

/// Severity attached to a safety alert.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    High,
    Medium,
    Low,
}

/// Review state of a safety alert. Transitions are monotonic forward only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Pending,
    Reviewed,
    Resolved,
}

impl AlertStatus {
    /// Whether moving from `self` to `next` is a legal forward transition.
    pub fn can_transition_to(self, next: AlertStatus) -> bool {
        next > self
    }
}

/// Durable compliance record of a concerning message.
///
/// Created by the escalation service; mutated only by a human-initiated
/// review/resolve action; never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyAlert {
    pub id: String,
    pub team_id: String,
    pub user_id: String,
    pub channel_id: Option<String>,
    pub alert_type: String,
    pub severity: AlertSeverity,
    pub trigger_reason: String,
    /// Verbatim flagged text.
    pub message_content: String,
    pub status: AlertStatus,
    pub created_at: String,
}

/// Single-use, time-boxed credential binding one alert to one designated contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertAckToken {
    pub token: String,
    pub alert_id: String,
    pub contact_user_id: String,
    pub expires_at: String,
    pub used_at: Option<String>,
    pub used_by: Option<String>,
    /// Set once the notification carrying this token has been delivered.
    /// Redelivered queue tasks check it to stay idempotent.
    pub notified_at: Option<String>,
    pub created_at: String,
}

// --- Teams and contacts ---

/// A registered team. Unresolvable teams short-circuit the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    /// Chat-platform guild linked to the team.
    pub guild_id: Option<String>,
}

/// A human designated to receive safety escalations for a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YppContact {
    pub team_id: String,
    pub user_id: String,
    /// DM-capable identity on the chat transport. `None` means the contact
    /// cannot be notified (the alert record still exists).
    pub dm_target: Option<String>,
}

/// Caller role for access-controlled read surfaces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Member,
    Mentor,
    Admin,
}

impl Role {
    /// Mentors and admins may read the audit log; reporting end-users may not.
    pub fn is_elevated(self) -> bool {
        matches!(self, Role::Mentor | Role::Admin)
    }
}

// --- Audit log ---

/// Outcome of one tool call: exactly one of output or error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolOutcome {
    Output { output: serde_json::Value },
    Error { error: String },
}

/// One completed tool invocation in an interaction's trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRecord {
    pub name: String,
    pub input: serde_json::Value,
    pub outcome: ToolOutcome,
}

/// Append-only record of one assistant interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub team_id: String,
    pub user_id: String,
    pub channel_id: Option<String>,
    pub user_message: String,
    pub agent_response: String,
    /// Ordered tool-call trace, empty when no tool ran.
    pub tool_calls: Vec<ToolCallRecord>,
    pub contains_safety_alert: bool,
    pub created_at: String,
}

// --- Conversation history ---

/// Role of a conversation turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One turn in a team+channel scoped conversation. History is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
    pub created_at: String,
}

// --- Task queue ---

/// A claimed entry from the durable task queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueTask {
    pub id: i64,
    pub queue_name: String,
    pub payload: String,
    pub attempts: i64,
    pub max_attempts: i64,
}

// --- Model provider boundary ---

/// A tool made available to the model: name, description, and a JSON Schema
/// for its input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

/// Role of a model-boundary message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A typed content block flowing across the model boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBlock {
    Text {
        text: String,
    },
    /// The model requests a tool invocation.
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
    /// Feedback for one invoked tool, sent back in a user-role message.
    ToolResult {
        tool_use_id: String,
        content: String,
        is_error: bool,
    },
}

/// One message in the ordered list submitted to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMessage {
    pub role: ChatRole,
    pub content: Vec<MessageBlock>,
}

impl ModelMessage {
    /// Convenience constructor for a plain-text message.
    pub fn text(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            content: vec![MessageBlock::Text { text: text.into() }],
        }
    }
}

/// A request to the model provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    pub system: String,
    pub messages: Vec<ModelMessage>,
    pub tools: Vec<ToolDefinition>,
    pub max_tokens: u32,
}

/// Why the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
    Other(String),
}

/// A complete model response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelResponse {
    pub content: Vec<MessageBlock>,
    pub stop_reason: StopReason,
}

impl ModelResponse {
    /// Concatenated text of all text blocks.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for block in &self.content {
            if let MessageBlock::Text { text } = block {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(text);
            }
        }
        out
    }

    /// All tool-use blocks, in response order.
    pub fn tool_uses(&self) -> Vec<(&str, &str, &serde_json::Value)> {
        self.content
            .iter()
            .filter_map(|block| match block {
                MessageBlock::ToolUse { id, name, input } => {
                    Some((id.as_str(), name.as_str(), input))
                }
                _ => None,
            })
            .collect()
    }
}

// --- Chat transport boundary ---

/// Optional structured payload accompanying an outbound chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichContent {
    pub title: String,
    pub body: String,
    /// Key/value fields rendered by the transport (severity, reason, links).
    pub fields: Vec<(String, String)>,
}

/// A channel visible on the chat platform, used to resolve human-readable
/// names to ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub id: String,
    pub name: String,
}
