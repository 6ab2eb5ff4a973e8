// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The agent orchestration pipeline.
//!
//! One inbound message flows GATING → (BLOCKED_TERMINAL | CONTEXT_LOADING) →
//! MODEL_CALL → (TOOL_EXECUTION → MODEL_CALL)* → FINALIZING. The pipeline is
//! infallible at its surface: every failure mode maps to a fixed user-facing
//! message, and side-channel writes (history, audit) never block the reply.

use std::sync::Arc;

use glados_config::GladosConfig;
use glados_core::types::{
    AlertSeverity, AuditLogEntry, ChatRole, MessageBlock, ModelMessage, ModelRequest,
    StopReason, Team, ToolCallRecord, TurnRole,
};
use glados_core::{
    AuditLog, ClassificationResult, Classifier, HistoryStore, ModelProvider, TeamDirectory,
};
use glados_safety::{AlertRequest, EscalationService, behavior_for};
use glados_tools::{CallContext, Dispatcher};
use tracing::{error, info, warn};

use crate::prompt::build_system_prompt;

/// Reply when the team id has no registration.
pub const NOT_REGISTERED_MESSAGE: &str =
    "This team isn't registered with me yet. Ask a mentor to set it up first.";

/// Reply when the model-call budget is exhausted. A defined terminal state,
/// not an error.
pub const TOO_MANY_STEPS_MESSAGE: &str =
    "I had to stop before finishing; that request took too many steps. \
Try breaking it into smaller pieces.";

/// Reply when the model provider fails mid-conversation.
pub const APOLOGY_MESSAGE: &str =
    "Something went wrong on my end while answering. Please try again in a moment.";

/// One inbound chat message.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub team_id: String,
    pub user_id: String,
    pub channel_id: String,
    pub display_name: String,
    pub text: String,
}

/// Pipeline tuning, extracted from config at wiring time.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub agent_name: String,
    pub history_window: usize,
    pub max_model_calls: usize,
    pub max_tokens: u32,
}

impl PipelineSettings {
    pub fn from_config(config: &GladosConfig) -> Self {
        Self {
            agent_name: config.agent.name.clone(),
            history_window: config.agent.history_window,
            max_model_calls: config.agent.max_model_calls,
            max_tokens: config.anthropic.max_tokens,
        }
    }
}

/// The safety-gated conversational pipeline.
pub struct AgentPipeline {
    classifier: Arc<dyn Classifier>,
    provider: Arc<dyn ModelProvider>,
    dispatcher: Arc<Dispatcher>,
    escalation: Arc<EscalationService>,
    history: Arc<dyn HistoryStore>,
    audit: Arc<dyn AuditLog>,
    teams: Arc<dyn TeamDirectory>,
    settings: PipelineSettings,
}

impl AgentPipeline {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        classifier: Arc<dyn Classifier>,
        provider: Arc<dyn ModelProvider>,
        dispatcher: Arc<Dispatcher>,
        escalation: Arc<EscalationService>,
        history: Arc<dyn HistoryStore>,
        audit: Arc<dyn AuditLog>,
        teams: Arc<dyn TeamDirectory>,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            classifier,
            provider,
            dispatcher,
            escalation,
            history,
            audit,
            teams,
            settings,
        }
    }

    /// Processes one message end to end and returns the reply text.
    pub async fn handle_message(&self, request: InboundRequest) -> String {
        // Mandatory gate before anything else, including team resolution.
        // Blocked content from an unregistered sender still leaves its
        // alert and its audit entry.
        let classification = self.classifier.classify(&request.text).await;
        let behavior = behavior_for(classification.risk_level);
        info!(
            team_id = %request.team_id,
            user_id = %request.user_id,
            risk_level = %classification.risk_level,
            "message gated"
        );

        if behavior.should_block {
            return self.blocked_terminal(&request, &classification).await;
        }

        let team = match self.teams.get_team(&request.team_id).await {
            Ok(Some(team)) => team,
            Ok(None) => {
                info!(team_id = %request.team_id, "message from unregistered team");
                return NOT_REGISTERED_MESSAGE.to_string();
            }
            Err(e) => {
                error!(error = %e, "team lookup failed");
                return APOLOGY_MESSAGE.to_string();
            }
        };

        let mut alert_raised = false;
        if behavior.should_alert_mentor {
            alert_raised = self
                .raise_alert(&request, AlertSeverity::Medium, &classification)
                .await;
        }

        let (response_text, records, provider_failed) =
            self.run_agent_loop(&request, &team).await;

        self.record_history(&request, &response_text).await;
        if behavior.should_log || !records.is_empty() || provider_failed {
            self.write_audit(&request, &response_text, records, alert_raised)
                .await;
        }
        response_text
    }

    /// BLOCK path: high-severity alert, audit entry, fixed neutral reply.
    /// The model is never consulted.
    async fn blocked_terminal(
        &self,
        request: &InboundRequest,
        classification: &ClassificationResult,
    ) -> String {
        self.raise_alert(request, AlertSeverity::High, classification)
            .await;
        let response = behavior_for(classification.risk_level)
            .neutral_response
            .unwrap_or(glados_safety::NEUTRAL_RESPONSE)
            .to_string();
        self.write_audit(request, &response, Vec::new(), true).await;
        response
    }

    /// The bounded model/tool loop. Returns the reply text, the tool trace,
    /// and whether the provider failed.
    async fn run_agent_loop(
        &self,
        request: &InboundRequest,
        team: &Team,
    ) -> (String, Vec<ToolCallRecord>, bool) {
        let mut messages = self.load_context(request).await;
        let system = build_system_prompt(&self.settings.agent_name, &team.name, &request.display_name);
        let tools = self.dispatcher.tool_definitions();
        let ctx = CallContext {
            team_id: request.team_id.clone(),
            user_id: request.user_id.clone(),
            channel_id: Some(request.channel_id.clone()),
            guild_id: team.guild_id.clone(),
        };

        let mut records = Vec::new();
        for _ in 0..self.settings.max_model_calls {
            let model_request = ModelRequest {
                system: system.clone(),
                messages: messages.clone(),
                tools: tools.clone(),
                max_tokens: self.settings.max_tokens,
            };
            let response = match self.provider.complete(model_request).await {
                Ok(response) => response,
                Err(e) => {
                    error!(error = %e, "model provider failed mid-loop");
                    return (APOLOGY_MESSAGE.to_string(), records, true);
                }
            };

            let tool_uses: Vec<(String, String, serde_json::Value)> = response
                .tool_uses()
                .into_iter()
                .map(|(id, name, input)| (id.to_string(), name.to_string(), input.clone()))
                .collect();
            if response.stop_reason != StopReason::ToolUse || tool_uses.is_empty() {
                return (response.text(), records, false);
            }

            messages.push(ModelMessage {
                role: ChatRole::Assistant,
                content: response.content.clone(),
            });

            // Every requested tool runs; a failing call is isolated into an
            // error tool-result rather than aborting its siblings.
            let mut result_blocks = Vec::with_capacity(tool_uses.len());
            for (tool_use_id, name, input) in tool_uses {
                let result = self.dispatcher.dispatch(&ctx, &name, &input).await;
                records.push(ToolCallRecord {
                    name,
                    input,
                    outcome: result.outcome(),
                });
                result_blocks.push(MessageBlock::ToolResult {
                    tool_use_id,
                    content: result.render(),
                    is_error: result.is_error,
                });
            }
            messages.push(ModelMessage {
                role: ChatRole::User,
                content: result_blocks,
            });
        }

        info!(
            team_id = %request.team_id,
            budget = self.settings.max_model_calls,
            "model call budget exhausted"
        );
        (TOO_MANY_STEPS_MESSAGE.to_string(), records, false)
    }

    async fn load_context(&self, request: &InboundRequest) -> Vec<ModelMessage> {
        let history = match self
            .history
            .recent_turns(
                &request.team_id,
                &request.channel_id,
                self.settings.history_window,
            )
            .await
        {
            Ok(turns) => turns,
            Err(e) => {
                warn!(error = %e, "history load failed, continuing without context");
                Vec::new()
            }
        };

        let mut messages: Vec<ModelMessage> = history
            .into_iter()
            .map(|turn| {
                let role = match turn.role {
                    TurnRole::User => ChatRole::User,
                    TurnRole::Assistant => ChatRole::Assistant,
                };
                ModelMessage::text(role, turn.content)
            })
            .collect();
        messages.push(ModelMessage::text(ChatRole::User, request.text.clone()));
        messages
    }

    /// Raises an alert for the flagged message. Returns whether it was
    /// recorded; failures are logged, never surfaced to the user.
    async fn raise_alert(
        &self,
        request: &InboundRequest,
        severity: AlertSeverity,
        classification: &ClassificationResult,
    ) -> bool {
        let trigger_reason = if classification.flags.is_empty() {
            classification
                .reasoning
                .clone()
                .unwrap_or_else(|| "unspecified".to_string())
        } else {
            classification.flags.join(",")
        };
        let alert_request = AlertRequest {
            team_id: request.team_id.clone(),
            user_id: request.user_id.clone(),
            channel_id: Some(request.channel_id.clone()),
            alert_type: "message_screening".to_string(),
            severity,
            trigger_reason,
            message_content: request.text.clone(),
        };
        match self.escalation.create_alert(alert_request).await {
            Ok(created) => {
                info!(alert_id = %created.alert_id, severity = %severity, "alert raised");
                true
            }
            Err(e) => {
                error!(error = %e, "alert creation failed");
                false
            }
        }
    }

    async fn record_history(&self, request: &InboundRequest, response: &str) {
        if let Err(e) = self
            .history
            .append_turn(
                &request.team_id,
                &request.channel_id,
                TurnRole::User,
                &request.text,
            )
            .await
        {
            warn!(error = %e, "user turn append failed");
        }
        if let Err(e) = self
            .history
            .append_turn(
                &request.team_id,
                &request.channel_id,
                TurnRole::Assistant,
                response,
            )
            .await
        {
            warn!(error = %e, "assistant turn append failed");
        }
    }

    async fn write_audit(
        &self,
        request: &InboundRequest,
        response: &str,
        tool_calls: Vec<ToolCallRecord>,
        contains_safety_alert: bool,
    ) {
        let entry = AuditLogEntry {
            team_id: request.team_id.clone(),
            user_id: request.user_id.clone(),
            channel_id: Some(request.channel_id.clone()),
            user_message: request.text.clone(),
            agent_response: response.to_string(),
            tool_calls,
            contains_safety_alert,
            created_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        };
        if let Err(e) = self.audit.append(&entry).await {
            warn!(error = %e, "audit append failed");
        }
    }
}
