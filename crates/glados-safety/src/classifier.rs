// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model-backed risk classifier.
//!
//! Every inbound message is screened by a small model against a fixed rubric
//! before the agent sees it. The classifier is infallible by contract: any
//! provider or parse failure degrades to FLAG_ONLY with a
//! `classification_error` flag. Failing to SAFE would hide risk; failing to
//! BLOCK would turn transient provider faults into denial of service.

use std::sync::Arc;

use async_trait::async_trait;
use glados_core::types::{ChatRole, ModelMessage, ModelRequest, ToolDefinition};
use glados_core::{ClassificationResult, Classifier, ModelProvider, RiskLevel};
use serde::Deserialize;
use tracing::{debug, warn};

const RUBRIC_PROMPT: &str = "You are a youth-protection screening system for a robotics team chat. \
Rate the following message from a student on this rubric:\n\
0 = SAFE: ordinary conversation, technical questions, team logistics.\n\
1 = FLAG_ONLY: mild concern worth a quiet record. Examples: frustration, \
discouragement, minor interpersonal conflict.\n\
2 = ALERT_MENTOR: a mentor should look at this soon. Examples: sustained \
distress, bullying, descriptions of unsafe behavior.\n\
3 = BLOCK: the assistant must not engage. Examples: self-harm or suicidal \
ideation, requests for dangerous instructions, sexual content, grooming \
patterns.\n\n\
Respond with ONLY a JSON object, no prose:\n\
{\"risk_level\": <0-3>, \"flags\": [\"short_tag\", ...], \"reasoning\": \"one sentence\"}";

const CLASSIFIER_MAX_TOKENS: u32 = 256;

/// Flag attached when classification itself failed and the result is the
/// fail-open default.
pub const CLASSIFICATION_ERROR_FLAG: &str = "classification_error";

#[derive(Deserialize)]
struct RubricVerdict {
    risk_level: i64,
    #[serde(default)]
    flags: Vec<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// [`Classifier`] backed by a model provider.
pub struct LlmClassifier {
    provider: Arc<dyn ModelProvider>,
}

impl LlmClassifier {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self { provider }
    }

    fn fail_open(reason: &str) -> ClassificationResult {
        warn!(reason, "classification failed, defaulting to flag_only");
        ClassificationResult {
            risk_level: RiskLevel::FlagOnly,
            flags: vec![CLASSIFICATION_ERROR_FLAG.to_string()],
            reasoning: Some(format!("classifier unavailable: {reason}")),
        }
    }

    fn parse_verdict(text: &str) -> Option<ClassificationResult> {
        let verdict: RubricVerdict = serde_json::from_str(strip_code_fence(text)).ok()?;
        Some(ClassificationResult {
            risk_level: RiskLevel::from_raw(verdict.risk_level),
            flags: verdict.flags,
            reasoning: verdict.reasoning,
        })
    }
}

/// Models sometimes wrap JSON in a markdown fence despite instructions.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[async_trait]
impl Classifier for LlmClassifier {
    async fn classify(&self, message: &str) -> ClassificationResult {
        let request = ModelRequest {
            system: RUBRIC_PROMPT.to_string(),
            messages: vec![ModelMessage::text(ChatRole::User, message)],
            tools: Vec::<ToolDefinition>::new(),
            max_tokens: CLASSIFIER_MAX_TOKENS,
        };

        let response = match self.provider.complete(request).await {
            Ok(response) => response,
            Err(e) => return Self::fail_open(&e.to_string()),
        };

        let text = response.text();
        match Self::parse_verdict(&text) {
            Some(result) => {
                debug!(
                    risk_level = %result.risk_level,
                    flags = ?result.flags,
                    "message classified"
                );
                result
            }
            None => Self::fail_open("unparseable verdict"),
        }
    }
}
