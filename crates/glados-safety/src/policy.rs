// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The risk behavior policy: the single mapping from risk level to pipeline
//! behavior.
//!
//! This table is the only place behavior is derived from a classification.
//! It is pure and total; callers never branch on `RiskLevel` directly.

use glados_core::RiskLevel;

/// Sent verbatim when a message is blocked. Deliberately does not name the
/// trigger, repeat the flagged content, or claim counseling competence.
pub const NEUTRAL_RESPONSE: &str = "I'm not able to help with that here. \
If something is weighing on you, please talk to your mentor or another adult you trust.";

/// What the pipeline does for one classified message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskBehavior {
    /// Whether the message proceeds to the model.
    pub should_proceed: bool,
    /// Whether the interaction is flagged in the audit record.
    pub should_log: bool,
    /// Whether a mentor alert is raised before the model runs.
    pub should_alert_mentor: bool,
    /// Whether the message is blocked outright.
    pub should_block: bool,
    /// The fixed reply for blocked messages. Present iff `should_block`.
    pub neutral_response: Option<&'static str>,
}

/// Behavior for a risk level. Pure lookup, no I/O.
pub fn behavior_for(level: RiskLevel) -> RiskBehavior {
    match level {
        RiskLevel::Safe => RiskBehavior {
            should_proceed: true,
            should_log: false,
            should_alert_mentor: false,
            should_block: false,
            neutral_response: None,
        },
        RiskLevel::FlagOnly => RiskBehavior {
            should_proceed: true,
            should_log: true,
            should_alert_mentor: false,
            should_block: false,
            neutral_response: None,
        },
        RiskLevel::AlertMentor => RiskBehavior {
            should_proceed: true,
            should_log: true,
            should_alert_mentor: true,
            should_block: false,
            neutral_response: None,
        },
        RiskLevel::Block => RiskBehavior {
            should_proceed: false,
            should_log: true,
            should_alert_mentor: true,
            should_block: true,
            neutral_response: Some(NEUTRAL_RESPONSE),
        },
    }
}
