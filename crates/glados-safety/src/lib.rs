// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Youth-protection safety layer: classification, policy, escalation, and
//! notification delivery.
//!
//! The order of authority is fixed: the classifier produces a risk level, the
//! pure policy table maps it to behavior, and the escalation service makes
//! the consequences durable. Nothing downstream re-interprets risk.

pub mod classifier;
pub mod escalation;
pub mod notify;
pub mod policy;

#[cfg(test)]
pub(crate) mod testing;

pub use classifier::{CLASSIFICATION_ERROR_FLAG, LlmClassifier};
pub use escalation::{
    AckError, AckReceipt, AlertRequest, CreatedAlert, EscalationService, NotificationPayload,
};
pub use notify::NotificationWorker;
pub use policy::{NEUTRAL_RESPONSE, RiskBehavior, behavior_for};

pub(crate) fn now_string() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
