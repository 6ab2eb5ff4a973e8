// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The GLaDOS agent: safety gating, bounded model/tool loop, finalization.

pub mod pipeline;
pub mod prompt;

#[cfg(test)]
pub(crate) mod testing;

pub use pipeline::{
    APOLOGY_MESSAGE, AgentPipeline, InboundRequest, NOT_REGISTERED_MESSAGE, PipelineSettings,
    TOO_MANY_STEPS_MESSAGE,
};
