// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model provider trait for LLM inference backends.

use async_trait::async_trait;

use crate::error::GladosError;
use crate::types::{ModelRequest, ModelResponse};

/// Adapter for language model inference.
///
/// The pipeline only needs complete responses: the bounded tool loop inspects
/// the stop reason and tool-use blocks of each finished turn before deciding
/// whether to call again.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: ModelRequest) -> Result<ModelResponse, GladosError>;
}
