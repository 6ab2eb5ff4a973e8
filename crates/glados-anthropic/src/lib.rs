// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude model provider for GLaDOS.
//!
//! [`AnthropicClient`] speaks the Messages API wire format;
//! [`AnthropicProvider`] adapts it to the provider-neutral
//! [`glados_core::ModelProvider`] trait the pipeline consumes.

pub mod client;
pub mod provider;
pub mod types;

pub use client::AnthropicClient;
pub use provider::AnthropicProvider;
