// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat transport trait for the messaging platform boundary.

use async_trait::async_trait;

use crate::error::GladosError;
use crate::types::{ChannelInfo, MessageId, RichContent};

/// The pipeline's only required outbound capabilities on the chat platform:
/// send text (optionally with structured content) to a channel or DM target,
/// and resolve human-readable channel names to ids.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends a message to a channel id or user DM target.
    async fn send_message(
        &self,
        target: &str,
        text: &str,
        rich: Option<RichContent>,
    ) -> Result<MessageId, GladosError>;

    /// Lists the channels of a guild.
    async fn list_channels(&self, guild_id: &str) -> Result<Vec<ChannelInfo>, GladosError>;
}
