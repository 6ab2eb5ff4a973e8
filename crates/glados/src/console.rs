// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Console chat transport and the interactive message loop.

use std::sync::Arc;

use async_trait::async_trait;
use glados_agent::{AgentPipeline, InboundRequest};
use glados_core::types::{ChannelInfo, MessageId, RichContent};
use glados_core::{ChatTransport, GladosError};
use glados_safety::{AckError, EscalationService};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Chat transport that renders everything to the local terminal. Alert DMs
/// and channel messages alike are printed with their target prefixed.
pub struct ConsoleTransport;

#[async_trait]
impl ChatTransport for ConsoleTransport {
    async fn send_message(
        &self,
        target: &str,
        text: &str,
        rich: Option<RichContent>,
    ) -> Result<MessageId, GladosError> {
        println!("[-> {target}] {text}");
        if let Some(rich) = rich {
            println!("    {}", rich.title);
            for (key, value) in &rich.fields {
                println!("    {key}: {value}");
            }
            for line in rich.body.lines() {
                println!("    {line}");
            }
        }
        Ok(MessageId(format!("console-{target}")))
    }

    async fn list_channels(&self, _guild_id: &str) -> Result<Vec<ChannelInfo>, GladosError> {
        Ok(vec![ChannelInfo {
            id: "console".into(),
            name: "console".into(),
        }])
    }
}

/// The identity a console session speaks as.
pub struct ConsoleIdentity {
    pub team_id: String,
    pub user_id: String,
    pub channel_id: String,
    pub display_name: String,
}

/// An `ack <token>` line is an in-chat acknowledgment reply, not a message
/// for the pipeline. Returns the token when the line is one.
fn parse_ack_reply(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("ack ")?;
    let token = rest.trim();
    (!token.is_empty() && !token.contains(' ')).then_some(token)
}

/// Reads lines from stdin and runs each through the pipeline until EOF.
/// Alert notification replies (`ack <token>`) are consumed here with the
/// same acknowledgment call the `glados ack` subcommand uses.
pub async fn run_loop(
    pipeline: &AgentPipeline,
    escalation: &Arc<EscalationService>,
    identity: &ConsoleIdentity,
) -> Result<(), GladosError> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut lines = stdin.lines();

    println!(
        "Chatting as {} on team {} (channel {}). Ctrl-D to exit.",
        identity.display_name, identity.team_id, identity.channel_id
    );
    loop {
        stdout.write_all(b"you> ").await.map_err(io_err)?;
        stdout.flush().await.map_err(io_err)?;

        let Some(line) = lines.next_line().await.map_err(io_err)? else {
            println!();
            return Ok(());
        };
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        if let Some(token) = parse_ack_reply(text) {
            match escalation.acknowledge(token, &identity.user_id).await {
                Ok(receipt) => println!(
                    "glados> Acknowledged alert {} for team {}.",
                    receipt.alert_id, receipt.team_id
                ),
                Err(AckError::Storage(e)) => return Err(e),
                Err(e) => println!("glados> Could not acknowledge: {e}"),
            }
            continue;
        }

        let reply = pipeline
            .handle_message(InboundRequest {
                team_id: identity.team_id.clone(),
                user_id: identity.user_id.clone(),
                channel_id: identity.channel_id.clone(),
                display_name: identity.display_name.clone(),
                text: text.to_string(),
            })
            .await;
        println!("glados> {reply}");
    }
}

fn io_err(e: std::io::Error) -> GladosError {
    GladosError::Transport {
        message: "console I/O failed".into(),
        source: Some(Box::new(e)),
    }
}
