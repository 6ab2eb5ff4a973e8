// SPDX-FileCopyrightText: 2026 GLaDOS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GLaDOS binary entry point: configuration, wiring, console runtime, and
//! the alert acknowledgment subcommand.

mod console;
mod domain;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use glados_agent::{AgentPipeline, PipelineSettings};
use glados_anthropic::{AnthropicClient, AnthropicProvider};
use glados_config::GladosConfig;
use glados_core::GladosError;
use glados_safety::{AckError, EscalationService, LlmClassifier, NotificationWorker};
use glados_storage::{Database, SqliteStorage, queries};
use glados_tools::Dispatcher;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::console::{ConsoleIdentity, ConsoleTransport};
use crate::domain::LocalDomain;

/// GLaDOS - safety-gated assistant for robotics team chat.
#[derive(Parser, Debug)]
#[command(name = "glados", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive console session against the pipeline.
    Run(RunArgs),
    /// Acknowledge a safety alert with a token from a notification.
    Ack(AckArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Team to chat as.
    #[arg(long, default_value = "team-1")]
    team: String,
    /// User id to chat as.
    #[arg(long, default_value = "console-user")]
    user: String,
    /// Channel id of the session.
    #[arg(long, default_value = "console")]
    channel: String,
    /// Display name shown to the assistant.
    #[arg(long, default_value = "Operator")]
    name: String,
}

#[derive(Args, Debug)]
struct AckArgs {
    /// The acknowledgment token from the alert notification.
    token: String,
    /// Who is acknowledging.
    #[arg(long = "as", default_value = "console-user")]
    acked_by: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match glados_config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("glados: configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.agent.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Some(Commands::Run(args)) => run(&config, args).await,
        Some(Commands::Ack(args)) => ack(&config, args).await,
        None => run(
            &config,
            RunArgs {
                team: "team-1".into(),
                user: "console-user".into(),
                channel: "console".into(),
                name: "Operator".into(),
            },
        )
        .await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("glados: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn open_storage(config: &GladosConfig) -> Result<Arc<SqliteStorage>, GladosError> {
    let db = Database::open_with_options(&config.storage.database_path, config.storage.wal_mode)
        .await?;
    Ok(Arc::new(SqliteStorage::new(db)))
}

fn escalation_for(
    config: &GladosConfig,
    storage: &Arc<SqliteStorage>,
) -> Arc<EscalationService> {
    Arc::new(EscalationService::new(
        storage.clone(),
        storage.clone(),
        storage.clone(),
        config.safety.notification_queue.clone(),
        config.safety.ack_token_ttl_days,
    ))
}

async fn run(config: &GladosConfig, args: RunArgs) -> Result<(), GladosError> {
    let storage = open_storage(config).await?;
    ensure_local_team(&storage, &args).await?;

    let api_key = config
        .anthropic
        .api_key
        .clone()
        .ok_or_else(|| GladosError::Config("anthropic.api_key is not set".into()))?;
    let provider = Arc::new(AnthropicProvider::new(AnthropicClient::new(
        api_key.clone(),
        config.anthropic.api_version.clone(),
        config.anthropic.default_model.clone(),
    )?));
    let classifier_provider = Arc::new(AnthropicProvider::new(AnthropicClient::new(
        api_key,
        config.anthropic.api_version.clone(),
        config.anthropic.classifier_model.clone(),
    )?));
    let classifier = Arc::new(LlmClassifier::new(classifier_provider));

    let transport = Arc::new(ConsoleTransport);
    let escalation = escalation_for(config, &storage);

    let worker = NotificationWorker::new(
        storage.clone(),
        storage.clone(),
        transport.clone(),
        config.safety.notification_queue.clone(),
        std::time::Duration::from_secs(config.safety.notify_poll_secs),
    );
    tokio::spawn(worker.run());

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::new(LocalDomain::seeded()),
        transport,
        escalation.clone(),
    ));
    let pipeline = AgentPipeline::new(
        classifier,
        provider,
        dispatcher,
        escalation.clone(),
        storage.clone(),
        storage.clone(),
        storage.clone(),
        PipelineSettings::from_config(config),
    );

    info!(agent = %config.agent.name, team = %args.team, "console session starting");
    let identity = ConsoleIdentity {
        team_id: args.team,
        user_id: args.user,
        channel_id: args.channel,
        display_name: args.name,
    };
    console::run_loop(&pipeline, &escalation, &identity).await
}

/// First-run convenience: register the console team and make the operator a
/// designated contact so escalations have somewhere to go.
async fn ensure_local_team(storage: &SqliteStorage, args: &RunArgs) -> Result<(), GladosError> {
    let db = storage.database();
    if queries::teams::get_team(db, &args.team).await?.is_some() {
        return Ok(());
    }
    warn!(team = %args.team, "team not registered, creating a local one");
    queries::teams::create_team(
        db,
        &glados_core::types::Team {
            id: args.team.clone(),
            name: format!("Local team {}", args.team),
            guild_id: None,
        },
    )
    .await?;
    queries::teams::add_contact(
        db,
        &glados_core::types::YppContact {
            team_id: args.team.clone(),
            user_id: args.user.clone(),
            dm_target: Some(args.user.clone()),
        },
    )
    .await
}

async fn ack(config: &GladosConfig, args: AckArgs) -> Result<(), GladosError> {
    let storage = open_storage(config).await?;
    let escalation = escalation_for(config, &storage);

    match escalation.acknowledge(&args.token, &args.acked_by).await {
        Ok(receipt) => {
            println!(
                "Acknowledged alert {} for team {}. Thank you for checking in.",
                receipt.alert_id, receipt.team_id
            );
            Ok(())
        }
        Err(AckError::Storage(e)) => Err(e),
        Err(e) => {
            // The distinct rejection kinds print verbatim so the contact can
            // tell a stale link from a reused one.
            println!("Could not acknowledge: {e}");
            Ok(())
        }
    }
}
