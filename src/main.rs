#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use anyhow::Result;
use clap::Parser;
use rubberducky::cli::Cli;
use rubberducky::config::Config;
use rubberducky::persona::PersonaContext;
use rubberducky::providers::OpenAiCompletions;
use rubberducky::repl::Repl;
use rubberducky::state::{ConversationState, SnapshotStore};
use rubberducky::turn::TurnController;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let mut config = Config::load_or_init()?;
    config.apply_env_overrides();
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(max_tokens) = cli.max_tokens {
        config.max_tokens = max_tokens;
    }

    let persona = PersonaContext::new(
        &config.persona.preamble,
        &config.persona.human_name,
        &config.persona.agent_name,
    );
    let generator = Arc::new(OpenAiCompletions::new(
        config.api_key.as_deref(),
        &config.model,
    ));
    let store = SnapshotStore::new(&config.mbox_dir, &config.snapshot_file);
    let controller = TurnController::new(
        generator,
        persona,
        store,
        ConversationState::new(),
        config.max_tokens,
    );

    Repl::new(controller, config.mbox_dir.clone(), cli.new)
        .run()
        .await
}
