// Parley - self-evolving debates between LLM personas
// Main entry point

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::sync::Arc;

use parley::cli::{Cli, Console};
use parley::config::load_resources;
use parley::dialogue::{DebateSession, SpeakerScheduler};
use parley::logging::{init_tracing, TranscriptLog};
use parley::providers::OpenAiGateway;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let started = Local::now();
    let resources = load_resources(&cli.resource_paths())?;
    let config = &resources.config;

    let gateway = OpenAiGateway::new(
        config.api_key.clone(),
        config.base_url.clone(),
        config.request_timeout(),
    )?;

    let persona_ids = resources.personas.ids();
    let scheduler = match cli.rng_seed {
        Some(seed) => SpeakerScheduler::with_seed(resources.speaker_order.clone(), persona_ids, seed),
        None => SpeakerScheduler::from_entropy(resources.speaker_order.clone(), persona_ids),
    };

    let log = TranscriptLog::for_run(&cli.output_dir, started)?;
    tracing::info!("Writing transcript to {}", log.path().display());

    let mut session = DebateSession::new(
        Arc::new(gateway),
        config.model_config(),
        config.evolution_settings(),
        resources.personas,
        resources.scenario,
        scheduler,
    )
    .with_log(log)
    .with_console(Console::stdout(!cli.no_color));

    session
        .seed_from_text(&resources.seed_text)
        .context("Failed to record the initial conversation")?;

    session.run().await
}
