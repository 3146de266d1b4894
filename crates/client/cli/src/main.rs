//! Automated duel driver.
//!
//! Loads a roster, pits two fighters against each other through an
//! [`Arena`] and prints every battle event as a JSON line on stdout.
mod config;
mod duel;
mod provider;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use battle_content::{Roster, RosterLoader};
use battle_core::CharacterId;
use battle_runtime::{Arena, ArenaConfig, Clock, InMemoryCharacterRegistry, ManualClock, SystemClock};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use config::CliConfig;
use duel::{Duel, JsonLinesSink};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env();
    let _guard = setup_logging(config.log_dir.as_deref())?;

    let roster = match &config.roster {
        Some(path) => RosterLoader::load(path)?,
        None => RosterLoader::bundled()?,
    };
    let fighter_a = resolve_fighter(&roster, config.fighter_a.as_deref(), 0)?;
    let fighter_b = resolve_fighter(&roster, config.fighter_b.as_deref(), 1)?;

    let clock = Arc::new(ManualClock::new(SystemClock.now()));
    let arena = Arena::builder()
        .config(ArenaConfig::from_env())
        .registry(Arc::new(InMemoryCharacterRegistry::from_entries(
            roster.registry_entries(),
        )))
        .clock(clock.clone())
        .sink(Arc::new(JsonLinesSink))
        .build()?;

    let duel = Duel::new(
        arena,
        clock,
        Box::new(config.strategy_a),
        Box::new(config.strategy_b),
        config.max_turns,
    );
    let summary = duel.run(fighter_a, fighter_b).await?;

    tracing::info!(
        winner = %summary.winner,
        controller = %summary.winner_identity,
        reason = %summary.reason,
        turns = summary.turns,
        "duel finished"
    );
    Ok(())
}

/// Resolve a fighter by id or name, falling back to the roster entry at `index`.
fn resolve_fighter(roster: &Roster, wanted: Option<&str>, index: usize) -> Result<CharacterId> {
    let Some(value) = wanted else {
        return roster
            .entries()
            .get(index)
            .map(|entry| entry.character())
            .with_context(|| format!("roster needs at least {} characters", index + 1));
    };

    let entry = match value.parse::<u64>() {
        Ok(id) => roster.get(CharacterId(id)),
        Err(_) => roster.find_by_name(value),
    };
    entry
        .map(|entry| entry.character())
        .with_context(|| format!("fighter '{value}' is not in the roster"))
}

/// Log to stderr, and to `<dir>/arena.log` when a directory is given.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "arena.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}/arena.log", dir.display());
    }

    Ok(guard)
}
