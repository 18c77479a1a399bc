//! slirc-replay - feed a recorded event transcript through the tracker.
//!
//! Each non-blank line of the transcript is one JSON-encoded [`Event`].
//! Lines starting with `#` are comments. After the replay the full state
//! dump is written to stdout.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use slirc_state::config::validate;
use slirc_state::{Config, Event, Tracker};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slirc-replay")]
#[command(about = "Replay an IRC event transcript through the state tracker")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// JSON-lines event transcript
    events: PathBuf,

    /// Verify graph invariants after every event
    #[arg(long)]
    check: bool,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!(
            "{} configuration error(s) in {}",
            errors.len(),
            cli.config.display()
        );
    }

    info!(
        nick = %config.identity.nick,
        casemapping = ?config.tracking.casemapping,
        "Starting replay"
    );

    let mut tracker = Tracker::new(&config);
    let transcript = cli.events.display();
    let file = File::open(&cli.events)
        .with_context(|| format!("failed to open transcript {transcript}"))?;

    let mut applied = 0usize;
    let mut anomalies = 0usize;
    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("failed to read {transcript}"))?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event: Event = serde_json::from_str(line)
            .with_context(|| format!("{transcript}:{}: malformed event", lineno + 1))?;
        if tracker.apply(&event).is_err() {
            anomalies += 1;
        }
        applied += 1;

        if cli.check
            && let Err(broken) = tracker.check_invariants()
        {
            anyhow::bail!("{transcript}:{}: invariant broken: {broken}", lineno + 1);
        }
    }

    info!(
        events = applied,
        anomalies,
        nicks = tracker.nick_count(),
        channels = tracker.channel_count(),
        "Replay finished"
    );
    print!("{}", tracker.dump());
    Ok(())
}
