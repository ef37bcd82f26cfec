#![deny(warnings)]

//! Headless CLI: load a tournament configuration, run it and print the summary.

use anyhow::{Context, Result};
use clap::Parser;
use sim_core::TournamentConfig;
use sim_runtime::{Tournament, TournamentReport};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "archery-cli")]
#[command(about = "Monte Carlo simulation of a team archery tournament")]
struct Args {
    /// YAML configuration file; missing keys fall back to defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of games
    #[arg(long)]
    games: Option<u32>,

    /// Override the number of rounds per game
    #[arg(long)]
    rounds: Option<u32>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print the full report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Per-game rows in the text summary
    #[arg(long, default_value_t = 10)]
    show_games: usize,
}

fn load_config(path: Option<&Path>) -> Result<TournamentConfig> {
    let Some(path) = path else {
        return Ok(TournamentConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::DEBUG)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(
        sha = env!("ARCHERY_GIT_SHA"),
        config = ?args.config,
        "starting archery-cli"
    );

    let mut config = load_config(args.config.as_deref())?;
    if let Some(games) = args.games {
        config.games = games;
    }
    if let Some(rounds) = args.rounds {
        config.rounds_per_game = rounds;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut tournament = Tournament::seeded(config).context("building tournament")?;
    tournament.run().context("running tournament")?;
    let report = TournamentReport::from_tournament(&tournament);

    if args.json {
        println!("{}", report.to_json());
    } else {
        println!("archery-cli {}", env!("ARCHERY_GIT_SHA"));
        print!("{}", report.to_text(args.show_games));
    }
    Ok(())
}
