//! Strictly Scorer - ball-by-ball cricket scoring CLI

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::Path;
use strictly_scorer::{
    BoardFormat, Cli, Command, ScoringSession, load_setup, parse_tokens,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the board
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            setup,
            json,
            tokens,
        } => run_replay(setup.as_deref(), json, &tokens),
        Command::Play { setup } => run_play(setup.as_deref()),
    }
}

/// Applies tokens and prints the final board.
#[instrument(skip(tokens), fields(count = tokens.len()))]
fn run_replay(setup: Option<&Path>, json: bool, tokens: &[String]) -> Result<()> {
    let raw = load_setup(setup)?;
    let mut session = ScoringSession::start(raw).context("Invalid match setup")?;
    let actions = parse_tokens(tokens.iter().map(String::as_str))?;

    let rejections = session.replay(&actions);
    info!(rejected = rejections.len(), "Replay complete");

    let mut stderr = std::io::stderr().lock();
    for rejection in &rejections {
        writeln!(stderr, "! {}", rejection)?;
    }

    let format = if json { BoardFormat::Json } else { BoardFormat::Text };
    session.print_board(format, &mut std::io::stdout().lock())
}

/// Runs the interactive loop on stdin.
#[instrument]
fn run_play(setup: Option<&Path>) -> Result<()> {
    let raw = load_setup(setup)?;
    let mut session = ScoringSession::start(raw).context("Invalid match setup")?;
    info!("Starting interactive scoring");

    let mut out = std::io::stdout().lock();
    session.print_notices(&mut out)?;
    session.play(&mut std::io::stdin().lock(), &mut out)
}
