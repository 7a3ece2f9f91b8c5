//! Command-line interface for strictly_scorer.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Scorer - live cricket innings scoring in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_scorer")]
#[command(about = "Ball-by-ball cricket innings scorer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a sequence of scoring tokens and print the final board
    Replay {
        /// Match setup file (TOML). Defaults apply when omitted.
        #[arg(short, long)]
        setup: Option<PathBuf>,

        /// Print the board as JSON
        #[arg(long)]
        json: bool,

        /// Tokens: 0-6, wd, nb, b, lb, b4, lb2, p, w, swap, undo, reset, reset!,
        /// name A,B, in:NAME
        #[arg(required = true, num_args = 1..)]
        tokens: Vec<String>,
    },

    /// Score interactively, one line of commands at a time
    Play {
        /// Match setup file (TOML). Defaults apply when omitted.
        #[arg(short, long)]
        setup: Option<PathBuf>,
    },
}
