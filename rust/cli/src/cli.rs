//! Command-line argument structures.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "felt",
    version,
    about = "No-Limit Texas Hold'em against styled bots"
)]
pub struct FeltCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play interactively against the bots
    Play {
        /// Number of seats at the table, including yours (2-10)
        #[arg(long)]
        players: Option<usize>,
        /// Stop after this many hands
        #[arg(long)]
        hands: Option<u64>,
        /// RNG seed for reproducible sessions
        #[arg(long)]
        seed: Option<u64>,
        /// Opponent mix: random, tight, loose
        #[arg(long)]
        profile: Option<String>,
        /// Statistics database path
        #[arg(long)]
        db: Option<String>,
    },
    /// Run bot-only hands
    Sim {
        /// Number of hands to simulate
        #[arg(long)]
        hands: u64,
        /// Number of seats at the table (2-10)
        #[arg(long)]
        players: Option<usize>,
        /// RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Opponent mix: random, tight, loose
        #[arg(long)]
        profile: Option<String>,
        /// Statistics database path
        #[arg(long)]
        db: Option<String>,
        /// Write a JSONL hand record per hand
        #[arg(long)]
        log: Option<String>,
        /// Print every table event
        #[arg(long, default_value_t = false)]
        verbose: bool,
    },
    /// Print persisted per-strategy statistics
    Stats {
        /// Statistics database path
        #[arg(long)]
        db: Option<String>,
        /// Show a single strategy only
        #[arg(long)]
        strategy: Option<String>,
        /// Emit JSON instead of the text table
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print a recorded hand log as a transcript
    Replay {
        /// JSONL hand log written by `sim --log`
        #[arg(long)]
        input: String,
    },
    /// Preview a deterministic deal
    Deal {
        /// RNG seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the resolved configuration
    Cfg,
}
