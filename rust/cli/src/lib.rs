//! # Felt CLI Library
//!
//! Terminal front-end for the felt poker engine.
//!
//! ## Module Organization
//!
//! - **`cli`**: CLI structures (FeltCli, Commands enum)
//! - **`commands`**: Command handler implementations
//! - **`table`**: Session wiring, event printers, human input parsing
//! - **`formatters`**: Card/board/action formatting
//! - **`sqlite_store`**: SQLite statistics persistence
//! - **`config`**, **`error`**: Support modules
//!
//! ## Commands
//!
//! `play`, `sim`, `stats`, `replay`, `deal`, `cfg`

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod formatters;
pub mod sqlite_store;
pub mod table;

use cli::{Commands, FeltCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_play_command, handle_replay_command,
    handle_sim_command, handle_stats_command,
};
use commands::{PlayOptions, SimOptions};

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the matching subcommand
/// handler. Returns the process exit code: `0` for success, `2` for errors,
/// `130` for interruptions.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = FeltCli::try_parse_from(&argv);
    match parsed {
        Err(e) => handle_parse_error(e, out, err),
        Ok(cli) => execute_command(cli.cmd, out, err),
    }
}

/// Handle clap parsing errors with appropriate output and exit codes.
fn handle_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(out, "{}", e);
            0
        }
        _ => {
            const COMMANDS: &[&str] = &["play", "sim", "stats", "replay", "deal", "cfg"];

            let _ = writeln!(err, "{}", e);
            let _ = writeln!(err);
            let _ = writeln!(err, "Felt Poker CLI");
            let _ = writeln!(err, "Usage: felt <command> [options]\n");
            let _ = writeln!(err, "Commands:");
            for c in COMMANDS {
                let _ = writeln!(err, "  {}", c);
            }
            let _ = writeln!(err, "\nFor full help, run: felt --help");
            2
        }
    }
}

/// Execute the parsed command and convert the result to an exit code.
fn execute_command(cmd: Commands, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    let result = match cmd {
        Commands::Cfg => handle_cfg_command(out),
        Commands::Play {
            players,
            hands,
            seed,
            profile,
            db,
        } => {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(
                PlayOptions {
                    players,
                    hands,
                    seed,
                    profile,
                    db,
                },
                out,
                err,
                &mut stdin_lock,
            )
        }
        Commands::Sim {
            hands,
            players,
            seed,
            profile,
            db,
            log,
            verbose,
        } => handle_sim_command(
            SimOptions {
                hands,
                players,
                seed,
                profile,
                db,
                log,
                verbose,
            },
            out,
        ),
        Commands::Stats { db, strategy, json } => handle_stats_command(db, strategy, json, out),
        Commands::Replay { input } => handle_replay_command(input, out),
        Commands::Deal { seed } => handle_deal_command(seed, out),
    };

    match result {
        Ok(()) => 0,
        Err(CliError::Interrupted(_)) => 130,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            2
        }
    }
}
