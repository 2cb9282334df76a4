//! Bot-only simulation batches.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use felt_engine::logger::HandLogger;
use felt_engine::session::SessionStatus;

use crate::config::{self, parse_profile, Config};
use crate::error::CliError;
use crate::table::{build_session, flush_sink, install_event_printers};

pub struct SimOptions {
    pub hands: u64,
    pub players: Option<usize>,
    pub seed: Option<u64>,
    pub profile: Option<String>,
    pub db: Option<String>,
    pub log: Option<String>,
    pub verbose: bool,
}

pub fn handle_sim_command(opts: SimOptions, out: &mut dyn Write) -> Result<(), CliError> {
    if opts.hands == 0 {
        return Err(CliError::InvalidInput("hands must be > 0".into()));
    }
    let mut cfg: Config = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    if let Some(players) = opts.players {
        if !(2..=10).contains(&players) {
            return Err(CliError::InvalidInput("players must be in 2..=10".into()));
        }
        cfg.players = players;
    }
    if let Some(seed) = opts.seed {
        cfg.seed = Some(seed);
    }
    if let Some(profile) = &opts.profile {
        cfg.table_profile = parse_profile(profile)
            .ok_or_else(|| CliError::InvalidInput(format!("unknown profile: {}", profile)))?;
    }
    if let Some(db) = &opts.db {
        cfg.db_path = db.clone();
    }

    let mut session = build_session(&cfg, false)?;
    let sink = Rc::new(RefCell::new(Vec::new()));
    install_event_printers(&mut session, Rc::clone(&sink), opts.verbose);
    if let Some(path) = &opts.log {
        session.set_hand_logger(HandLogger::create(path)?);
    }

    let mut hands_done: u64 = 0;
    while hands_done < opts.hands && session.can_start_hand() {
        session.start_hand()?;
        match session.advance()? {
            SessionStatus::HandComplete => hands_done += 1,
            SessionStatus::AwaitingHumanInput(_) => {
                return Err(CliError::Engine(
                    "simulation has no human seat to wait on".into(),
                ))
            }
        }
        flush_sink(&sink, out)?;
    }

    writeln!(out, "simulated {} hand(s)", hands_done)?;
    for player in session.players() {
        writeln!(
            out,
            "  {} [{}]: {}",
            player.name(),
            player.strategy_name(),
            player.cash()
        )?;
    }
    if let Some(store_error) = session.last_store_error() {
        writeln!(out, "warning: statistics not saved: {}", store_error)?;
    }
    Ok(())
}
