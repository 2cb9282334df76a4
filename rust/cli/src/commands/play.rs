//! Interactive play: one human seat against styled bots.

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use felt_engine::actions::ActionKind;
use felt_engine::session::SessionStatus;

use crate::config::{self, parse_profile, Config};
use crate::error::CliError;
use crate::table::{
    build_session, flush_sink, install_event_printers, parse_human_input, HumanInput,
};

pub struct PlayOptions {
    pub players: Option<usize>,
    pub hands: Option<u64>,
    pub seed: Option<u64>,
    pub profile: Option<String>,
    pub db: Option<String>,
}

pub fn handle_play_command(
    opts: PlayOptions,
    out: &mut dyn Write,
    _err: &mut dyn Write,
    input: &mut dyn BufRead,
) -> Result<(), CliError> {
    let mut cfg: Config = config::load().map_err(|e| CliError::Config(e.to_string()))?;
    apply_overrides(&mut cfg, &opts)?;

    let mut session = build_session(&cfg, true)?;
    let sink = Rc::new(RefCell::new(Vec::new()));
    install_event_printers(&mut session, Rc::clone(&sink), true);

    let max_hands = opts.hands;
    let mut hands_done: u64 = 0;

    session.start_hand()?;
    let mut status = session.advance()?;
    loop {
        flush_sink(&sink, out)?;
        match status {
            SessionStatus::AwaitingHumanInput(id) => {
                let can_check = session
                    .hand()
                    .map(|h| h.legal_actions(id).contains(&ActionKind::Check))
                    .unwrap_or(false);
                write!(out, "> ")?;
                out.flush()?;
                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    break;
                }
                match parse_human_input(&line, id, can_check) {
                    Ok(HumanInput::Quit) => break,
                    Ok(HumanInput::Action(action)) => {
                        status = session.handle_human_action(action)?;
                    }
                    Err(e) => {
                        writeln!(out, "{}", e)?;
                    }
                }
            }
            SessionStatus::HandComplete => {
                hands_done += 1;
                let done = max_hands.map(|h| hands_done >= h).unwrap_or(false);
                if done || !session.can_start_hand() {
                    break;
                }
                session.start_hand()?;
                status = session.advance()?;
            }
        }
    }
    flush_sink(&sink, out)?;

    writeln!(out)?;
    writeln!(out, "session over after {} hand(s)", hands_done)?;
    for player in session.players() {
        writeln!(out, "  {}: {}", player.name(), player.cash())?;
    }
    Ok(())
}

fn apply_overrides(cfg: &mut Config, opts: &PlayOptions) -> Result<(), CliError> {
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
    Ok(())
}
