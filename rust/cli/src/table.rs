//! Session construction and terminal wiring.
//!
//! Builds a seated session from the resolved config, installs event
//! printers that render into a shared sink (flushed to the caller's writer
//! between engine steps), and parses human action input.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use std::rc::Rc;

use felt_engine::actions::{ActionKind, PlayerAction};
use felt_engine::eval::SevenCardEvaluator;
use felt_engine::session::{SeatConfig, Session, SessionConfig};
use felt_engine::store::{NullPlayersStatisticsStore, PlayersStatisticsStore};
use felt_ai::StrategyAssigner;

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_action, format_board, format_card};
use crate::sqlite_store::SqlitePlayersStatisticsStore;

pub type Sink = Rc<RefCell<Vec<u8>>>;

/// Builds a session per the config: seat 0 is the human when `with_human`,
/// every other seat gets a bot style from the table profile.
pub fn build_session(cfg: &Config, with_human: bool) -> Result<Session, CliError> {
    let seed = cfg.seed.unwrap_or_else(rand::random);
    let bot_count = if with_human {
        cfg.players - 1
    } else {
        cfg.players
    };
    let mut assigner = StrategyAssigner::new(cfg.table_profile, bot_count, seed);

    let mut seats = Vec::with_capacity(cfg.players);
    if with_human {
        seats.push(SeatConfig {
            name: "you".to_string(),
            strategy: None,
        });
    }
    for i in 0..bot_count {
        seats.push(SeatConfig {
            name: format!("bot{}", i + 1),
            strategy: Some(assigner.choose_strategy()),
        });
    }

    let store: Box<dyn PlayersStatisticsStore> = match SqlitePlayersStatisticsStore::open(
        &cfg.db_path,
    ) {
        Ok(store) => Box::new(store),
        // a broken statistics database never blocks play
        Err(_) => Box::new(NullPlayersStatisticsStore),
    };

    let session = Session::new(
        SessionConfig {
            small_blind: cfg.small_blind,
            start_cash: cfg.start_cash,
            seed: cfg.seed,
            gui_speed: 1,
        },
        seats,
        Rc::new(SevenCardEvaluator),
        store,
    )?;
    Ok(session)
}

/// Installs event callbacks that render the game into `sink`.
pub fn install_event_printers(session: &mut Session, sink: Sink, verbose: bool) {
    let human_id = session.human_id();
    let names: Rc<HashMap<u32, String>> = Rc::new(
        session
            .players()
            .iter()
            .map(|p| (p.id(), p.name().to_string()))
            .collect(),
    );
    let name_of = {
        let names = Rc::clone(&names);
        move |id: u32| {
            names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| format!("player {}", id))
        }
    };

    {
        let sink = Rc::clone(&sink);
        session.events.on_betting_round_started = Some(Box::new(move |state| {
            if verbose {
                let _ = writeln!(sink.borrow_mut(), "-- {} --", state);
            }
        }));
    }
    {
        let sink = Rc::clone(&sink);
        session.events.on_hole_cards_dealt = Some(Box::new(move |id, hole| {
            if Some(id) == human_id {
                let _ = writeln!(
                    sink.borrow_mut(),
                    "your cards: {} {}",
                    format_card(&hole.first),
                    format_card(&hole.second)
                );
            }
        }));
    }
    {
        let sink = Rc::clone(&sink);
        session.events.on_board_cards_dealt = Some(Box::new(move |board| {
            if verbose {
                let _ = writeln!(sink.borrow_mut(), "board: {}", format_board(board.cards()));
            }
        }));
    }
    {
        let sink = Rc::clone(&sink);
        let name_of = name_of.clone();
        session.events.on_player_acted = Some(Box::new(move |action| {
            if verbose {
                let _ = writeln!(
                    sink.borrow_mut(),
                    "{}",
                    format_action(&name_of(action.player_id), &action)
                );
            }
        }));
    }
    {
        let sink = Rc::clone(&sink);
        let name_of = name_of.clone();
        session.events.on_showdown_reveal_order = Some(Box::new(move |order| {
            if verbose {
                let shown: Vec<String> = order.iter().map(|&id| name_of(id)).collect();
                let _ = writeln!(sink.borrow_mut(), "showdown: {}", shown.join(", "));
            }
        }));
    }
    {
        let sink = Rc::clone(&sink);
        let name_of = name_of.clone();
        session.events.on_hand_completed = Some(Box::new(move |winners, pot| {
            if verbose {
                let takers: Vec<String> = winners.iter().map(|&id| name_of(id)).collect();
                let _ = writeln!(
                    sink.borrow_mut(),
                    "pot of {} goes to {}",
                    pot,
                    if takers.is_empty() {
                        "nobody".to_string()
                    } else {
                        takers.join(", ")
                    }
                );
            }
        }));
    }
    {
        let sink = Rc::clone(&sink);
        session.events.on_awaiting_human_input = Some(Box::new(move |_, kinds| {
            let options: Vec<String> = kinds.iter().map(action_word).collect();
            let _ = writeln!(sink.borrow_mut(), "your move ({}):", options.join("/"));
        }));
    }
    {
        let sink = Rc::clone(&sink);
        session.events.on_invalid_player_action = Some(Box::new(move |_, _, reason| {
            let _ = writeln!(sink.borrow_mut(), "invalid action: {}", reason);
        }));
    }
    {
        let sink = Rc::clone(&sink);
        session.events.on_engine_error = Some(Box::new(move |message| {
            let _ = writeln!(sink.borrow_mut(), "engine error: {}", message);
        }));
    }
}

fn action_word(kind: &ActionKind) -> String {
    match kind {
        ActionKind::Fold => "fold".to_string(),
        ActionKind::Check => "check".to_string(),
        ActionKind::Call => "call".to_string(),
        ActionKind::Bet => "bet <amount>".to_string(),
        ActionKind::Raise => "raise <amount>".to_string(),
        ActionKind::AllIn => "allin".to_string(),
        other => other.to_string(),
    }
}

/// Drains the sink into the caller's writer.
pub fn flush_sink(sink: &Sink, out: &mut dyn Write) -> Result<(), CliError> {
    let mut buffer = sink.borrow_mut();
    if !buffer.is_empty() {
        out.write_all(&buffer)?;
        buffer.clear();
    }
    Ok(())
}

/// One parsed line of human input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HumanInput {
    Action(PlayerAction),
    Quit,
}

/// Parses a line like `call`, `bet 120`, `raise 300`, `fold`, `allin` or
/// `quit`. An empty line means check when that is legal, fold otherwise.
pub fn parse_human_input(
    line: &str,
    player_id: u32,
    can_check: bool,
) -> Result<HumanInput, CliError> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or("");
    let amount = words.next();

    let action = |kind, amount| HumanInput::Action(PlayerAction::new(player_id, kind, amount));
    let parse_amount = |raw: Option<&str>| -> Result<u32, CliError> {
        raw.ok_or_else(|| CliError::InvalidInput("amount required".into()))?
            .parse()
            .map_err(|_| CliError::InvalidInput("amount must be a number".into()))
    };

    match verb {
        "" => {
            if can_check {
                Ok(action(ActionKind::Check, 0))
            } else {
                Ok(action(ActionKind::Fold, 0))
            }
        }
        "fold" | "f" => Ok(action(ActionKind::Fold, 0)),
        "check" | "k" => Ok(action(ActionKind::Check, 0)),
        "call" | "c" => Ok(action(ActionKind::Call, 0)),
        "bet" | "b" => Ok(action(ActionKind::Bet, parse_amount(amount)?)),
        "raise" | "r" => Ok(action(ActionKind::Raise, parse_amount(amount)?)),
        "allin" | "a" => Ok(action(ActionKind::AllIn, 0)),
        "quit" | "q" => Ok(HumanInput::Quit),
        other => Err(CliError::InvalidInput(format!("unknown action: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_verbs() {
        assert_eq!(
            parse_human_input("call", 3, true).unwrap(),
            HumanInput::Action(PlayerAction::new(3, ActionKind::Call, 0))
        );
        assert_eq!(
            parse_human_input("bet 120", 0, true).unwrap(),
            HumanInput::Action(PlayerAction::new(0, ActionKind::Bet, 120))
        );
        assert_eq!(parse_human_input("q", 0, true).unwrap(), HumanInput::Quit);
    }

    #[test]
    fn empty_line_checks_when_legal_folds_otherwise() {
        assert_eq!(
            parse_human_input("\n", 1, true).unwrap(),
            HumanInput::Action(PlayerAction::new(1, ActionKind::Check, 0))
        );
        assert_eq!(
            parse_human_input("\n", 1, false).unwrap(),
            HumanInput::Action(PlayerAction::new(1, ActionKind::Fold, 0))
        );
    }

    #[test]
    fn rejects_garbage_and_missing_amounts() {
        assert!(parse_human_input("shove", 0, true).is_err());
        assert!(parse_human_input("bet", 0, true).is_err());
        assert!(parse_human_input("raise xyz", 0, true).is_err());
    }
}
