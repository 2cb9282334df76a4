//! Action validation: which action kinds and amounts are legal for whom.

use crate::actions::{ActionKind, BettingTracker, GameState, PlayerAction};
use crate::player::Player;

/// The closed set of rejection reasons. The display strings are stable;
/// hosts and tests may match on them.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RejectReason {
    OutOfTurn,
    ConsecutiveAction,
    IllegalActionKind,
    IllegalAmount,
    InsufficientChips,
    BelowMinimumRaise,
    ZeroCheckRequired,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RejectReason::OutOfTurn => "out of turn",
            RejectReason::ConsecutiveAction => "cannot act twice consecutively in one round",
            RejectReason::IllegalActionKind => "illegal action kind",
            RejectReason::IllegalAmount => "illegal amount",
            RejectReason::InsufficientChips => "insufficient chips",
            RejectReason::BelowMinimumRaise => "below minimum raise",
            RejectReason::ZeroCheckRequired => "check must carry zero amount",
        };
        write!(f, "{}", s)
    }
}

/// The action kinds this player may legally take right now.
pub fn legal_action_kinds(
    player: &Player,
    tracker: &BettingTracker,
    small_blind: u32,
    state: GameState,
) -> Vec<ActionKind> {
    let mut kinds = Vec::new();
    let highest = tracker.round_highest_set();
    let committed = player.round_bet_amount(state);
    let cash = player.cash();

    if cash > 0 || committed < highest {
        kinds.push(ActionKind::Fold);
    }
    if committed == highest {
        kinds.push(ActionKind::Check);
    }
    if committed < highest && cash > 0 {
        kinds.push(ActionKind::Call);
    }
    if highest == 0 && cash > 0 {
        kinds.push(ActionKind::Bet);
    }
    if highest > 0 && cash > 0 {
        let needed = (highest + tracker.minimum_raise(small_blind)).saturating_sub(committed);
        if needed <= cash {
            kinds.push(ActionKind::Raise);
        }
    }
    if cash > 0 {
        kinds.push(ActionKind::AllIn);
    }
    kinds
}

/// Validates a proposed action against the current betting state.
///
/// The caller has already resolved turn order; this checks membership in
/// the acting list, the no-consecutive-action rule, kind legality, and
/// amount legality, in that order.
pub fn validate_player_action(
    acting: &[&Player],
    action: &PlayerAction,
    tracker: &BettingTracker,
    small_blind: u32,
    state: GameState,
) -> Result<(), RejectReason> {
    let player = acting
        .iter()
        .find(|p| p.id() == action.player_id)
        .ok_or(RejectReason::IllegalActionKind)?;

    check_consecutive(action, tracker, state)?;
    check_kind(player, action, tracker, small_blind, state)?;
    check_amount(player, action, tracker, small_blind, state)
}

fn check_consecutive(
    action: &PlayerAction,
    tracker: &BettingTracker,
    state: GameState,
) -> Result<(), RejectReason> {
    if let Some(history) = tracker.round_history(state) {
        if let Some(&(last_id, last_kind)) = history.actions.last() {
            // blind posts are exempt
            if last_id == action.player_id && !last_kind.is_blind_post() {
                return Err(RejectReason::ConsecutiveAction);
            }
        }
    }
    Ok(())
}

fn check_kind(
    player: &Player,
    action: &PlayerAction,
    tracker: &BettingTracker,
    small_blind: u32,
    state: GameState,
) -> Result<(), RejectReason> {
    let highest = tracker.round_highest_set();
    let committed = player.round_bet_amount(state);
    let cash = player.cash();

    match action.kind {
        ActionKind::Fold => {
            if cash > 0 || committed < highest {
                Ok(())
            } else {
                Err(RejectReason::IllegalActionKind)
            }
        }
        ActionKind::Check => {
            if committed == highest {
                Ok(())
            } else {
                Err(RejectReason::IllegalActionKind)
            }
        }
        ActionKind::Call => {
            if committed >= highest {
                Err(RejectReason::IllegalActionKind)
            } else if cash == 0 {
                Err(RejectReason::InsufficientChips)
            } else {
                Ok(())
            }
        }
        ActionKind::Bet => {
            if highest != 0 {
                Err(RejectReason::IllegalActionKind)
            } else if cash == 0 {
                Err(RejectReason::InsufficientChips)
            } else {
                Ok(())
            }
        }
        ActionKind::Raise => {
            if highest == 0 {
                return Err(RejectReason::IllegalActionKind);
            }
            let needed =
                (highest + tracker.minimum_raise(small_blind)).saturating_sub(committed);
            if cash < needed {
                Err(RejectReason::InsufficientChips)
            } else {
                Ok(())
            }
        }
        ActionKind::AllIn => {
            if cash > 0 {
                Ok(())
            } else {
                Err(RejectReason::InsufficientChips)
            }
        }
        ActionKind::None | ActionKind::PostSmallBlind | ActionKind::PostBigBlind => {
            Err(RejectReason::IllegalActionKind)
        }
    }
}

fn check_amount(
    player: &Player,
    action: &PlayerAction,
    tracker: &BettingTracker,
    small_blind: u32,
    state: GameState,
) -> Result<(), RejectReason> {
    let highest = tracker.round_highest_set();
    let committed = player.round_bet_amount(state);

    match action.kind {
        ActionKind::Check => {
            if action.amount != 0 {
                Err(RejectReason::ZeroCheckRequired)
            } else {
                Ok(())
            }
        }
        ActionKind::Bet => {
            if action.amount == 0 {
                Err(RejectReason::IllegalAmount)
            } else if action.amount > player.cash() {
                Err(RejectReason::InsufficientChips)
            } else {
                Ok(())
            }
        }
        ActionKind::Raise => {
            if action.amount <= highest {
                Err(RejectReason::IllegalAmount)
            } else if action.amount < highest + tracker.minimum_raise(small_blind) {
                Err(RejectReason::BelowMinimumRaise)
            } else if action.amount.saturating_sub(committed) > player.cash() {
                Err(RejectReason::InsufficientChips)
            } else {
                Ok(())
            }
        }
        // the engine computes these amounts itself
        _ => Ok(()),
    }
}
