//! Shared decision skeleton for bot strategies.
//!
//! Every style answers the same per-street questions (could I call? what
//! would I raise to? what would I bet?) and the skeleton maps the answers
//! to a legal action with the priority Raise > Call > Check > Fold. Sizing
//! helpers, the pot-control predicate, and the bluff predicate live here;
//! styles only differ in their answers.

use felt_engine::actions::{ActionKind, GameState, PlayerAction};
use felt_engine::context::CurrentHandContext;
use felt_engine::position::Position;
use felt_engine::range::StartingHand;

/// Per-street hooks a concrete style implements.
pub(crate) trait StreetTactics {
    fn preflop_could_call(&mut self, ctx: &CurrentHandContext) -> bool;
    fn preflop_could_raise(&mut self, ctx: &CurrentHandContext) -> u32;

    fn flop_could_bet(&mut self, ctx: &CurrentHandContext) -> u32;
    fn flop_could_call(&mut self, ctx: &CurrentHandContext) -> bool;
    fn flop_could_raise(&mut self, ctx: &CurrentHandContext) -> u32;

    fn turn_could_bet(&mut self, ctx: &CurrentHandContext) -> u32;
    fn turn_could_call(&mut self, ctx: &CurrentHandContext) -> bool;
    fn turn_could_raise(&mut self, ctx: &CurrentHandContext) -> u32;

    fn river_could_bet(&mut self, ctx: &CurrentHandContext) -> u32;
    fn river_could_call(&mut self, ctx: &CurrentHandContext) -> bool;
    fn river_could_raise(&mut self, ctx: &CurrentHandContext) -> u32;
}

pub(crate) fn decide<T: StreetTactics>(tactics: &mut T, ctx: &CurrentHandContext) -> PlayerAction {
    match ctx.game_state {
        GameState::Preflop => decide_preflop(tactics, ctx),
        GameState::Flop | GameState::Turn | GameState::River => decide_postflop(tactics, ctx),
        GameState::PostRiver => PlayerAction::new(ctx.personal.id, ActionKind::Check, 0),
    }
}

fn decide_preflop<T: StreetTactics>(tactics: &mut T, ctx: &CurrentHandContext) -> PlayerAction {
    let id = ctx.personal.id;
    let mut should_call = tactics.preflop_could_call(ctx);
    let raise_to = tactics.preflop_could_raise(ctx);
    if raise_to > 0 {
        should_call = false;
    }

    // last to speak with nothing worth raising and nobody raising: check
    if ctx.betting.preflop_raises_number == 0
        && raise_to == 0
        && ctx.personal.position == Position::BigBlind
    {
        return PlayerAction::new(id, ActionKind::Check, 0);
    }

    if should_call {
        if ctx.personal.to_call == 0 {
            PlayerAction::new(id, ActionKind::Check, 0)
        } else {
            PlayerAction::new(id, ActionKind::Call, 0)
        }
    } else if raise_to > 0 {
        raise_action(ctx, raise_to)
    } else {
        PlayerAction::new(id, ActionKind::Fold, 0)
    }
}

fn decide_postflop<T: StreetTactics>(tactics: &mut T, ctx: &CurrentHandContext) -> PlayerAction {
    let id = ctx.personal.id;
    let street = ctx.game_state;
    let standing_bets = ctx.current_round_bets_or_raises();

    let mut bet_amount = 0;
    let mut raise_to = 0;
    let mut should_call = false;
    if standing_bets == 0 {
        bet_amount = match street {
            GameState::Flop => tactics.flop_could_bet(ctx),
            GameState::Turn => tactics.turn_could_bet(ctx),
            _ => tactics.river_could_bet(ctx),
        };
    } else {
        should_call = match street {
            GameState::Flop => tactics.flop_could_call(ctx),
            GameState::Turn => tactics.turn_could_call(ctx),
            _ => tactics.river_could_call(ctx),
        };
        raise_to = match street {
            GameState::Flop => tactics.flop_could_raise(ctx),
            GameState::Turn => tactics.turn_could_raise(ctx),
            _ => tactics.river_could_raise(ctx),
        };
    }
    if raise_to > 0 {
        should_call = false;
    }

    if standing_bets == 0 && bet_amount == 0 {
        return PlayerAction::new(id, ActionKind::Check, 0);
    }

    if bet_amount > 0 {
        bet_action(ctx, bet_amount)
    } else if should_call {
        PlayerAction::new(id, ActionKind::Call, 0)
    } else if raise_to > 0 {
        raise_action(ctx, raise_to)
    } else if ctx.personal.to_call == 0 {
        PlayerAction::new(id, ActionKind::Check, 0)
    } else {
        PlayerAction::new(id, ActionKind::Fold, 0)
    }
}

/// Maps a desired bet size to a legal Bet, shoving when it covers the stack.
fn bet_action(ctx: &CurrentHandContext, amount: u32) -> PlayerAction {
    let id = ctx.personal.id;
    let amount = amount.max(ctx.big_blind());
    if amount >= ctx.personal.cash {
        PlayerAction::new(id, ActionKind::AllIn, 0)
    } else {
        PlayerAction::new(id, ActionKind::Bet, amount)
    }
}

/// Maps a desired raise-to total to a legal Raise, clamping to the minimum
/// floor and shoving when the total covers the stack.
fn raise_action(ctx: &CurrentHandContext, raise_to: u32) -> PlayerAction {
    let id = ctx.personal.id;
    let floor = ctx.betting.highest_set + ctx.betting.minimum_raise;
    let target = raise_to.max(floor);
    let available = ctx.personal.cash + ctx.personal.round_bet_amount;
    if target >= available || target.saturating_sub(ctx.personal.round_bet_amount) >= ctx.personal.cash
    {
        PlayerAction::new(id, ActionKind::AllIn, 0)
    } else {
        PlayerAction::new(id, ActionKind::Raise, target)
    }
}

/// Heuristic 0-10 strength of the hole cards.
pub(crate) fn preflop_strength(ctx: &CurrentHandContext) -> u8 {
    ctx.personal
        .hole_cards
        .map(|hole| StartingHand::from_cards(hole.first, hole.second).strength())
        .unwrap_or(0)
}

/// Raise-to total for a preflop raise, per the shared sizing rules:
/// opens at 2 BB (1.5 BB short-stacked) with positional and limper
/// adjustments; re-raises at a multiple of the committed pot, larger out
/// of position; anything above 30% of the stack becomes a jam.
pub(crate) fn compute_preflop_raise_amount(ctx: &CurrentHandContext) -> u32 {
    let big_blind = ctx.big_blind();
    let amount = if ctx.betting.preflop_raises_number == 0 {
        first_raise_amount(ctx, big_blind)
    } else {
        re_raise_amount(ctx)
    };
    finalize_raise_amount(ctx, amount)
}

fn first_raise_amount(ctx: &CurrentHandContext, big_blind: u32) -> u32 {
    let mut amount = if ctx.personal.m > 8 {
        2 * big_blind
    } else {
        big_blind + ctx.small_blind
    };

    if ctx.players.nb_players > 4 {
        if ctx.personal.position < Position::Middle {
            amount += big_blind;
        } else if ctx.personal.position == Position::Button {
            amount -= ctx.small_blind;
        }
    }
    amount += ctx.betting.preflop_calls_number * big_blind;
    amount
}

fn re_raise_amount(ctx: &CurrentHandContext) -> u32 {
    let committed_pot = ctx.betting.sets as f32;
    let in_position = match ctx.players.preflop_last_raiser {
        Some(raiser) => ctx.personal.position > raiser.position,
        None => false,
    };
    let factor = if ctx.betting.preflop_raises_number == 1 {
        if in_position {
            1.2
        } else {
            1.4
        }
    } else if in_position {
        1.0
    } else {
        1.2
    };
    (committed_pot * factor) as u32
}

fn finalize_raise_amount(ctx: &CurrentHandContext, amount: u32) -> u32 {
    if amount as f32 > ctx.personal.cash as f32 * 0.3 {
        // committed anyway
        ctx.personal.cash + ctx.personal.round_bet_amount
    } else {
        amount
    }
}

/// On the flop and turn, large pots with vulnerable made hands are played
/// passively instead of inflated further.
pub(crate) fn should_pot_control(ctx: &CurrentHandContext) -> bool {
    if !matches!(ctx.game_state, GameState::Flop | GameState::Turn) {
        return false;
    }
    let big_blind = ctx.big_blind();
    let threshold = if ctx.game_state == GameState::Flop {
        big_blind * 20
    } else {
        big_blind * 40
    };
    if ctx.betting.pot < threshold {
        return false;
    }

    let flags = &ctx.personal.post_flop_flags;
    if flags.is_pocket_pair && !flags.is_over_pair {
        return true;
    }
    if flags.is_full_house_possible
        && !(flags.is_trips || flags.is_flush || flags.is_full_house || flags.is_quads)
    {
        return true;
    }
    if ctx.game_state == GameState::Flop
        && (flags.is_over_pair || flags.is_top_pair)
        && ctx.personal.total_bet_amount > big_blind * 20
    {
        return true;
    }
    if ctx.game_state == GameState::Turn
        && (flags.is_over_pair
            || (flags.is_two_pair && !flags.is_full_house_possible)
            || (flags.is_trips && ctx.personal.total_bet_amount > big_blind * 60))
    {
        return true;
    }
    false
}

/// A bluff only works against opponents who can fold: no calling stations
/// at the table, nobody pot-committed, and preflop nobody who habitually
/// calls three-bets.
pub(crate) fn is_possible_to_bluff(ctx: &CurrentHandContext) -> bool {
    let opponents = &ctx.players.opponents;
    if opponents.is_empty() || opponents.iter().all(|o| o.cash == 0) {
        // everyone left is all-in
        return false;
    }

    for opponent in opponents {
        let r = &opponent.ratios;
        if r.hands_sampled >= 30
            && r.went_to_showdown >= 40.0
            && r.vpip - r.preflop_raise > 15.0
            && r.vpip > 20.0
        {
            // looks like a calling station
            return false;
        }
        if opponent.cash < ctx.betting.pot * 3 {
            return false;
        }
        if ctx.game_state == GameState::Preflop && r.call_three_bets_frequency > 40.0 {
            return false;
        }
    }
    true
}
