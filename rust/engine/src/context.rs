//! The read-only snapshot handed to strategies.
//!
//! Strategies never touch the hand directly; everything a decision may
//! depend on is copied into a `CurrentHandContext` before the strategy runs.
//! This breaks the player/hand reference cycle and keeps strategies pure.

use crate::actions::GameState;
use crate::analysis::PostFlopAnalysisFlags;
use crate::cards::HoleCards;
use crate::position::Position;
use crate::range::StartingHandSet;

/// Table-wide betting facts for the current round.
#[derive(Debug, Clone, Default)]
pub struct BettingContext {
    /// Chips committed across the whole hand so far.
    pub pot: u32,
    /// Chips committed in the current round by all seats.
    pub sets: u32,
    /// Highest round commitment any seat has made.
    pub highest_set: u32,
    /// Minimum legal raise increment right now.
    pub minimum_raise: u32,
    pub preflop_raises_number: u32,
    pub preflop_calls_number: u32,
    pub flop_bets_or_raises_number: u32,
    pub turn_bets_or_raises_number: u32,
    pub river_bets_or_raises_number: u32,
}

/// Statistical ratios of one opponent, read off their profile for the
/// current table size.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpponentRatios {
    pub hands_sampled: u32,
    pub aggression_factor: f32,
    pub aggression_frequency: f32,
    pub vpip: f32,
    pub preflop_raise: f32,
    pub went_to_showdown: f32,
    pub call_three_bets_frequency: f32,
}

/// Summary of one still-in opponent.
#[derive(Debug, Clone)]
pub struct OpponentSummary {
    pub id: u32,
    pub position: Position,
    pub cash: u32,
    pub total_bet_amount: u32,
    /// The estimated set of starting-hand classes this opponent may hold.
    pub estimated_range: StartingHandSet,
    pub ratios: OpponentRatios,
}

/// Who raised last preflop, for positional re-raise sizing.
#[derive(Debug, Clone, Copy)]
pub struct PreflopRaiser {
    pub id: u32,
    pub position: Position,
}

#[derive(Debug, Clone, Default)]
pub struct PlayersContext {
    pub nb_players: u32,
    pub preflop_last_raiser: Option<PreflopRaiser>,
    pub opponents: Vec<OpponentSummary>,
}

/// The acting player's own view.
#[derive(Debug, Clone)]
pub struct PersonalContext {
    pub id: u32,
    pub position: Position,
    pub cash: u32,
    /// Chips committed across the whole hand.
    pub total_bet_amount: u32,
    /// Chips committed in the current round.
    pub round_bet_amount: u32,
    /// Chips required to match the highest set.
    pub to_call: u32,
    pub hole_cards: Option<HoleCards>,
    pub post_flop_flags: PostFlopAnalysisFlags,
    /// Rough stack depth: cash / (small blind + big blind).
    pub m: u32,
    /// Whether this player made the last preflop raise.
    pub is_preflop_aggressor: bool,
}

#[derive(Debug, Clone)]
pub struct CurrentHandContext {
    pub game_state: GameState,
    pub small_blind: u32,
    pub betting: BettingContext,
    pub players: PlayersContext,
    pub personal: PersonalContext,
}

impl CurrentHandContext {
    pub fn big_blind(&self) -> u32 {
        2 * self.small_blind
    }

    /// Bets or raises already made in the current round.
    pub fn current_round_bets_or_raises(&self) -> u32 {
        match self.game_state {
            GameState::Preflop => self.betting.preflop_raises_number,
            GameState::Flop => self.betting.flop_bets_or_raises_number,
            GameState::Turn => self.betting.turn_bets_or_raises_number,
            GameState::River => self.betting.river_bets_or_raises_number,
            GameState::PostRiver => 0,
        }
    }
}
