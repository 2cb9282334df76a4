//! Per-strategy statistical aggregates.
//!
//! Counters accumulate per betting round while hands are played; the store
//! persists deltas keyed by `(strategy_name, table size class)`. Ratios
//! derived here (VPIP, PFR, AF, AFreq, ...) feed the range estimator's
//! profile archetypes and the bluff predicate.

use serde::{Deserialize, Serialize};

use crate::actions::{ActionKind, GameState};
use crate::position::MAX_NUMBER_OF_PLAYERS;

/// Below this many sampled hands a profile is not considered reliable.
pub const MIN_HANDS_STATISTICS_ACCURATE: u32 = 30;

/// Equivalence classes for statistics storage: statistics are shared across
/// all seat counts of a class.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum TableSizeClass {
    HeadsUp,
    ShortHanded,
    FullRing,
}

impl TableSizeClass {
    pub fn from_seats(nb_players: usize) -> TableSizeClass {
        if nb_players == 2 {
            TableSizeClass::HeadsUp
        } else if nb_players <= 6 {
            TableSizeClass::ShortHanded
        } else {
            TableSizeClass::FullRing
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TableSizeClass::HeadsUp => "HU",
            TableSizeClass::ShortHanded => "SH",
            TableSizeClass::FullRing => "FR",
        }
    }

    pub fn from_str(s: &str) -> Option<TableSizeClass> {
        match s {
            "HU" => Some(TableSizeClass::HeadsUp),
            "SH" => Some(TableSizeClass::ShortHanded),
            "FR" => Some(TableSizeClass::FullRing),
            _ => None,
        }
    }

    /// Seat counts belonging to this class.
    pub fn seat_range(self) -> std::ops::RangeInclusive<usize> {
        match self {
            TableSizeClass::HeadsUp => 2..=2,
            TableSizeClass::ShortHanded => 3..=6,
            TableSizeClass::FullRing => 7..=MAX_NUMBER_OF_PLAYERS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreflopStatistics {
    pub hands: u32,
    pub checks: u32,
    pub calls: u32,
    pub raises: u32,
    pub three_bets: u32,
    pub call_three_bets: u32,
    pub call_three_bets_opportunities: u32,
    pub four_bets: u32,
    pub folds: u32,
    pub limps: u32,
}

impl PreflopStatistics {
    pub fn voluntary_put_money_in_pot(&self) -> f32 {
        percentage(self.calls + self.raises, self.hands)
    }

    pub fn preflop_raise(&self) -> f32 {
        percentage(self.raises, self.hands)
    }

    pub fn call_three_bets_frequency(&self) -> f32 {
        percentage(self.call_three_bets, self.call_three_bets_opportunities)
    }

    fn delta(&self, baseline: &PreflopStatistics) -> PreflopStatistics {
        PreflopStatistics {
            hands: self.hands - baseline.hands,
            checks: self.checks - baseline.checks,
            calls: self.calls - baseline.calls,
            raises: self.raises - baseline.raises,
            three_bets: self.three_bets - baseline.three_bets,
            call_three_bets: self.call_three_bets - baseline.call_three_bets,
            call_three_bets_opportunities: self.call_three_bets_opportunities
                - baseline.call_three_bets_opportunities,
            four_bets: self.four_bets - baseline.four_bets,
            folds: self.folds - baseline.folds,
            limps: self.limps - baseline.limps,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlopStatistics {
    pub hands: u32,
    pub checks: u32,
    pub bets: u32,
    pub calls: u32,
    pub raises: u32,
    pub folds: u32,
    pub continuation_bets: u32,
    pub continuation_bets_opportunities: u32,
}

impl FlopStatistics {
    pub fn continuation_bet_frequency(&self) -> f32 {
        percentage(self.continuation_bets, self.continuation_bets_opportunities)
    }

    fn delta(&self, baseline: &FlopStatistics) -> FlopStatistics {
        FlopStatistics {
            hands: self.hands - baseline.hands,
            checks: self.checks - baseline.checks,
            bets: self.bets - baseline.bets,
            calls: self.calls - baseline.calls,
            raises: self.raises - baseline.raises,
            folds: self.folds - baseline.folds,
            continuation_bets: self.continuation_bets - baseline.continuation_bets,
            continuation_bets_opportunities: self.continuation_bets_opportunities
                - baseline.continuation_bets_opportunities,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStatistics {
    pub hands: u32,
    pub checks: u32,
    pub bets: u32,
    pub calls: u32,
    pub raises: u32,
    pub folds: u32,
}

impl TurnStatistics {
    fn delta(&self, baseline: &TurnStatistics) -> TurnStatistics {
        TurnStatistics {
            hands: self.hands - baseline.hands,
            checks: self.checks - baseline.checks,
            bets: self.bets - baseline.bets,
            calls: self.calls - baseline.calls,
            raises: self.raises - baseline.raises,
            folds: self.folds - baseline.folds,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiverStatistics {
    pub hands: u32,
    pub checks: u32,
    pub bets: u32,
    pub calls: u32,
    pub raises: u32,
    pub folds: u32,
}

impl RiverStatistics {
    fn delta(&self, baseline: &RiverStatistics) -> RiverStatistics {
        RiverStatistics {
            hands: self.hands - baseline.hands,
            checks: self.checks - baseline.checks,
            bets: self.bets - baseline.bets,
            calls: self.calls - baseline.calls,
            raises: self.raises - baseline.raises,
            folds: self.folds - baseline.folds,
        }
    }
}

/// Aggregated counters for one `(strategy, table size class)` cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    pub preflop: PreflopStatistics,
    pub flop: FlopStatistics,
    pub turn: TurnStatistics,
    pub river: RiverStatistics,
    pub went_to_showdown: u32,
    pub won_showdown: u32,
    pub won_without_showdown: u32,
}

impl PlayerStatistics {
    fn total_bets_and_raises(&self) -> u32 {
        self.preflop.raises
            + self.flop.bets
            + self.flop.raises
            + self.turn.bets
            + self.turn.raises
            + self.river.bets
            + self.river.raises
    }

    fn total_calls(&self) -> u32 {
        self.preflop.calls + self.flop.calls + self.turn.calls + self.river.calls
    }

    fn total_checks(&self) -> u32 {
        self.preflop.checks + self.flop.checks + self.turn.checks + self.river.checks
    }

    /// Aggression factor: (bets + raises) / calls.
    pub fn aggression_factor(&self) -> f32 {
        let aggressive = self.total_bets_and_raises();
        let calls = self.total_calls();
        if calls == 0 {
            aggressive as f32
        } else {
            aggressive as f32 / calls as f32
        }
    }

    /// Aggression frequency: (bets + raises) / (bets + raises + calls + checks), as a percentage.
    pub fn aggression_frequency(&self) -> f32 {
        let aggressive = self.total_bets_and_raises();
        percentage(
            aggressive,
            aggressive + self.total_calls() + self.total_checks(),
        )
    }

    pub fn went_to_showdown_pct(&self) -> f32 {
        percentage(self.went_to_showdown, self.preflop.hands)
    }

    pub fn delta(&self, baseline: &PlayerStatistics) -> PlayerStatistics {
        PlayerStatistics {
            preflop: self.preflop.delta(&baseline.preflop),
            flop: self.flop.delta(&baseline.flop),
            turn: self.turn.delta(&baseline.turn),
            river: self.river.delta(&baseline.river),
            went_to_showdown: self.went_to_showdown - baseline.went_to_showdown,
            won_showdown: self.won_showdown - baseline.won_showdown,
            won_without_showdown: self.won_without_showdown - baseline.won_without_showdown,
        }
    }
}

fn percentage(numerator: u32, denominator: u32) -> f32 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f32 * 100.0 / denominator as f32
    }
}

/// Betting-round facts the updater needs to classify an action.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionRecordContext {
    /// Raise-like actions already taken in this round before the action.
    pub raises_before: u32,
    /// Bets or raises already taken in this round before the action.
    pub bets_or_raises_before: u32,
    /// Whether the acting player made the last preflop raise.
    pub is_preflop_aggressor: bool,
}

/// One array cell per seat count; classes share cells on load/save, but the
/// in-memory updater keys by the exact seat count it observed.
pub type StatisticsBySeats = [PlayerStatistics; MAX_NUMBER_OF_PLAYERS + 1];

/// Counts a player's actions during hands and produces save deltas.
#[derive(Debug, Clone, Default)]
pub struct StatisticsUpdater {
    totals: StatisticsBySeats,
    baseline: StatisticsBySeats,
}

impl StatisticsUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statistics(&self, nb_players: usize) -> &PlayerStatistics {
        &self.totals[nb_players.min(MAX_NUMBER_OF_PLAYERS)]
    }

    /// Seeds totals and baseline from the store at session start.
    pub fn load_saved(&mut self, saved: StatisticsBySeats) {
        self.totals = saved;
        self.baseline = saved;
    }

    /// Marks participation in a betting round (the per-street `hands` counter).
    pub fn record_street_participation(&mut self, nb_players: usize, round: GameState) {
        let cell = &mut self.totals[nb_players.min(MAX_NUMBER_OF_PLAYERS)];
        match round {
            GameState::Preflop => cell.preflop.hands += 1,
            GameState::Flop => cell.flop.hands += 1,
            GameState::Turn => cell.turn.hands += 1,
            GameState::River => cell.river.hands += 1,
            GameState::PostRiver => {}
        }
    }

    pub fn record_action(
        &mut self,
        nb_players: usize,
        round: GameState,
        kind: ActionKind,
        ctx: ActionRecordContext,
    ) {
        let cell = &mut self.totals[nb_players.min(MAX_NUMBER_OF_PLAYERS)];
        match round {
            GameState::Preflop => {
                let pf = &mut cell.preflop;
                if ctx.raises_before >= 2 && !kind.is_blind_post() {
                    pf.call_three_bets_opportunities += 1;
                }
                match kind {
                    ActionKind::Check => pf.checks += 1,
                    ActionKind::Fold => pf.folds += 1,
                    ActionKind::Call => {
                        pf.calls += 1;
                        if ctx.raises_before == 0 {
                            pf.limps += 1;
                        }
                        if ctx.raises_before >= 2 {
                            pf.call_three_bets += 1;
                        }
                    }
                    ActionKind::Raise | ActionKind::AllIn => {
                        pf.raises += 1;
                        if ctx.raises_before == 1 {
                            pf.three_bets += 1;
                        } else if ctx.raises_before >= 2 {
                            pf.four_bets += 1;
                        }
                    }
                    _ => {}
                }
            }
            GameState::Flop => {
                let f = &mut cell.flop;
                if ctx.is_preflop_aggressor && ctx.bets_or_raises_before == 0 {
                    f.continuation_bets_opportunities += 1;
                }
                match kind {
                    ActionKind::Check => f.checks += 1,
                    ActionKind::Fold => f.folds += 1,
                    ActionKind::Call => f.calls += 1,
                    ActionKind::Bet => {
                        f.bets += 1;
                        if ctx.is_preflop_aggressor {
                            f.continuation_bets += 1;
                        }
                    }
                    ActionKind::Raise | ActionKind::AllIn => f.raises += 1,
                    _ => {}
                }
            }
            GameState::Turn => {
                let t = &mut cell.turn;
                match kind {
                    ActionKind::Check => t.checks += 1,
                    ActionKind::Fold => t.folds += 1,
                    ActionKind::Call => t.calls += 1,
                    ActionKind::Bet => t.bets += 1,
                    ActionKind::Raise | ActionKind::AllIn => t.raises += 1,
                    _ => {}
                }
            }
            GameState::River => {
                let r = &mut cell.river;
                match kind {
                    ActionKind::Check => r.checks += 1,
                    ActionKind::Fold => r.folds += 1,
                    ActionKind::Call => r.calls += 1,
                    ActionKind::Bet => r.bets += 1,
                    ActionKind::Raise | ActionKind::AllIn => r.raises += 1,
                    _ => {}
                }
            }
            GameState::PostRiver => {}
        }
    }

    pub fn record_showdown(&mut self, nb_players: usize, won: bool) {
        let cell = &mut self.totals[nb_players.min(MAX_NUMBER_OF_PLAYERS)];
        cell.went_to_showdown += 1;
        if won {
            cell.won_showdown += 1;
        }
    }

    pub fn record_win_without_showdown(&mut self, nb_players: usize) {
        self.totals[nb_players.min(MAX_NUMBER_OF_PLAYERS)].won_without_showdown += 1;
    }

    /// Returns the counters accumulated since the previous save and advances
    /// the baseline so the next delta starts from zero.
    pub fn delta_and_update_baseline(&mut self, nb_players: usize) -> PlayerStatistics {
        let n = nb_players.min(MAX_NUMBER_OF_PLAYERS);
        let delta = self.totals[n].delta(&self.baseline[n]);
        self.baseline[n] = self.totals[n];
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_size_classes() {
        assert_eq!(TableSizeClass::from_seats(2), TableSizeClass::HeadsUp);
        assert_eq!(TableSizeClass::from_seats(3), TableSizeClass::ShortHanded);
        assert_eq!(TableSizeClass::from_seats(6), TableSizeClass::ShortHanded);
        assert_eq!(TableSizeClass::from_seats(7), TableSizeClass::FullRing);
        assert_eq!(TableSizeClass::from_seats(10), TableSizeClass::FullRing);
        assert_eq!(TableSizeClass::from_str("SH"), Some(TableSizeClass::ShortHanded));
        assert_eq!(TableSizeClass::from_str("xx"), None);
    }

    #[test]
    fn limp_and_three_bet_classification() {
        let mut u = StatisticsUpdater::new();
        u.record_action(
            6,
            GameState::Preflop,
            ActionKind::Call,
            ActionRecordContext::default(),
        );
        u.record_action(
            6,
            GameState::Preflop,
            ActionKind::Raise,
            ActionRecordContext {
                raises_before: 1,
                ..Default::default()
            },
        );
        u.record_action(
            6,
            GameState::Preflop,
            ActionKind::Call,
            ActionRecordContext {
                raises_before: 2,
                ..Default::default()
            },
        );
        let s = u.statistics(6);
        assert_eq!(s.preflop.limps, 1);
        assert_eq!(s.preflop.three_bets, 1);
        assert_eq!(s.preflop.call_three_bets, 1);
        assert_eq!(s.preflop.call_three_bets_opportunities, 1);
        assert_eq!(s.preflop.calls, 2);
        assert_eq!(s.preflop.raises, 1);
    }

    #[test]
    fn continuation_bet_tracked_for_aggressor_only() {
        let mut u = StatisticsUpdater::new();
        let aggressor = ActionRecordContext {
            is_preflop_aggressor: true,
            ..Default::default()
        };
        u.record_action(2, GameState::Flop, ActionKind::Bet, aggressor);
        u.record_action(2, GameState::Flop, ActionKind::Bet, ActionRecordContext::default());
        let s = u.statistics(2);
        assert_eq!(s.flop.bets, 2);
        assert_eq!(s.flop.continuation_bets, 1);
        assert_eq!(s.flop.continuation_bets_opportunities, 1);
    }

    #[test]
    fn delta_resets_after_baseline_update() {
        let mut u = StatisticsUpdater::new();
        u.record_street_participation(2, GameState::Preflop);
        u.record_action(
            2,
            GameState::Preflop,
            ActionKind::Check,
            ActionRecordContext::default(),
        );
        let delta = u.delta_and_update_baseline(2);
        assert_eq!(delta.preflop.hands, 1);
        assert_eq!(delta.preflop.checks, 1);
        // applying a zero delta is a no-op
        let zero = u.delta_and_update_baseline(2);
        assert_eq!(zero, PlayerStatistics::default());
    }

    #[test]
    fn aggression_ratios() {
        let mut u = StatisticsUpdater::new();
        for _ in 0..3 {
            u.record_action(
                2,
                GameState::Flop,
                ActionKind::Bet,
                ActionRecordContext::default(),
            );
        }
        u.record_action(
            2,
            GameState::Turn,
            ActionKind::Call,
            ActionRecordContext::default(),
        );
        let s = u.statistics(2);
        assert!((s.aggression_factor() - 3.0).abs() < f32::EPSILON);
        assert!((s.aggression_frequency() - 75.0).abs() < f32::EPSILON);
    }
}
