//! Opponent range estimation.
//!
//! Every seat carries an estimator of its own plausible holdings as seen by
//! the table. Each accepted action is fed through a plausibility predicate
//! family keyed by (street, action kind) and parameterized by the actor's
//! statistical profile archetype; implausible starting-hand classes are
//! pruned from the range.

use crate::actions::{ActionKind, GameState};
use crate::analysis::{analyze, PostFlopAnalysisFlags};
use crate::cards::{all_suits, Card, HoleCards};
use crate::position::Position;
use crate::range::{HandTier, StartingHand, StartingHandSet};
use crate::stats::{PlayerStatistics, MIN_HANDS_STATISTICS_ACCURATE};

/// Statistical archetype of an observed player.
///
/// Thresholds over aggression factor (AF) and aggression frequency (AFreq):
/// tight-passive means AF < 2 and AFreq < 30; maniac means AF > 3 and
/// AFreq > 50; aggressive means AF >= 2.5 or AFreq >= 35; everything else
/// is moderate. Below the sample-size floor the player is unprofiled and
/// only coarse pruning applies.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ProfileArchetype {
    Unprofiled,
    TightPassive,
    Moderate,
    Aggressive,
    Maniac,
}

impl ProfileArchetype {
    pub fn from_statistics(stats: &PlayerStatistics) -> ProfileArchetype {
        if stats.preflop.hands < MIN_HANDS_STATISTICS_ACCURATE {
            return ProfileArchetype::Unprofiled;
        }
        let af = stats.aggression_factor();
        let afreq = stats.aggression_frequency();
        if af > 3.0 && afreq > 50.0 {
            ProfileArchetype::Maniac
        } else if af < 2.0 && afreq < 30.0 {
            ProfileArchetype::TightPassive
        } else if af >= 2.5 || afreq >= 35.0 {
            ProfileArchetype::Aggressive
        } else {
            ProfileArchetype::Moderate
        }
    }
}

/// Everything a plausibility predicate may look at about one observed action.
#[derive(Debug, Clone)]
pub struct ObservedAction {
    pub street: GameState,
    pub kind: ActionKind,
    pub position: Position,
    /// Bets or raises already made in this round before the action.
    pub bets_or_raises_before: u32,
    /// Preflop raises made before the action (distinguishes open/3-bet/4-bet).
    pub preflop_raises_before: u32,
    /// The actor made the last aggressive action of the previous street.
    pub was_previous_street_aggressor: bool,
    /// The amount to call exceeded half the pot.
    pub facing_large_bet: bool,
    pub board: Vec<Card>,
}

/// Narrows one opponent's plausible holdings action by action.
#[derive(Debug, Clone)]
pub struct RangeEstimator {
    range: StartingHandSet,
}

impl Default for RangeEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl RangeEstimator {
    pub fn new() -> RangeEstimator {
        RangeEstimator {
            range: StartingHandSet::universe(),
        }
    }

    pub fn reset(&mut self) {
        self.range = StartingHandSet::universe();
    }

    pub fn range(&self) -> &StartingHandSet {
        &self.range
    }

    /// Prunes the range given an observed action. Blind posts and forced
    /// `None` resets carry no information.
    pub fn observe(&mut self, profile: ProfileArchetype, observed: &ObservedAction) {
        if observed.kind.is_blind_post() || observed.kind == ActionKind::None {
            return;
        }
        let mut pruned = self.range;
        pruned.retain(|hand| is_plausible(hand, profile, observed));
        // never collapse to an empty range; an impossible observation means
        // the model is wrong, not that the opponent holds nothing
        if !pruned.is_empty() {
            self.range = pruned;
        }
    }
}

/// Would a player with this profile plausibly take this action holding this
/// starting-hand class?
pub fn is_plausible(
    hand: StartingHand,
    profile: ProfileArchetype,
    observed: &ObservedAction,
) -> bool {
    match observed.street {
        GameState::Preflop => preflop_plausible(hand, profile, observed),
        GameState::Flop | GameState::Turn | GameState::River => {
            postflop_plausible(hand, profile, observed)
        }
        GameState::PostRiver => true,
    }
}

fn preflop_plausible(
    hand: StartingHand,
    profile: ProfileArchetype,
    observed: &ObservedAction,
) -> bool {
    use ProfileArchetype::*;
    let tier = hand.tier();
    let late_position = observed.position >= Position::Cutoff;

    match observed.kind {
        ActionKind::Fold => match profile {
            // folding always rules out the top of the range
            Unprofiled | TightPassive | Moderate => tier < HandTier::Premium,
            Aggressive => tier < HandTier::Strong,
            Maniac => tier < HandTier::Medium,
        },
        ActionKind::Check => match profile {
            // big-blind option checked: anyone aggressive would have raised
            // their premiums
            TightPassive | Unprofiled => true,
            Moderate | Aggressive | Maniac => tier < HandTier::Premium,
        },
        ActionKind::Call => {
            if observed.preflop_raises_before == 0 {
                // open limp / flat of the blind
                match profile {
                    Unprofiled => tier > HandTier::Trash,
                    TightPassive => tier > HandTier::Trash,
                    Moderate | Aggressive => {
                        tier > HandTier::Trash && tier < HandTier::Premium
                    }
                    Maniac => true,
                }
            } else {
                // calling a raise
                match profile {
                    Unprofiled => tier >= HandTier::Marginal,
                    TightPassive => tier >= HandTier::Medium,
                    Moderate | Aggressive => {
                        tier >= HandTier::Medium && tier < HandTier::Premium
                    }
                    Maniac => true,
                }
            }
        }
        ActionKind::Raise | ActionKind::AllIn => {
            if observed.preflop_raises_before == 0 {
                // open raise; late seats open wider
                match profile {
                    Unprofiled => tier > HandTier::Trash,
                    TightPassive => tier >= HandTier::Strong,
                    Moderate => {
                        if late_position {
                            tier >= HandTier::Marginal
                        } else {
                            tier >= HandTier::Medium
                        }
                    }
                    Aggressive => {
                        if late_position {
                            tier > HandTier::Trash
                        } else {
                            tier >= HandTier::Marginal
                        }
                    }
                    Maniac => true,
                }
            } else {
                // three-bet and beyond
                match profile {
                    Unprofiled => tier >= HandTier::Medium,
                    TightPassive => tier >= HandTier::Premium,
                    Moderate => tier >= HandTier::Strong,
                    Aggressive => {
                        tier >= HandTier::Medium || (hand.is_suited() && hand.is_broadway())
                    }
                    Maniac => true,
                }
            }
        }
        _ => true,
    }
}

fn postflop_plausible(
    hand: StartingHand,
    profile: ProfileArchetype,
    observed: &ObservedAction,
) -> bool {
    use ProfileArchetype::*;
    if profile == Unprofiled || profile == Maniac {
        // no reliable read, or a player whose actions carry no information
        return true;
    }
    // a class stays in the range while any of its concrete combos would
    // plausibly take the observed action
    let combos = candidate_combos(hand, &observed.board);
    if combos.is_empty() {
        return true;
    }
    combos.into_iter().any(|hole| {
        combo_plausible(analyze(hole, &observed.board), hand.tier(), profile, observed)
    })
}

fn combo_plausible(
    flags: PostFlopAnalysisFlags,
    tier: HandTier,
    profile: ProfileArchetype,
    observed: &ObservedAction,
) -> bool {
    use ProfileArchetype::*;
    let draw_heavy = flags.is_flush_possible || flags.is_straight_possible;

    match observed.kind {
        ActionKind::Check => {
            if observed.was_previous_street_aggressor
                && draw_heavy
                && matches!(profile, TightPassive | Aggressive)
            {
                // the aggressor would have protected a nut hand on a wet board
                !flags.is_nut_made_hand()
            } else {
                true
            }
        }
        ActionKind::Bet => match profile {
            TightPassive => flags.has_made_hand(),
            Moderate => flags.has_made_hand() || flags.has_draw(),
            Aggressive => {
                flags.has_made_hand() || flags.has_draw() || tier > HandTier::Trash
            }
            _ => true,
        },
        ActionKind::Raise => match profile {
            TightPassive => flags.is_nut_made_hand() || flags.is_two_pair,
            Moderate => {
                if observed.street == GameState::River {
                    // river raises are value-heavy; a bare pair would only call
                    flags.is_nut_made_hand() || flags.is_two_pair
                } else {
                    flags.has_made_hand()
                }
            }
            Aggressive => flags.has_made_hand() || flags.has_draw(),
            _ => true,
        },
        ActionKind::Call => {
            if observed.street == GameState::River && observed.facing_large_bet {
                // bluff-catchers stay; the nuts would have raised, air folds
                let would_have_raised = flags.is_full_house || flags.is_quads;
                let can_catch_bluffs = flags.has_made_hand();
                match profile {
                    TightPassive | Moderate => can_catch_bluffs && !would_have_raised,
                    Aggressive => can_catch_bluffs,
                    _ => true,
                }
            } else {
                match profile {
                    TightPassive => flags.has_made_hand() || flags.has_draw(),
                    _ => true,
                }
            }
        }
        ActionKind::AllIn => match profile {
            TightPassive | Moderate => flags.is_nut_made_hand() || flags.is_two_pair,
            Aggressive => {
                flags.is_nut_made_hand() || flags.is_two_pair || flags.has_draw()
            }
            _ => true,
        },
        ActionKind::Fold => true,
        _ => true,
    }
}

/// Concrete two-card holdings of the class that do not collide with the
/// board: one combo for pairs, one per suit for suited classes, one per
/// high-card suit for offsuit classes.
fn candidate_combos(hand: StartingHand, board: &[Card]) -> Vec<HoleCards> {
    let on_board = |c: &Card| board.contains(c);
    let mut combos = Vec::new();

    if hand.is_pair() {
        let free: Vec<Card> = all_suits()
            .into_iter()
            .map(|s| Card::new(hand.high(), s))
            .filter(|c| !on_board(c))
            .collect();
        if free.len() >= 2 {
            combos.extend(HoleCards::new(free[0], free[1]));
        }
        return combos;
    }

    if hand.is_suited() {
        for suit in all_suits() {
            let first = Card::new(hand.high(), suit);
            let second = Card::new(hand.low(), suit);
            if !on_board(&first) && !on_board(&second) {
                combos.extend(HoleCards::new(first, second));
            }
        }
        return combos;
    }

    for high_suit in all_suits() {
        let first = Card::new(hand.high(), high_suit);
        if on_board(&first) {
            continue;
        }
        let second = all_suits()
            .into_iter()
            .filter(|&s| s != high_suit)
            .map(|s| Card::new(hand.low(), s))
            .find(|c| !on_board(c));
        if let Some(second) = second {
            combos.extend(HoleCards::new(first, second));
        }
    }
    combos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Vec<Card> {
        s.split_whitespace().map(|c| c.parse().unwrap()).collect()
    }

    fn observed(street: GameState, kind: ActionKind) -> ObservedAction {
        ObservedAction {
            street,
            kind,
            position: Position::Middle,
            bets_or_raises_before: 0,
            preflop_raises_before: 0,
            was_previous_street_aggressor: false,
            facing_large_bet: false,
            board: Vec::new(),
        }
    }

    #[test]
    fn profile_thresholds() {
        let mut stats = PlayerStatistics::default();
        stats.preflop.hands = 100;
        // AF = 4, AFreq = 4/5 = 80%
        stats.flop.bets = 40;
        stats.flop.calls = 10;
        assert_eq!(
            ProfileArchetype::from_statistics(&stats),
            ProfileArchetype::Maniac
        );

        let mut passive = PlayerStatistics::default();
        passive.preflop.hands = 100;
        passive.flop.bets = 10;
        passive.flop.calls = 40;
        passive.flop.checks = 40;
        assert_eq!(
            ProfileArchetype::from_statistics(&passive),
            ProfileArchetype::TightPassive
        );

        let fresh = PlayerStatistics::default();
        assert_eq!(
            ProfileArchetype::from_statistics(&fresh),
            ProfileArchetype::Unprofiled
        );
    }

    #[test]
    fn unprofiled_preflop_fold_still_prunes_premiums() {
        let mut estimator = RangeEstimator::new();
        estimator.observe(
            ProfileArchetype::Unprofiled,
            &observed(GameState::Preflop, ActionKind::Fold),
        );
        assert!(!estimator.range().contains("AA".parse().unwrap()));
        assert!(estimator.range().contains("72o".parse().unwrap()));
    }

    #[test]
    fn unprofiled_preflop_raise_prunes_trash() {
        let mut estimator = RangeEstimator::new();
        estimator.observe(
            ProfileArchetype::Unprofiled,
            &observed(GameState::Preflop, ActionKind::Raise),
        );
        assert!(!estimator.range().contains("72o".parse().unwrap()));
        assert!(estimator.range().contains("AA".parse().unwrap()));
    }

    #[test]
    fn tight_passive_check_on_wet_flop_prunes_nut_hands() {
        // previous aggressor checks a draw-heavy flop
        let mut obs = observed(GameState::Flop, ActionKind::Check);
        obs.board = board("Jh Th 9h");
        obs.was_previous_street_aggressor = true;
        let mut estimator = RangeEstimator::new();
        estimator.observe(ProfileArchetype::TightPassive, &obs);
        // a made straight is no longer plausible
        assert!(!estimator.range().contains("KQo".parse().unwrap()));
        // a bare pair class is still plausible
        assert!(estimator.range().contains("A2o".parse().unwrap()));
    }

    #[test]
    fn maniac_three_bet_keeps_strong_broadways() {
        let mut obs = observed(GameState::Preflop, ActionKind::Raise);
        obs.position = Position::Button;
        obs.preflop_raises_before = 1;
        let mut estimator = RangeEstimator::new();
        estimator.observe(ProfileArchetype::Maniac, &obs);
        assert!(estimator.range().contains("KQs".parse().unwrap()));
        assert!(estimator.range().contains("AJo".parse().unwrap()));
    }

    #[test]
    fn tight_passive_three_bet_is_premium_only() {
        let mut obs = observed(GameState::Preflop, ActionKind::Raise);
        obs.preflop_raises_before = 1;
        let mut estimator = RangeEstimator::new();
        estimator.observe(ProfileArchetype::TightPassive, &obs);
        assert!(estimator.range().contains("AA".parse().unwrap()));
        assert!(!estimator.range().contains("87s".parse().unwrap()));
    }

    #[test]
    fn moderate_big_river_call_keeps_bluff_catchers() {
        let mut obs = observed(GameState::River, ActionKind::Call);
        obs.board = board("Kc Kd 7s 4h 2c");
        obs.facing_large_bet = true;
        let mut estimator = RangeEstimator::new();
        estimator.observe(ProfileArchetype::Moderate, &obs);
        // nut full house would have raised
        assert!(!estimator.range().contains("KK".parse().unwrap()));
        // air cannot call
        assert!(!estimator.range().contains("QJs".parse().unwrap()));
        // a pocket-pair bluff-catcher stays
        assert!(estimator.range().contains("99".parse().unwrap()));
    }

    #[test]
    fn blind_posts_carry_no_information() {
        let mut estimator = RangeEstimator::new();
        estimator.observe(
            ProfileArchetype::Aggressive,
            &observed(GameState::Preflop, ActionKind::PostBigBlind),
        );
        assert_eq!(estimator.range().len(), crate::range::NUM_STARTING_HANDS);
    }

    #[test]
    fn unprofiled_postflop_actions_are_not_read() {
        let mut obs = observed(GameState::Flop, ActionKind::Bet);
        obs.board = board("Kc 7d 2s");
        let mut estimator = RangeEstimator::new();
        estimator.observe(ProfileArchetype::Unprofiled, &obs);
        assert_eq!(estimator.range().len(), crate::range::NUM_STARTING_HANDS);
    }

    #[test]
    fn aggressive_flop_raise_keeps_semi_bluff_draws() {
        let mut obs = observed(GameState::Flop, ActionKind::Raise);
        obs.board = board("Kh 7h 2s");
        obs.bets_or_raises_before = 1;
        let mut estimator = RangeEstimator::new();
        estimator.observe(ProfileArchetype::Aggressive, &obs);
        // a flush draw can raise as a semi-bluff
        assert!(estimator.range().contains("AQs".parse().unwrap()));
        // total air cannot
        assert!(!estimator.range().contains("J4o".parse().unwrap()));
    }

    #[test]
    fn moderate_river_raise_is_value_heavy() {
        let mut obs = observed(GameState::River, ActionKind::Raise);
        obs.board = board("Kc 9d 5s 3h 2c");
        obs.bets_or_raises_before = 1;
        let mut estimator = RangeEstimator::new();
        estimator.observe(ProfileArchetype::Moderate, &obs);
        // two pair raises for value
        assert!(estimator.range().contains("K9s".parse().unwrap()));
        // a bare middle pair would only call
        assert!(!estimator.range().contains("A9o".parse().unwrap()));
    }

    #[test]
    fn tight_passive_bet_means_a_made_hand() {
        let mut obs = observed(GameState::Turn, ActionKind::Bet);
        obs.board = board("Kc 9d 5s 2h");
        let mut estimator = RangeEstimator::new();
        estimator.observe(ProfileArchetype::TightPassive, &obs);
        assert!(estimator.range().contains("KQo".parse().unwrap()));
        assert!(!estimator.range().contains("QJo".parse().unwrap()));
    }

    #[test]
    fn pruning_never_empties_a_range() {
        let mut estimator = RangeEstimator::new();
        let mut obs = observed(GameState::Preflop, ActionKind::Raise);
        obs.preflop_raises_before = 1;
        estimator.observe(ProfileArchetype::TightPassive, &obs);
        // a tight-passive player folding now contradicts the premium-only
        // range; the estimator keeps the last consistent set instead of
        // emptying it
        estimator.observe(
            ProfileArchetype::TightPassive,
            &observed(GameState::Preflop, ActionKind::Fold),
        );
        assert!(!estimator.range().is_empty());
    }
}
