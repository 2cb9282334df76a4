//! Player seat state: identity, stack, per-hand action log, hole cards.

use crate::actions::{ActionKind, GameState, PlayerAction};
use crate::cards::HoleCards;
use crate::errors::EngineError;
use crate::estimator::RangeEstimator;
use crate::position::Position;
use crate::stats::StatisticsUpdater;

/// The per-hand record of one player's committed chips and actions, one slot
/// per betting round. Reset when the hand ends.
#[derive(Debug, Clone, Default)]
pub struct CurrentHandActions {
    actions: [Vec<(ActionKind, u32)>; 4],
    bets: [u32; 4],
}

impl CurrentHandActions {
    pub fn record(&mut self, round: GameState, kind: ActionKind, amount: u32) {
        if let Some(i) = round.round_index() {
            self.actions[i].push((kind, amount));
        }
    }

    pub fn add_bet(&mut self, round: GameState, delta: u32) {
        if let Some(i) = round.round_index() {
            self.bets[i] += delta;
        }
    }

    pub fn actions(&self, round: GameState) -> &[(ActionKind, u32)] {
        match round.round_index() {
            Some(i) => &self.actions[i],
            None => &[],
        }
    }

    /// Chips committed in one round.
    pub fn round_total_bet(&self, round: GameState) -> u32 {
        round.round_index().map(|i| self.bets[i]).unwrap_or(0)
    }

    /// Chips committed across the whole hand.
    pub fn hand_total_bet(&self) -> u32 {
        self.bets.iter().sum()
    }

    pub fn reset(&mut self) {
        for a in &mut self.actions {
            a.clear();
        }
        self.bets = [0; 4];
    }
}

/// One seat at the table. Owned by the session between hands and moved into
/// the hand for its duration.
#[derive(Debug)]
pub struct Player {
    id: u32,
    name: String,
    strategy_name: String,
    cash: u32,
    cash_at_hand_start: u32,
    last_money_won: u32,
    position: Position,
    hole_cards: Option<HoleCards>,
    hand_ranking: u32,
    last_action: PlayerAction,
    current_hand_actions: CurrentHandActions,
    statistics: StatisticsUpdater,
    range: RangeEstimator,
}

impl Player {
    pub fn new(id: u32, name: impl Into<String>, strategy_name: impl Into<String>, cash: u32) -> Player {
        Player {
            id,
            name: name.into(),
            strategy_name: strategy_name.into(),
            cash,
            cash_at_hand_start: cash,
            last_money_won: 0,
            position: Position::Unknown,
            hole_cards: None,
            hand_ranking: 0,
            last_action: PlayerAction::none(id),
            current_hand_actions: CurrentHandActions::default(),
            statistics: StatisticsUpdater::new(),
            range: RangeEstimator::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    pub fn cash(&self) -> u32 {
        self.cash
    }

    pub fn cash_at_hand_start(&self) -> u32 {
        self.cash_at_hand_start
    }

    pub fn last_money_won(&self) -> u32 {
        self.last_money_won
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn hole_cards(&self) -> Option<HoleCards> {
        self.hole_cards
    }

    pub fn set_hole_cards(&mut self, cards: HoleCards) {
        self.hole_cards = Some(cards);
    }

    pub fn hand_ranking(&self) -> u32 {
        self.hand_ranking
    }

    pub fn set_hand_ranking(&mut self, ranking: u32) {
        self.hand_ranking = ranking;
    }

    pub fn last_action(&self) -> PlayerAction {
        self.last_action
    }

    pub fn set_last_action(&mut self, action: PlayerAction) {
        self.last_action = action;
    }

    pub fn current_hand_actions(&self) -> &CurrentHandActions {
        &self.current_hand_actions
    }

    pub fn statistics_updater(&self) -> &StatisticsUpdater {
        &self.statistics
    }

    pub fn statistics_updater_mut(&mut self) -> &mut StatisticsUpdater {
        &mut self.statistics
    }

    pub fn range_estimator(&self) -> &RangeEstimator {
        &self.range
    }

    pub fn range_estimator_mut(&mut self) -> &mut RangeEstimator {
        &mut self.range
    }

    pub fn is_folded(&self) -> bool {
        self.last_action.kind == ActionKind::Fold
    }

    /// Out of chips without having folded.
    pub fn is_all_in(&self) -> bool {
        self.cash == 0 && !self.is_folded()
    }

    /// Total committed this hand; mirrors `cash_at_hand_start - cash` until
    /// winnings are awarded.
    pub fn total_bet_amount(&self) -> u32 {
        self.current_hand_actions.hand_total_bet()
    }

    pub fn round_bet_amount(&self, round: GameState) -> u32 {
        self.current_hand_actions.round_total_bet(round)
    }

    /// Moves chips from the stack into the current round's commitment.
    pub fn commit_chips(&mut self, round: GameState, delta: u32) -> Result<(), EngineError> {
        if delta > self.cash {
            return Err(EngineError::InvariantViolated(format!(
                "player {} committing {} with only {} behind",
                self.id, delta, self.cash
            )));
        }
        self.cash -= delta;
        self.current_hand_actions.add_bet(round, delta);
        Ok(())
    }

    pub fn record_action(&mut self, round: GameState, kind: ActionKind, amount: u32) {
        self.current_hand_actions.record(round, kind, amount);
    }

    /// Credits winnings from the pot.
    pub fn award(&mut self, amount: u32) {
        self.cash += amount;
        self.last_money_won += amount;
    }

    pub fn clear_last_money_won(&mut self) {
        self.last_money_won = 0;
    }

    /// Clears the per-hand action log and hole cards once the hand's
    /// accounting is done; the seat is ready for the next hand.
    pub fn reset_current_hand_actions(&mut self) {
        self.current_hand_actions.reset();
        self.hole_cards = None;
    }

    /// Prepares the seat for a fresh hand in the same chair.
    pub fn reset_for_new_hand(&mut self) {
        self.cash_at_hand_start = self.cash;
        self.last_money_won = 0;
        self.hole_cards = None;
        self.hand_ranking = 0;
        self.last_action = PlayerAction::none(self.id);
        self.current_hand_actions.reset();
        self.range.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committed_chips_match_stack_movement() {
        let mut p = Player::new(0, "p0", "UltraTight", 1000);
        p.reset_for_new_hand();
        p.commit_chips(GameState::Preflop, 20).unwrap();
        p.commit_chips(GameState::Flop, 200).unwrap();
        assert_eq!(p.cash(), 780);
        assert_eq!(p.total_bet_amount(), 220);
        assert_eq!(p.round_bet_amount(GameState::Flop), 200);
        assert_eq!(p.cash_at_hand_start() - p.cash(), p.total_bet_amount());
    }

    #[test]
    fn cannot_commit_more_than_stack() {
        let mut p = Player::new(0, "p0", "UltraTight", 50);
        assert!(p.commit_chips(GameState::Preflop, 51).is_err());
    }

    #[test]
    fn reset_clears_hand_state() {
        let mut p = Player::new(0, "p0", "UltraTight", 1000);
        p.commit_chips(GameState::Preflop, 100).unwrap();
        p.record_action(GameState::Preflop, ActionKind::Call, 100);
        p.set_last_action(PlayerAction::new(0, ActionKind::Call, 100));
        p.award(300);
        p.reset_for_new_hand();
        assert_eq!(p.cash_at_hand_start(), 1200);
        assert_eq!(p.total_bet_amount(), 0);
        assert_eq!(p.last_money_won(), 0);
        assert_eq!(p.last_action().kind, ActionKind::None);
        assert!(p.hole_cards().is_none());
    }

    #[test]
    fn all_in_requires_empty_stack() {
        let mut p = Player::new(0, "p0", "UltraTight", 100);
        assert!(!p.is_all_in());
        p.commit_chips(GameState::Preflop, 100).unwrap();
        assert!(p.is_all_in());
        p.set_last_action(PlayerAction::new(0, ActionKind::Fold, 0));
        assert!(!p.is_all_in());
    }
}
