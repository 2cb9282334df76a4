//! The hand state machine: Preflop -> Flop -> Turn -> River -> PostRiver.
//!
//! A `Hand` owns the seats for its duration, drives the betting protocol,
//! and emits events at every observable transition. State transitions are
//! computed as pure values from (players in hand, acting list, round
//! completion) and then entered with their side effects.

use std::rc::Rc;

use crate::actions::{ActionKind, BettingTracker, GameState, PlayerAction};
use crate::board::Board;
use crate::cards::HoleCards;
use crate::context::{
    BettingContext, CurrentHandContext, OpponentRatios, OpponentSummary, PersonalContext,
    PlayersContext, PreflopRaiser,
};
use crate::deck::Deck;
use crate::errors::EngineError;
use crate::estimator::{ObservedAction, ProfileArchetype};
use crate::eval::HandEvaluator;
use crate::events::GameEvents;
use crate::logger::ActionRecord;
use crate::player::Player;
use crate::position::{assign_positions, Position};
use crate::pot::{Pot, PotResult};
use crate::stats::ActionRecordContext;
use crate::validator::{legal_action_kinds, validate_player_action, RejectReason};

pub struct Hand {
    seats: Vec<Player>,
    acting: Vec<u32>,
    dealer_id: u32,
    small_blind: u32,
    state: GameState,
    board: Board,
    deck: Deck,
    tracker: BettingTracker,
    evaluator: Rc<dyn HandEvaluator>,
    last_aggressor_id: Option<u32>,
    runout: bool,
    completed: bool,
    result: Option<PotResult>,
    action_log: Vec<ActionRecord>,
}

impl Hand {
    /// Builds a hand over the given seats. Positions are assigned from the
    /// dealer and every seat is reset for the new hand. `begin` must be
    /// called next to enter Preflop.
    pub fn new(
        mut seats: Vec<Player>,
        dealer_id: u32,
        small_blind: u32,
        deck: Deck,
        evaluator: Rc<dyn HandEvaluator>,
    ) -> Result<Hand, EngineError> {
        if small_blind == 0 {
            return Err(EngineError::InvalidConfiguration(
                "small blind must be positive".into(),
            ));
        }
        let dealer_index = seats
            .iter()
            .position(|p| p.id() == dealer_id)
            .ok_or(EngineError::PlayerNotFound(dealer_id))?;
        let positions = assign_positions(seats.len(), dealer_index)?;
        for (seat, position) in seats.iter_mut().zip(positions) {
            seat.reset_for_new_hand();
            seat.set_position(position);
        }
        let acting = seats.iter().map(|p| p.id()).collect();
        Ok(Hand {
            seats,
            acting,
            dealer_id,
            small_blind,
            state: GameState::Preflop,
            board: Board::new(),
            deck,
            tracker: BettingTracker::new(),
            evaluator,
            last_aggressor_id: None,
            runout: false,
            completed: false,
            result: None,
            action_log: Vec::new(),
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn small_blind(&self) -> u32 {
        self.small_blind
    }

    pub fn big_blind(&self) -> u32 {
        2 * self.small_blind
    }

    pub fn dealer_id(&self) -> u32 {
        self.dealer_id
    }

    pub fn seats(&self) -> &[Player] {
        &self.seats
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tracker(&self) -> &BettingTracker {
        &self.tracker
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn result(&self) -> Option<&PotResult> {
        self.result.as_ref()
    }

    pub fn action_history(&self) -> &[ActionRecord] {
        &self.action_log
    }

    /// Total chips committed by every seat across the hand so far.
    pub fn pot_total(&self) -> u32 {
        self.seats.iter().map(|p| p.total_bet_amount()).sum()
    }

    /// Chips committed in the current round by every seat.
    pub fn sets_total(&self) -> u32 {
        self.seats
            .iter()
            .map(|p| p.round_bet_amount(self.state))
            .sum()
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.seats.iter().find(|p| p.id() == id)
    }

    pub fn legal_actions(&self, player_id: u32) -> Vec<ActionKind> {
        match self.player(player_id) {
            Some(p) if self.acting.contains(&player_id) => {
                legal_action_kinds(p, &self.tracker, self.small_blind, self.state)
            }
            _ => Vec::new(),
        }
    }

    /// Enters Preflop: deals hole cards, posts the blinds, and (in the
    /// degenerate all-in cases) advances further.
    pub fn begin(&mut self, events: &mut GameEvents) -> Result<(), EngineError> {
        if let Some(cb) = &mut events.on_betting_round_started {
            cb(GameState::Preflop);
        }
        self.tracker.reset_for_round();
        self.tracker.update_round_highest_set(self.big_blind());
        for p in self.seats.iter_mut() {
            let id = p.id();
            p.set_last_action(PlayerAction::none(id));
        }

        // hole cards, in seat order
        for i in 0..self.seats.len() {
            let cards = self.deck.deal(2)?;
            let hole = HoleCards::new(cards[0], cards[1]).ok_or_else(|| {
                EngineError::InvariantViolated("duplicate card dealt".into())
            })?;
            self.seats[i].set_hole_cards(hole);
            if let Some(cb) = &mut events.on_hole_cards_dealt {
                cb(self.seats[i].id(), hole);
            }
        }

        let nb_players = self.seats.len();
        for p in self.seats.iter_mut() {
            p.statistics_updater_mut()
                .record_street_participation(nb_players, GameState::Preflop);
        }

        self.post_blinds(events)?;
        if let Some(cb) = &mut events.on_pot_updated {
            cb(self.pot_total());
        }
        self.advance_if_complete(events)
    }

    fn post_blinds(&mut self, events: &mut GameEvents) -> Result<(), EngineError> {
        // small blind first, then big blind, regardless of seat indices
        let sb_id = self
            .seats
            .iter()
            .find(|p| p.position().is_small_blind())
            .map(|p| p.id());
        let bb_id = self
            .seats
            .iter()
            .find(|p| p.position() == Position::BigBlind)
            .map(|p| p.id());
        let posts = [
            (sb_id, self.small_blind, ActionKind::PostSmallBlind),
            (bb_id, self.big_blind(), ActionKind::PostBigBlind),
        ];
        for (id, blind, kind) in posts {
            let id = match id {
                Some(id) if self.acting.contains(&id) => id,
                _ => continue,
            };
            let idx = match self.seat_index(id) {
                Some(i) => i,
                None => continue,
            };

            let cash = self.seats[idx].cash();
            let (kind, amount) = if cash < blind {
                (ActionKind::AllIn, cash)
            } else {
                (kind, blind)
            };
            self.seats[idx].commit_chips(GameState::Preflop, amount)?;
            self.seats[idx].record_action(GameState::Preflop, kind, amount);
            let action = PlayerAction::new(id, kind, amount);
            self.seats[idx].set_last_action(action);
            self.tracker.record_player_action(GameState::Preflop, &action);
            self.log_action(GameState::Preflop, id, kind, amount);
            if kind == ActionKind::AllIn {
                self.acting.retain(|&x| x != id);
            }
            if let Some(cb) = &mut events.on_player_acted {
                cb(action);
            }
        }
        Ok(())
    }

    /// The player expected to act next, or `None` when no action is
    /// solicited (hand complete, runout, or showdown).
    pub fn next_to_act(&self) -> Option<u32> {
        if self.completed || self.runout || self.state == GameState::PostRiver {
            return None;
        }
        if self.acting.is_empty() {
            return None;
        }
        if let Some(history) = self.tracker.round_history(self.state) {
            for &(actor_id, kind) in history.actions.iter().rev() {
                if kind.is_blind_post() {
                    continue;
                }
                if let Some(start) = self.seat_index(actor_id) {
                    return self.next_acting_clockwise(start);
                }
            }
        }
        // round has seen no voluntary action yet
        if self.state == GameState::Preflop {
            let bb = self
                .seats
                .iter()
                .position(|p| p.position() == Position::BigBlind);
            match bb {
                Some(start) => self.next_acting_clockwise(start),
                None => self.acting.first().copied(),
            }
        } else {
            let dealer = self.seats.iter().position(|p| p.id() == self.dealer_id)?;
            self.next_acting_clockwise(dealer)
        }
    }

    fn next_acting_clockwise(&self, start: usize) -> Option<u32> {
        let n = self.seats.len();
        for step in 1..=n {
            let id = self.seats[(start + step) % n].id();
            if self.acting.contains(&id) {
                return Some(id);
            }
        }
        None
    }

    /// A betting round is complete when every acting player has taken a
    /// voluntary action and matched the round's highest set. Blind posts do
    /// not satisfy completion on their own.
    pub fn round_complete(&self) -> bool {
        if self.runout {
            return true;
        }
        let highest = self.tracker.round_highest_set();
        self.acting.iter().all(|&id| {
            let p = match self.player(id) {
                Some(p) => p,
                None => return true,
            };
            let last = p.last_action().kind;
            if matches!(
                last,
                ActionKind::None | ActionKind::PostSmallBlind | ActionKind::PostBigBlind
            ) {
                return false;
            }
            p.round_bet_amount(self.state) >= highest
        })
    }

    /// Validates and applies one action, then advances the state machine as
    /// far as it will go.
    pub fn handle_player_action(
        &mut self,
        action: PlayerAction,
        events: &mut GameEvents,
    ) -> Result<(), EngineError> {
        if self.completed || self.state == GameState::PostRiver {
            return Err(EngineError::HandAlreadyComplete);
        }
        if self.next_to_act() != Some(action.player_id) {
            return self.reject(action, RejectReason::OutOfTurn, events);
        }
        {
            let acting_refs: Vec<&Player> = self
                .seats
                .iter()
                .filter(|p| self.acting.contains(&p.id()))
                .collect();
            if let Err(reason) = validate_player_action(
                &acting_refs,
                &action,
                &self.tracker,
                self.small_blind,
                self.state,
            ) {
                return self.reject(action, reason, events);
            }
        }

        let state = self.state;
        let nb_players = self.seats.len();
        let idx = self
            .seat_index(action.player_id)
            .ok_or(EngineError::PlayerNotFound(action.player_id))?;

        // facts gathered before any mutation
        let raises_before = self.tracker.raises_number(state);
        let bets_or_raises_before = self.tracker.bets_or_raises_number(state);
        let preflop_raises_before = self.tracker.raises_number(GameState::Preflop);
        let preflop_aggressor = self.tracker.last_raiser_in_round(GameState::Preflop);
        let highest = self.tracker.round_highest_set();
        let committed = self.seats[idx].round_bet_amount(state);
        let cash = self.seats[idx].cash();
        let pot_before = self.pot_total();
        let to_call = highest.saturating_sub(committed);
        let previous_street_aggressor = match state {
            GameState::Flop => self.tracker.last_raiser_in_round(GameState::Preflop),
            GameState::Turn => self.tracker.last_raiser_in_round(GameState::Flop),
            GameState::River => self.tracker.last_raiser_in_round(GameState::Turn),
            _ => None,
        };

        let (kind, delta) = match action.kind {
            ActionKind::Fold => (ActionKind::Fold, 0),
            ActionKind::Check => (ActionKind::Check, 0),
            ActionKind::Call => {
                let d = to_call.min(cash);
                (
                    if d == cash {
                        ActionKind::AllIn
                    } else {
                        ActionKind::Call
                    },
                    d,
                )
            }
            ActionKind::Bet => {
                let d = action.amount;
                (
                    if d == cash {
                        ActionKind::AllIn
                    } else {
                        ActionKind::Bet
                    },
                    d,
                )
            }
            ActionKind::Raise => {
                let d = action.amount.saturating_sub(committed);
                (
                    if d == cash {
                        ActionKind::AllIn
                    } else {
                        ActionKind::Raise
                    },
                    d,
                )
            }
            ActionKind::AllIn => (ActionKind::AllIn, cash),
            _ => return self.reject(action, RejectReason::IllegalActionKind, events),
        };
        let total = committed + delta;
        let recorded_amount = match kind {
            ActionKind::Fold | ActionKind::Check => 0,
            _ => total,
        };

        let player_id = action.player_id;
        let position = self.seats[idx].position();
        {
            let p = &mut self.seats[idx];
            p.commit_chips(state, delta)?;
            p.record_action(state, kind, recorded_amount);
            p.set_last_action(PlayerAction::new(player_id, kind, recorded_amount));
            p.statistics_updater_mut().record_action(
                nb_players,
                state,
                action.kind,
                ActionRecordContext {
                    raises_before,
                    bets_or_raises_before,
                    is_preflop_aggressor: preflop_aggressor == Some(player_id),
                },
            );
        }

        let normalized = PlayerAction::new(player_id, kind, recorded_amount);
        self.tracker.record_player_action(state, &normalized);
        self.log_action(state, player_id, kind, recorded_amount);
        if kind.is_aggressive() && total > highest {
            self.tracker.record_raise(player_id, committed);
            self.tracker.update_round_highest_set(total);
            self.last_aggressor_id = Some(player_id);
        }
        self.board.set_last_action_player_id(player_id);
        if matches!(kind, ActionKind::Fold | ActionKind::AllIn) {
            self.acting.retain(|&x| x != player_id);
        }

        // feed the observation into the actor's range estimator
        let observed = ObservedAction {
            street: state,
            kind,
            position,
            bets_or_raises_before,
            preflop_raises_before,
            was_previous_street_aggressor: previous_street_aggressor == Some(player_id),
            facing_large_bet: pot_before > 0 && to_call > pot_before / 2,
            board: self.board.board_cards().cards().to_vec(),
        };
        {
            let p = &mut self.seats[idx];
            let profile =
                ProfileArchetype::from_statistics(p.statistics_updater().statistics(nb_players));
            p.range_estimator_mut().observe(profile, &observed);
        }

        if let Some(cb) = &mut events.on_player_acted {
            cb(normalized);
        }
        if let Some(cb) = &mut events.on_pot_updated {
            cb(self.pot_total());
        }
        if let Some(cb) = &mut events.on_player_chips_updated {
            cb(player_id, self.seats[idx].cash());
        }

        self.advance_if_complete(events)
    }

    fn reject(
        &mut self,
        action: PlayerAction,
        reason: RejectReason,
        events: &mut GameEvents,
    ) -> Result<(), EngineError> {
        if let Some(cb) = &mut events.on_invalid_player_action {
            cb(action.player_id, action, &reason.to_string());
        }
        Err(EngineError::ActionRejected {
            player_id: action.player_id,
            reason,
        })
    }

    fn players_in_hand(&self) -> usize {
        self.seats.iter().filter(|p| !p.is_folded()).count()
    }

    fn advance_if_complete(&mut self, events: &mut GameEvents) -> Result<(), EngineError> {
        loop {
            if self.completed || self.state == GameState::PostRiver {
                return Ok(());
            }
            let next = if self.players_in_hand() < 2 {
                // everyone else folded; the hand ends regardless of the round
                GameState::PostRiver
            } else if self.acting.is_empty() {
                // all contestants are all-in; run the board out street by street
                self.runout = true;
                self.board.set_all_in_condition(true);
                next_street(self.state)
            } else if self.round_complete() {
                if self.acting.len() <= 1 {
                    // one live player against all-ins; betting is over
                    self.runout = true;
                    self.board.set_all_in_condition(true);
                }
                next_street(self.state)
            } else {
                return Ok(());
            };
            self.enter_state(next, events)?;
        }
    }

    fn enter_state(
        &mut self,
        next: GameState,
        events: &mut GameEvents,
    ) -> Result<(), EngineError> {
        self.state = next;
        if let Some(cb) = &mut events.on_betting_round_started {
            cb(next);
        }
        match next {
            GameState::Flop | GameState::Turn | GameState::River => {
                self.tracker.reset_for_round();
                for p in self.seats.iter_mut() {
                    let id = p.id();
                    if self.acting.contains(&id) {
                        p.set_last_action(PlayerAction::none(id));
                    }
                }
                self.deal_board_cards(next)?;
                if let Some(cb) = &mut events.on_board_cards_dealt {
                    cb(self.board.board_cards());
                }
                let nb_players = self.seats.len();
                for p in self.seats.iter_mut() {
                    if !p.is_folded() {
                        p.statistics_updater_mut()
                            .record_street_participation(nb_players, next);
                    }
                }
                Ok(())
            }
            GameState::PostRiver => self.enter_post_river(events),
            GameState::Preflop => Err(EngineError::InvariantViolated(
                "re-entering Preflop mid-hand".into(),
            )),
        }
    }

    fn deal_board_cards(&mut self, state: GameState) -> Result<(), EngineError> {
        let board = self.board.board_cards_mut();
        match state {
            GameState::Flop if board.num_cards() == 0 => {
                self.deck.burn_card();
                let cards = self.deck.deal(3)?;
                board.deal_flop([cards[0], cards[1], cards[2]])
            }
            GameState::Turn if board.num_cards() == 3 => {
                self.deck.burn_card();
                let cards = self.deck.deal(1)?;
                board.deal_turn(cards[0])
            }
            GameState::River if board.num_cards() == 4 => {
                self.deck.burn_card();
                let cards = self.deck.deal(1)?;
                board.deal_river(cards[0])
            }
            _ => Ok(()),
        }
    }

    fn enter_post_river(&mut self, events: &mut GameEvents) -> Result<(), EngineError> {
        for p in self.seats.iter_mut() {
            let id = p.id();
            if self.acting.contains(&id) {
                p.set_last_action(PlayerAction::none(id));
            }
        }

        let in_hand: Vec<usize> = self
            .seats
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_folded())
            .map(|(i, _)| i)
            .collect();
        let showdown = in_hand.len() >= 2;

        if showdown {
            // rank every contestant against the full board
            let board_text: Vec<String> = self
                .board
                .board_cards()
                .cards()
                .iter()
                .map(|c| c.to_string())
                .collect();
            if board_text.len() != 5 {
                return Err(EngineError::InvariantViolated(format!(
                    "showdown on a {}-card board",
                    board_text.len()
                )));
            }
            for &i in &in_hand {
                let hole = self.seats[i].hole_cards().ok_or_else(|| {
                    EngineError::InvariantViolated("contestant without hole cards".into())
                })?;
                let seven = format!(
                    "{} {} {}",
                    board_text.join(" "),
                    hole.first,
                    hole.second
                );
                let rank = self.evaluator.rank_hand(&seven)?;
                self.seats[i].set_hand_ranking(rank);
            }
        }

        let contributions: Vec<u32> = self
            .seats
            .iter()
            .map(|p| p.cash_at_hand_start().saturating_sub(p.cash()))
            .collect();
        let total: u32 = contributions.iter().sum();

        let result = Pot::new(total, self.dealer_id).distribute(&mut self.seats);
        for p in &self.seats {
            if let Some(cb) = &mut events.on_player_chips_updated {
                cb(p.id(), p.cash());
            }
        }

        // chip conservation check
        let before: u32 = self.seats.iter().map(|p| p.cash_at_hand_start()).sum();
        let after: u32 = self.seats.iter().map(|p| p.cash()).sum();
        if before != after {
            let message = format!(
                "pot distribution lost chips: {} before, {} after",
                before, after
            );
            if let Some(cb) = &mut events.on_engine_error {
                cb(&message);
            }
            return Err(EngineError::InvariantViolated(message));
        }

        let nb_players = self.seats.len();
        if showdown {
            for &i in &in_hand {
                let won = result.winners.contains(&self.seats[i].id());
                self.seats[i]
                    .statistics_updater_mut()
                    .record_showdown(nb_players, won);
            }
            // the last aggressor shows first; in a checked-down pot the
            // first seat to act after the dealer does
            match self.last_aggressor_id {
                Some(aggressor) => self.board.set_last_action_player_id(aggressor),
                None => {
                    if let Some(dealer) = self.seat_index(self.dealer_id) {
                        let n = self.seats.len();
                        for step in 1..=n {
                            let p = &self.seats[(dealer + step) % n];
                            if !p.is_folded() {
                                let id = p.id();
                                self.board.set_last_action_player_id(id);
                                break;
                            }
                        }
                    }
                }
            }
            self.board.determine_reveal_order(&self.seats, &contributions);
            if let Some(cb) = &mut events.on_showdown_reveal_order {
                cb(self.board.reveal_order());
            }
        } else if let Some(&winner_idx) = in_hand.first() {
            self.seats[winner_idx]
                .statistics_updater_mut()
                .record_win_without_showdown(nb_players);
        }

        self.board.set_winners(result.winners.clone());
        if let Some(cb) = &mut events.on_hand_completed {
            cb(&result.winners, result.total);
        }

        for p in self.seats.iter_mut() {
            p.reset_current_hand_actions();
        }

        self.result = Some(result);
        self.completed = true;
        Ok(())
    }

    /// Builds the read-only snapshot a strategy consumes.
    pub fn make_context(&self, player_id: u32) -> Result<CurrentHandContext, EngineError> {
        let p = self
            .player(player_id)
            .ok_or(EngineError::PlayerNotFound(player_id))?;
        let nb_players = self.seats.len();
        let highest = self.tracker.round_highest_set();
        let round_bet = p.round_bet_amount(self.state);

        let betting = BettingContext {
            pot: self.pot_total(),
            sets: self.sets_total(),
            highest_set: highest,
            minimum_raise: self.tracker.minimum_raise(self.small_blind),
            preflop_raises_number: self.tracker.raises_number(GameState::Preflop),
            preflop_calls_number: self.tracker.calls_number(GameState::Preflop),
            flop_bets_or_raises_number: self.tracker.bets_or_raises_number(GameState::Flop),
            turn_bets_or_raises_number: self.tracker.bets_or_raises_number(GameState::Turn),
            river_bets_or_raises_number: self.tracker.bets_or_raises_number(GameState::River),
        };

        let preflop_last_raiser = self
            .tracker
            .last_raiser_in_round(GameState::Preflop)
            .and_then(|id| self.player(id))
            .map(|raiser| PreflopRaiser {
                id: raiser.id(),
                position: raiser.position(),
            });

        let opponents: Vec<OpponentSummary> = self
            .seats
            .iter()
            .filter(|o| o.id() != player_id && !o.is_folded())
            .map(|o| {
                let stats = o.statistics_updater().statistics(nb_players);
                OpponentSummary {
                    id: o.id(),
                    position: o.position(),
                    cash: o.cash(),
                    total_bet_amount: o.total_bet_amount(),
                    estimated_range: *o.range_estimator().range(),
                    ratios: OpponentRatios {
                        hands_sampled: stats.preflop.hands,
                        aggression_factor: stats.aggression_factor(),
                        aggression_frequency: stats.aggression_frequency(),
                        vpip: stats.preflop.voluntary_put_money_in_pot(),
                        preflop_raise: stats.preflop.preflop_raise(),
                        went_to_showdown: stats.went_to_showdown_pct(),
                        call_three_bets_frequency: stats.preflop.call_three_bets_frequency(),
                    },
                }
            })
            .collect();

        let flags = p
            .hole_cards()
            .map(|hole| crate::analysis::analyze(hole, self.board.board_cards().cards()))
            .unwrap_or_default();

        Ok(CurrentHandContext {
            game_state: self.state,
            small_blind: self.small_blind,
            betting,
            players: PlayersContext {
                nb_players: nb_players as u32,
                preflop_last_raiser,
                opponents,
            },
            personal: PersonalContext {
                id: player_id,
                position: p.position(),
                cash: p.cash(),
                total_bet_amount: p.total_bet_amount(),
                round_bet_amount: round_bet,
                to_call: highest.saturating_sub(round_bet),
                hole_cards: p.hole_cards(),
                post_flop_flags: flags,
                m: p.cash() / (3 * self.small_blind),
                is_preflop_aggressor: self.tracker.last_raiser_in_round(GameState::Preflop)
                    == Some(player_id),
            },
        })
    }

    /// Hands the seats back once the hand has completed.
    pub fn finish(&mut self) -> Result<Vec<Player>, EngineError> {
        if !self.completed {
            return Err(EngineError::InvariantViolated(
                "finishing an unfinished hand".into(),
            ));
        }
        Ok(std::mem::take(&mut self.seats))
    }

    fn seat_index(&self, id: u32) -> Option<usize> {
        self.seats.iter().position(|p| p.id() == id)
    }

    fn log_action(&mut self, round: GameState, player_id: u32, kind: ActionKind, amount: u32) {
        self.action_log.push(ActionRecord {
            player_id,
            round,
            kind,
            amount,
        });
    }
}

fn next_street(state: GameState) -> GameState {
    match state {
        GameState::Preflop => GameState::Flop,
        GameState::Flop => GameState::Turn,
        GameState::Turn => GameState::River,
        GameState::River | GameState::PostRiver => GameState::PostRiver,
    }
}
