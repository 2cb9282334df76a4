//! Session: seating, dealer rotation, and the hand lifecycle.
//!
//! Players outlive hands. The session owns the seats between hands, moves
//! them into a `Hand` for its duration, and takes them back at completion,
//! flushing statistics deltas to the store. Bot turns are driven here; when
//! the human seat is to act the session raises `on_awaiting_human_input`
//! and returns control to the host.

use std::collections::HashMap;
use std::rc::Rc;

use crate::actions::PlayerAction;
use crate::deck::Deck;
use crate::errors::EngineError;
use crate::eval::HandEvaluator;
use crate::events::{GameEvents, SeatSnapshot};
use crate::hand::Hand;
use crate::logger::{HandLogger, HandRecord, ShowdownInfo};
use crate::player::Player;
use crate::position::{MAX_NUMBER_OF_PLAYERS, MIN_NUMBER_OF_PLAYERS};
use crate::store::PlayersStatisticsStore;
use crate::strategy::{PlayerStrategy, NO_STRATEGY_NAME};

/// One seat to create: a bot with its strategy, or the human seat.
pub struct SeatConfig {
    pub name: String,
    pub strategy: Option<Box<dyn PlayerStrategy>>,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub small_blind: u32,
    pub start_cash: u32,
    /// Base RNG seed; each hand derives its own. Clock-seeded when absent.
    pub seed: Option<u64>,
    pub gui_speed: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            small_blind: 10,
            start_cash: 1000,
            seed: None,
            gui_speed: 1,
        }
    }
}

/// What the host should do next after driving the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// The human seat is to act; resume with `handle_human_action`.
    AwaitingHumanInput(u32),
    /// The hand finished and its accounting is flushed.
    HandComplete,
}

pub struct Session {
    config: SessionConfig,
    seats: Vec<Player>,
    seat_order: Vec<u32>,
    strategies: HashMap<u32, Box<dyn PlayerStrategy>>,
    human_id: Option<u32>,
    dealer_id: u32,
    evaluator: Rc<dyn HandEvaluator>,
    store: Box<dyn PlayersStatisticsStore>,
    pub events: GameEvents,
    hand: Option<Hand>,
    hand_logger: Option<HandLogger>,
    hands_played: u64,
    base_seed: u64,
    current_hand_seed: u64,
    game_initialized: bool,
    last_store_error: Option<String>,
}

impl Session {
    pub fn new(
        config: SessionConfig,
        seat_configs: Vec<SeatConfig>,
        evaluator: Rc<dyn HandEvaluator>,
        mut store: Box<dyn PlayersStatisticsStore>,
    ) -> Result<Session, EngineError> {
        let n = seat_configs.len();
        if !(MIN_NUMBER_OF_PLAYERS..=MAX_NUMBER_OF_PLAYERS).contains(&n) {
            return Err(EngineError::InvalidConfiguration(format!(
                "{} seats outside {}..={}",
                n, MIN_NUMBER_OF_PLAYERS, MAX_NUMBER_OF_PLAYERS
            )));
        }
        if config.small_blind == 0 || config.start_cash == 0 {
            return Err(EngineError::InvalidConfiguration(
                "blinds and stacks must be positive".into(),
            ));
        }
        let humans = seat_configs.iter().filter(|s| s.strategy.is_none()).count();
        if humans > 1 {
            return Err(EngineError::InvalidConfiguration(
                "at most one human seat".into(),
            ));
        }

        let mut seats = Vec::with_capacity(n);
        let mut strategies = HashMap::new();
        let mut human_id = None;
        for (i, seat) in seat_configs.into_iter().enumerate() {
            let id = i as u32;
            let strategy_name = seat
                .strategy
                .as_ref()
                .map(|s| s.name().to_string())
                .unwrap_or_else(|| NO_STRATEGY_NAME.to_string());
            let mut player = Player::new(id, seat.name, strategy_name.clone(), config.start_cash);
            if strategy_name != NO_STRATEGY_NAME {
                // seed statistics baselines from the store; a failed load
                // just starts from zero
                if let Ok(saved) = store.load(&strategy_name) {
                    player.statistics_updater_mut().load_saved(saved);
                }
            }
            match seat.strategy {
                Some(strategy) => {
                    strategies.insert(id, strategy);
                }
                None => human_id = Some(id),
            }
            seats.push(player);
        }

        let seat_order: Vec<u32> = seats.iter().map(|p| p.id()).collect();
        let dealer_id = seat_order[0];
        let base_seed = config
            .seed
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis() as u64);

        Ok(Session {
            config,
            seats,
            seat_order,
            strategies,
            human_id,
            dealer_id,
            evaluator,
            store,
            events: GameEvents::default(),
            hand: None,
            hand_logger: None,
            hands_played: 0,
            base_seed,
            current_hand_seed: base_seed,
            game_initialized: false,
            last_store_error: None,
        })
    }

    pub fn set_hand_logger(&mut self, logger: HandLogger) {
        self.hand_logger = Some(logger);
    }

    /// Seats between hands; while a hand runs, only the benched seats.
    pub fn players(&self) -> &[Player] {
        &self.seats
    }

    pub fn hand(&self) -> Option<&Hand> {
        self.hand.as_ref()
    }

    pub fn human_id(&self) -> Option<u32> {
        self.human_id
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    pub fn dealer_id(&self) -> u32 {
        self.dealer_id
    }

    pub fn last_store_error(&self) -> Option<&str> {
        self.last_store_error.as_deref()
    }

    /// True when at least two seats still have chips.
    pub fn can_start_hand(&self) -> bool {
        self.hand.is_none() && self.seats.iter().filter(|p| p.cash() > 0).count() >= 2
    }

    /// Deals a fresh hand: rotates the dealer, shuffles a derived-seed deck,
    /// posts blinds. Bots do not act yet; call `advance` next.
    pub fn start_hand(&mut self) -> Result<(), EngineError> {
        if self.hand.is_some() {
            return Err(EngineError::InvalidConfiguration(
                "a hand is already in progress".into(),
            ));
        }
        let participants_ids: Vec<u32> = self
            .seat_order
            .iter()
            .copied()
            .filter(|id| {
                self.seats
                    .iter()
                    .any(|p| p.id() == *id && p.cash() > 0)
            })
            .collect();
        if participants_ids.len() < 2 {
            return Err(EngineError::InvalidConfiguration(
                "not enough players with chips".into(),
            ));
        }

        if self.hands_played > 0 {
            self.dealer_id = next_dealer(&participants_ids, self.dealer_id);
        } else if !participants_ids.contains(&self.dealer_id) {
            self.dealer_id = participants_ids[0];
        }

        if !self.game_initialized {
            if let Some(cb) = &mut self.events.on_game_initialized {
                cb(self.config.gui_speed);
            }
            self.game_initialized = true;
        }
        if let Some(cb) = &mut self.events.on_players_initialized {
            let snapshots: Vec<SeatSnapshot> = self
                .seats
                .iter()
                .filter(|p| participants_ids.contains(&p.id()))
                .map(|p| SeatSnapshot {
                    id: p.id(),
                    name: p.name().to_string(),
                    strategy_name: p.strategy_name().to_string(),
                    cash: p.cash(),
                })
                .collect();
            cb(&snapshots);
        }

        self.current_hand_seed = self.base_seed.wrapping_add(self.hands_played);
        let mut deck = Deck::new_with_seed(self.current_hand_seed);
        deck.shuffle();

        let mut participants = Vec::with_capacity(participants_ids.len());
        let mut bench = Vec::new();
        for player in self.seats.drain(..) {
            if participants_ids.contains(&player.id()) {
                participants.push(player);
            } else {
                bench.push(player);
            }
        }
        self.seats = bench;

        let mut hand = Hand::new(
            participants,
            self.dealer_id,
            self.config.small_blind,
            deck,
            Rc::clone(&self.evaluator),
        )?;
        hand.begin(&mut self.events)?;
        self.hands_played += 1;
        self.hand = Some(hand);
        Ok(())
    }

    /// Runs bot turns until the human is to act or the hand completes.
    pub fn advance(&mut self) -> Result<SessionStatus, EngineError> {
        loop {
            let hand = self.hand.as_mut().ok_or(EngineError::NoHandInProgress)?;
            if hand.is_complete() {
                self.collect_hand()?;
                return Ok(SessionStatus::HandComplete);
            }
            let actor = hand.next_to_act().ok_or_else(|| {
                EngineError::InvariantViolated("no actor in an unfinished hand".into())
            })?;
            if Some(actor) == self.human_id {
                let kinds = hand.legal_actions(actor);
                if let Some(cb) = &mut self.events.on_awaiting_human_input {
                    cb(actor, &kinds);
                }
                return Ok(SessionStatus::AwaitingHumanInput(actor));
            }
            let ctx = hand.make_context(actor)?;
            let strategy = self
                .strategies
                .get_mut(&actor)
                .ok_or(EngineError::PlayerNotFound(actor))?;
            let mut action = strategy.decide(&ctx);
            action.player_id = actor;
            // a bot returning an invalid action is a programming bug; the
            // rejection event has fired, surface the error to the host
            hand.handle_player_action(action, &mut self.events)?;
            if let Some(cb) = &mut self.events.on_process_events {
                cb();
            }
        }
    }

    /// Resumes after `on_awaiting_human_input`. A rejected action leaves the
    /// hand waiting on the same seat so the host can re-prompt.
    pub fn handle_human_action(
        &mut self,
        action: PlayerAction,
    ) -> Result<SessionStatus, EngineError> {
        let human = action.player_id;
        let hand = self.hand.as_mut().ok_or(EngineError::NoHandInProgress)?;
        match hand.handle_player_action(action, &mut self.events) {
            Ok(()) => self.advance(),
            Err(EngineError::ActionRejected { .. }) => {
                Ok(SessionStatus::AwaitingHumanInput(human))
            }
            Err(e) => Err(e),
        }
    }

    fn collect_hand(&mut self) -> Result<(), EngineError> {
        let mut hand = self.hand.take().ok_or(EngineError::NoHandInProgress)?;
        self.write_hand_record(&hand);

        let mut players = hand.finish()?;
        if let Err(e) = self.store.save(&mut players) {
            // persistence failures never abort the session; the delta is
            // retried on the next save
            self.last_store_error = Some(e.to_string());
        }

        self.seats.append(&mut players);
        let order = &self.seat_order;
        self.seats
            .sort_by_key(|p| order.iter().position(|&id| id == p.id()).unwrap_or(usize::MAX));
        Ok(())
    }

    fn write_hand_record(&mut self, hand: &Hand) {
        let logger = match &mut self.hand_logger {
            Some(l) => l,
            None => return,
        };
        let result = match hand.result() {
            Some(r) => r,
            None => return,
        };
        let record = HandRecord {
            hand_id: logger.next_id(),
            seed: Some(self.current_hand_seed),
            actions: hand.action_history().to_vec(),
            board: hand.board().board_cards().cards().to_vec(),
            pot: result.total,
            ts: None,
            showdown: Some(ShowdownInfo {
                winners: result.winners.clone(),
                reveal_order: hand.board().reveal_order().to_vec(),
            }),
        };
        let _ = logger.write(&record);
    }
}

fn next_dealer(participants: &[u32], dealer_id: u32) -> u32 {
    match participants.iter().position(|&id| id == dealer_id) {
        Some(i) => participants[(i + 1) % participants.len()],
        None => {
            // previous dealer busted; the next participant clockwise takes
            // the button
            participants
                .iter()
                .copied()
                .find(|&id| id > dealer_id)
                .unwrap_or(participants[0])
        }
    }
}
