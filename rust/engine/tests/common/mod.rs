//! Shared helpers for engine integration tests: scripted strategies, a
//! queue-backed rank oracle, and event capture.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use felt_engine::actions::{ActionKind, PlayerAction};
use felt_engine::context::CurrentHandContext;
use felt_engine::errors::EngineError;
use felt_engine::eval::HandEvaluator;
use felt_engine::session::{SeatConfig, Session, SessionConfig};
use felt_engine::store::NullPlayersStatisticsStore;
use felt_engine::strategy::PlayerStrategy;

/// Plays a fixed sequence of actions, then checks when free and folds
/// otherwise.
pub struct ScriptedStrategy {
    actions: VecDeque<(ActionKind, u32)>,
}

impl ScriptedStrategy {
    pub fn new(actions: &[(ActionKind, u32)]) -> Self {
        Self {
            actions: actions.iter().copied().collect(),
        }
    }
}

impl PlayerStrategy for ScriptedStrategy {
    fn name(&self) -> &str {
        "Scripted"
    }

    fn decide(&mut self, ctx: &CurrentHandContext) -> PlayerAction {
        match self.actions.pop_front() {
            Some((kind, amount)) => PlayerAction::new(ctx.personal.id, kind, amount),
            None => {
                if ctx.personal.to_call == 0 {
                    PlayerAction::new(ctx.personal.id, ActionKind::Check, 0)
                } else {
                    PlayerAction::new(ctx.personal.id, ActionKind::Fold, 0)
                }
            }
        }
    }
}

/// Returns queued ranks in call order; repeats the last one when exhausted.
pub struct StubEvaluator {
    ranks: RefCell<VecDeque<u32>>,
}

impl StubEvaluator {
    pub fn with_ranks(ranks: &[u32]) -> Rc<StubEvaluator> {
        Rc::new(StubEvaluator {
            ranks: RefCell::new(ranks.iter().copied().collect()),
        })
    }
}

impl HandEvaluator for StubEvaluator {
    fn rank_hand(&self, _cards: &str) -> Result<u32, EngineError> {
        Ok(self.ranks.borrow_mut().pop_front().unwrap_or(1))
    }
}

#[derive(Default, Clone)]
pub struct CapturedEvents {
    pub completed: Rc<RefCell<Option<(Vec<u32>, u32)>>>,
    pub reveal_order: Rc<RefCell<Vec<u32>>>,
    pub actions: Rc<RefCell<Vec<PlayerAction>>>,
}

pub fn capture_events(session: &mut Session) -> CapturedEvents {
    let captured = CapturedEvents::default();
    {
        let completed = Rc::clone(&captured.completed);
        session.events.on_hand_completed = Some(Box::new(move |winners, pot| {
            *completed.borrow_mut() = Some((winners.to_vec(), pot));
        }));
    }
    {
        let reveal = Rc::clone(&captured.reveal_order);
        session.events.on_showdown_reveal_order = Some(Box::new(move |order| {
            *reveal.borrow_mut() = order.to_vec();
        }));
    }
    {
        let actions = Rc::clone(&captured.actions);
        session.events.on_player_acted = Some(Box::new(move |action| {
            actions.borrow_mut().push(action);
        }));
    }
    captured
}

pub fn scripted_seat(name: &str, actions: &[(ActionKind, u32)]) -> SeatConfig {
    SeatConfig {
        name: name.to_string(),
        strategy: Some(Box::new(ScriptedStrategy::new(actions))),
    }
}

pub fn session_config(small_blind: u32, start_cash: u32) -> SessionConfig {
    SessionConfig {
        small_blind,
        start_cash,
        seed: Some(42),
        gui_speed: 1,
    }
}

pub fn build_session(
    config: SessionConfig,
    seats: Vec<SeatConfig>,
    evaluator: Rc<StubEvaluator>,
) -> Session {
    Session::new(
        config,
        seats,
        evaluator,
        Box::new(NullPlayersStatisticsStore),
    )
    .expect("session setup")
}
