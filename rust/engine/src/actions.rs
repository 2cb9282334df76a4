//! Action and betting-round bookkeeping for a single hand.

use serde::{Deserialize, Serialize};

/// The phase a hand is in. `PostRiver` is terminal: no outside action is
/// accepted there.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum GameState {
    Preflop,
    Flop,
    Turn,
    River,
    PostRiver,
}

impl GameState {
    /// Index into per-round storage. `PostRiver` has no betting round.
    pub fn round_index(self) -> Option<usize> {
        match self {
            GameState::Preflop => Some(0),
            GameState::Flop => Some(1),
            GameState::Turn => Some(2),
            GameState::River => Some(3),
            GameState::PostRiver => None,
        }
    }

    pub fn betting_rounds() -> [GameState; 4] {
        [
            GameState::Preflop,
            GameState::Flop,
            GameState::Turn,
            GameState::River,
        ]
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GameState::Preflop => "Preflop",
            GameState::Flop => "Flop",
            GameState::Turn => "Turn",
            GameState::River => "River",
            GameState::PostRiver => "PostRiver",
        };
        write!(f, "{}", s)
    }
}

/// The kind of a player action. `None` is the value every acting player is
/// reset to on round entry; the `Post*` kinds are reserved for the blinds
/// and never appear outside the preflop opening.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    None,
    PostSmallBlind,
    PostBigBlind,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl ActionKind {
    pub fn is_blind_post(self) -> bool {
        matches!(self, ActionKind::PostSmallBlind | ActionKind::PostBigBlind)
    }

    pub fn is_aggressive(self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise | ActionKind::AllIn)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActionKind::None => "none",
            ActionKind::PostSmallBlind => "post small blind",
            ActionKind::PostBigBlind => "post big blind",
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet => "bet",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all-in",
        };
        write!(f, "{}", s)
    }
}

/// One action step. `amount` is the total the player has committed in the
/// current round after this step (not the delta), except for
/// `None`/`Check`/`Fold` where it is zero.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerAction {
    pub player_id: u32,
    pub kind: ActionKind,
    pub amount: u32,
}

impl PlayerAction {
    pub fn new(player_id: u32, kind: ActionKind, amount: u32) -> Self {
        Self {
            player_id,
            kind,
            amount,
        }
    }

    pub fn none(player_id: u32) -> Self {
        Self::new(player_id, ActionKind::None, 0)
    }
}

/// Append-only per-round action history: who acted, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BettingRoundHistory {
    pub round: GameState,
    pub actions: Vec<(u32, ActionKind)>,
}

/// Tracks the betting state of the hand: the highest amount committed in
/// the current round, the last raiser, and the chronological action history
/// of every round.
#[derive(Debug, Default)]
pub struct BettingTracker {
    round_highest_set: u32,
    last_raiser_id: Option<u32>,
    // what the last raiser had committed in this round before raising;
    // drives the minimum-raise rule
    last_raiser_previous_total: u32,
    hand_action_history: Vec<BettingRoundHistory>,
}

impl BettingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Round entry: clears the highest committed amount and the raiser.
    /// Preflop seeds the highest set to the big blind instead.
    pub fn reset_for_round(&mut self) {
        self.round_highest_set = 0;
        self.last_raiser_id = None;
        self.last_raiser_previous_total = 0;
    }

    pub fn round_highest_set(&self) -> u32 {
        self.round_highest_set
    }

    pub fn update_round_highest_set(&mut self, amount: u32) {
        if amount > self.round_highest_set {
            self.round_highest_set = amount;
        }
    }

    pub fn last_raiser_id(&self) -> Option<u32> {
        self.last_raiser_id
    }

    /// Records a raise that lifted the round's highest set.
    /// `previous_total` is the raiser's round commitment before the raise.
    pub fn record_raise(&mut self, player_id: u32, previous_total: u32) {
        self.last_raiser_id = Some(player_id);
        self.last_raiser_previous_total = previous_total;
    }

    /// Minimum legal raise increment. With no raiser yet this is the big
    /// blind; afterwards it is the size of the last raise.
    pub fn minimum_raise(&self, small_blind: u32) -> u32 {
        match self.last_raiser_id {
            None => 2 * small_blind,
            Some(_) => self
                .round_highest_set
                .saturating_sub(self.last_raiser_previous_total),
        }
    }

    pub fn record_player_action(&mut self, round: GameState, action: &PlayerAction) {
        match self
            .hand_action_history
            .iter_mut()
            .find(|h| h.round == round)
        {
            Some(h) => h.actions.push((action.player_id, action.kind)),
            None => self.hand_action_history.push(BettingRoundHistory {
                round,
                actions: vec![(action.player_id, action.kind)],
            }),
        }
    }

    pub fn hand_action_history(&self) -> &[BettingRoundHistory] {
        &self.hand_action_history
    }

    pub fn round_history(&self, round: GameState) -> Option<&BettingRoundHistory> {
        self.hand_action_history.iter().find(|h| h.round == round)
    }

    /// Last entry of a round that is not a blind post.
    pub fn last_voluntary_actor(&self, round: GameState) -> Option<u32> {
        let history = self.round_history(round)?;
        history
            .actions
            .iter()
            .rev()
            .find(|(_, kind)| !kind.is_blind_post())
            .map(|(id, _)| *id)
    }

    pub fn calls_number(&self, round: GameState) -> u32 {
        self.count_kinds(round, |k| k == ActionKind::Call)
    }

    pub fn raises_number(&self, round: GameState) -> u32 {
        self.count_kinds(round, |k| matches!(k, ActionKind::Raise | ActionKind::AllIn))
    }

    pub fn bets_or_raises_number(&self, round: GameState) -> u32 {
        self.count_kinds(round, ActionKind::is_aggressive)
    }

    /// The id of the last player whose entry in the round is a raise-like
    /// action, scanning chronologically.
    pub fn last_raiser_in_round(&self, round: GameState) -> Option<u32> {
        let history = self.round_history(round)?;
        history
            .actions
            .iter()
            .rev()
            .find(|(_, kind)| matches!(kind, ActionKind::Raise | ActionKind::AllIn | ActionKind::Bet))
            .map(|(id, _)| *id)
    }

    fn count_kinds(&self, round: GameState, pred: impl Fn(ActionKind) -> bool) -> u32 {
        self.round_history(round)
            .map(|h| h.actions.iter().filter(|(_, k)| pred(*k)).count() as u32)
            .unwrap_or(0)
    }
}
