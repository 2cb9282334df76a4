use thiserror::Error;

use crate::validator::RejectReason;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid card: {0}")]
    InvalidCard(String),
    #[error("Deck exhausted: requested {requested}, remaining {remaining}")]
    DeckExhausted { requested: usize, remaining: usize },
    #[error("Invalid table configuration: {0}")]
    InvalidConfiguration(String),
    #[error("No hand in progress")]
    NoHandInProgress,
    #[error("Hand already complete")]
    HandAlreadyComplete,
    #[error("Player {0} not found")]
    PlayerNotFound(u32),
    #[error("Rejected action for player {player_id}: {reason}")]
    ActionRejected { player_id: u32, reason: RejectReason },
    #[error("Engine invariant violated: {0}")]
    InvariantViolated(String),
}
