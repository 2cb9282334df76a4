//! The seam between the engine and bot decision logic.

use serde::{Deserialize, Serialize};

use crate::actions::PlayerAction;
use crate::context::CurrentHandContext;

/// Strategy name used for seats that carry no bot strategy (the human seat).
/// Statistics are not persisted for it.
pub const NO_STRATEGY_NAME: &str = "Human";

/// A bot decision function: consumes a read-only hand context, produces an
/// action. Implementations must not keep references into the context.
pub trait PlayerStrategy {
    fn name(&self) -> &str;

    fn decide(&mut self, ctx: &CurrentHandContext) -> PlayerAction;
}

/// The mix of opponents a session seats.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableProfile {
    TightAggressiveOpponents,
    LooseAggressiveOpponents,
    RandomOpponents,
}

impl Default for TableProfile {
    fn default() -> Self {
        TableProfile::RandomOpponents
    }
}
