//! Engine-to-host event callbacks.
//!
//! The host installs whichever callbacks it cares about; every field is
//! optional and the engine invokes each exactly at the moment its name
//! describes. This keeps the GUI decoupled from the engine proper.

use crate::actions::{ActionKind, GameState, PlayerAction};
use crate::board::BoardCards;
use crate::cards::HoleCards;

/// Lightweight per-seat view handed to `on_players_initialized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatSnapshot {
    pub id: u32,
    pub name: String,
    pub strategy_name: String,
    pub cash: u32,
}

#[derive(Default)]
pub struct GameEvents {
    pub on_players_initialized: Option<Box<dyn FnMut(&[SeatSnapshot])>>,
    pub on_game_initialized: Option<Box<dyn FnMut(u32)>>,
    pub on_betting_round_started: Option<Box<dyn FnMut(GameState)>>,
    pub on_board_cards_dealt: Option<Box<dyn FnMut(&BoardCards)>>,
    pub on_hole_cards_dealt: Option<Box<dyn FnMut(u32, HoleCards)>>,
    pub on_player_acted: Option<Box<dyn FnMut(PlayerAction)>>,
    pub on_pot_updated: Option<Box<dyn FnMut(u32)>>,
    pub on_player_chips_updated: Option<Box<dyn FnMut(u32, u32)>>,
    pub on_awaiting_human_input: Option<Box<dyn FnMut(u32, &[ActionKind])>>,
    pub on_showdown_reveal_order: Option<Box<dyn FnMut(&[u32])>>,
    pub on_hand_completed: Option<Box<dyn FnMut(&[u32], u32)>>,
    pub on_invalid_player_action: Option<Box<dyn FnMut(u32, PlayerAction, &str)>>,
    pub on_engine_error: Option<Box<dyn FnMut(&str)>>,
    /// Host-side hint to pump its own event queue.
    pub on_process_events: Option<Box<dyn FnMut()>>,
}

impl std::fmt::Debug for GameEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEvents").finish_non_exhaustive()
    }
}
