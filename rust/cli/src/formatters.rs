//! Card, board, and action formatters for terminal display.
//!
//! Pure functions for rendering game elements. Unicode suit symbols are
//! used where the terminal supports them, with an ASCII fallback.

use felt_engine::actions::{ActionKind, PlayerAction};
use felt_engine::cards::{Card, Suit};

/// Modern terminals render the suit symbols; on Windows only some do.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Clubs => "♣".to_string(),
            Suit::Diamonds => "♦".to_string(),
            Suit::Hearts => "♥".to_string(),
            Suit::Spades => "♠".to_string(),
        }
    } else {
        suit.to_char().to_string()
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.to_char(), format_suit(card.suit))
}

pub fn format_board(board: &[Card]) -> String {
    let cards: Vec<String> = board.iter().map(format_card).collect();
    format!("[{}]", cards.join(" "))
}

pub fn format_chips(amount: u32) -> String {
    format!("{}", amount)
}

pub fn format_action(name: &str, action: &PlayerAction) -> String {
    match action.kind {
        ActionKind::PostSmallBlind => format!("{} posts small blind {}", name, action.amount),
        ActionKind::PostBigBlind => format!("{} posts big blind {}", name, action.amount),
        ActionKind::Fold => format!("{} folds", name),
        ActionKind::Check => format!("{} checks", name),
        ActionKind::Call => format!("{} calls to {}", name, action.amount),
        ActionKind::Bet => format!("{} bets {}", name, action.amount),
        ActionKind::Raise => format!("{} raises to {}", name, action.amount),
        ActionKind::AllIn => format!("{} goes all-in for {}", name, action.amount),
        ActionKind::None => format!("{} waits", name),
    }
}
