//! Deterministic deal preview: hole cards for two seats plus the board.

use std::io::Write;

use felt_engine::deck::Deck;

use crate::error::CliError;
use crate::formatters::{format_board, format_card};

pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new_with_seed(seed);
    deck.shuffle();

    writeln!(out, "seed: {}", seed)?;
    for seat in 0..2 {
        let cards = deck.deal(2).map_err(|e| CliError::Engine(e.to_string()))?;
        writeln!(
            out,
            "seat {}: {} {}",
            seat,
            format_card(&cards[0]),
            format_card(&cards[1])
        )?;
    }
    deck.burn_card();
    let mut board = deck.deal(3).map_err(|e| CliError::Engine(e.to_string()))?;
    deck.burn_card();
    board.extend(deck.deal(1).map_err(|e| CliError::Engine(e.to_string()))?);
    deck.burn_card();
    board.extend(deck.deal(1).map_err(|e| CliError::Engine(e.to_string()))?);
    writeln!(out, "board: {}", format_board(&board))?;
    Ok(())
}
