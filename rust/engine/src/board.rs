//! Community cards and showdown bookkeeping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cards::Card;
use crate::errors::EngineError;
use crate::player::Player;

/// The community cards. Grows 0 -> 3 -> 4 -> 5 within a hand and never
/// shrinks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardCards {
    cards: Vec<Card>,
}

impl BoardCards {
    pub fn new() -> BoardCards {
        BoardCards::default()
    }

    pub fn num_cards(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn deal_flop(&mut self, flop: [Card; 3]) -> Result<(), EngineError> {
        if !self.cards.is_empty() {
            return Err(EngineError::InvariantViolated(
                "flop dealt onto a non-empty board".into(),
            ));
        }
        self.cards.extend(flop);
        Ok(())
    }

    pub fn deal_turn(&mut self, card: Card) -> Result<(), EngineError> {
        if self.cards.len() != 3 {
            return Err(EngineError::InvariantViolated(
                "turn dealt out of order".into(),
            ));
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn deal_river(&mut self, card: Card) -> Result<(), EngineError> {
        if self.cards.len() != 4 {
            return Err(EngineError::InvariantViolated(
                "river dealt out of order".into(),
            ));
        }
        self.cards.push(card);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.cards.clear();
    }
}

impl std::fmt::Display for BoardCards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", text.join(" "))
    }
}

/// Board-side hand state: community cards, the all-in latch that changes
/// reveal rules, and the computed showdown outputs.
#[derive(Debug, Default)]
pub struct Board {
    board_cards: BoardCards,
    all_in_condition: bool,
    last_action_player_id: Option<u32>,
    winners: Vec<u32>,
    reveal_order: Vec<u32>,
}

impl Board {
    pub fn new() -> Board {
        Board::default()
    }

    pub fn board_cards(&self) -> &BoardCards {
        &self.board_cards
    }

    pub fn board_cards_mut(&mut self) -> &mut BoardCards {
        &mut self.board_cards
    }

    pub fn set_all_in_condition(&mut self, value: bool) {
        self.all_in_condition = value;
    }

    pub fn all_in_condition(&self) -> bool {
        self.all_in_condition
    }

    pub fn set_last_action_player_id(&mut self, id: u32) {
        self.last_action_player_id = Some(id);
    }

    pub fn winners(&self) -> &[u32] {
        &self.winners
    }

    pub fn set_winners(&mut self, winners: Vec<u32>) {
        self.winners = winners;
    }

    pub fn reveal_order(&self) -> &[u32] {
        &self.reveal_order
    }

    /// Computes which players reveal their cards, in order.
    ///
    /// When the hand ended all-in with no further betting possible, every
    /// still-in player reveals in seat order. Otherwise the walk starts at
    /// the last aggressor and goes clockwise: a player reveals iff their
    /// rank strictly beats everything shown so far, or ties a shown rank
    /// with a strictly greater contribution.
    ///
    /// `contributions` are the per-seat committed totals snapshotted before
    /// pot distribution.
    pub fn determine_reveal_order(&mut self, seats: &[Player], contributions: &[u32]) {
        self.reveal_order.clear();

        if self.all_in_condition {
            for p in seats {
                if !p.is_folded() {
                    self.reveal_order.push(p.id());
                }
            }
            return;
        }

        let start = seats
            .iter()
            .position(|p| Some(p.id()) == self.last_action_player_id && !p.is_folded())
            .or_else(|| seats.iter().position(|p| !p.is_folded()));
        let start = match start {
            Some(i) => i,
            None => return,
        };

        let mut max_rank = 0u32;
        let mut shown_by_rank: BTreeMap<u32, u32> = BTreeMap::new();
        for step in 0..seats.len() {
            let idx = (start + step) % seats.len();
            let p = &seats[idx];
            if p.is_folded() {
                continue;
            }
            let rank = p.hand_ranking();
            let contribution = contributions[idx];
            let reveals = if self.reveal_order.is_empty() || rank > max_rank {
                true
            } else {
                matches!(shown_by_rank.get(&rank), Some(&c) if contribution > c)
            };
            if reveals {
                self.reveal_order.push(p.id());
                max_rank = max_rank.max(rank);
                let entry = shown_by_rank.entry(rank).or_insert(contribution);
                *entry = (*entry).max(contribution);
            }
        }
    }
}
