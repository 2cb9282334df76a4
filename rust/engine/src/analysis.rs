//! Post-flop hand analysis flags.
//!
//! Strategies and the range estimator consume a compact flag block instead
//! of re-deriving hand features from raw cards. Board-texture flags describe
//! the board alone; made-hand flags describe the hole cards against it.

use crate::cards::{Card, HoleCards, Rank};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFlopAnalysisFlags {
    pub is_pocket_pair: bool,
    pub is_over_pair: bool,
    pub is_top_pair: bool,
    pub is_pair: bool,
    pub is_two_pair: bool,
    pub is_trips: bool,
    pub is_straight: bool,
    pub is_flush: bool,
    pub is_full_house: bool,
    pub is_quads: bool,
    pub is_flush_draw: bool,
    pub is_straight_draw: bool,
    // board texture
    pub is_flush_possible: bool,
    pub is_straight_possible: bool,
    pub is_board_paired: bool,
    pub is_full_house_possible: bool,
    pub uses_hole_cards: bool,
}

impl PostFlopAnalysisFlags {
    /// A hand close to the top of what the board allows.
    pub fn is_nut_made_hand(&self) -> bool {
        self.is_trips
            || self.is_straight
            || self.is_flush
            || self.is_full_house
            || self.is_quads
            || (self.is_two_pair && !self.is_full_house_possible)
    }

    /// Any made hand at all (pair or better using hole cards).
    pub fn has_made_hand(&self) -> bool {
        self.is_pair
            || self.is_two_pair
            || self.is_trips
            || self.is_straight
            || self.is_flush
            || self.is_full_house
            || self.is_quads
    }

    pub fn has_draw(&self) -> bool {
        self.is_flush_draw || self.is_straight_draw
    }
}

/// Analyzes the hole cards against a board of 3 to 5 cards.
pub fn analyze(hole: HoleCards, board: &[Card]) -> PostFlopAnalysisFlags {
    let mut flags = PostFlopAnalysisFlags::default();
    if board.len() < 3 {
        flags.is_pocket_pair = hole.first.rank == hole.second.rank;
        flags.is_pair = flags.is_pocket_pair;
        flags.uses_hole_cards = true;
        return flags;
    }

    let combined: Vec<Card> = hole.cards().iter().copied().chain(board.iter().copied()).collect();
    let combined_counts = rank_counts(&combined);
    let board_counts = rank_counts(board);
    let hole_ranks = [hole.first.rank, hole.second.rank];
    let top_board_rank = board.iter().map(|c| c.rank).max().expect("non-empty board");

    // Board texture
    flags.is_board_paired = board_counts.iter().any(|&c| c >= 2);
    flags.is_full_house_possible = flags.is_board_paired;
    flags.is_flush_possible = suit_counts(board).iter().any(|&c| c >= 3);
    flags.is_straight_possible = straight_possible(&board_counts);

    // Pair family
    flags.is_pocket_pair = hole.first.rank == hole.second.rank;
    flags.is_over_pair = flags.is_pocket_pair && hole.first.rank > top_board_rank;
    flags.is_top_pair = !flags.is_pocket_pair
        && hole_ranks
            .iter()
            .any(|&r| r == top_board_rank && combined_counts[r as usize] == 2);
    flags.is_pair = flags.is_pocket_pair
        || hole_ranks
            .iter()
            .any(|&r| combined_counts[r as usize] >= 2);

    let paired_ranks_with_hole = {
        let mut ranks: Vec<Rank> = hole_ranks
            .iter()
            .copied()
            .filter(|&r| combined_counts[r as usize] >= 2)
            .collect();
        ranks.dedup();
        ranks
    };
    let pairs_in_combined = combined_counts.iter().filter(|&&c| c >= 2).count();
    flags.is_two_pair = pairs_in_combined >= 2 && !paired_ranks_with_hole.is_empty();

    flags.is_trips = hole_ranks
        .iter()
        .any(|&r| combined_counts[r as usize] == 3);
    flags.is_quads = hole_ranks
        .iter()
        .any(|&r| combined_counts[r as usize] == 4);
    flags.is_full_house = full_house_pattern(&combined_counts)
        && hole_ranks.iter().any(|&r| combined_counts[r as usize] >= 2);

    // Straights and flushes
    let combined_straight = straight_high(&combined_counts);
    let board_straight = straight_high(&board_counts);
    flags.is_straight = combined_straight.is_some() && combined_straight != board_straight;

    let combined_suits = suit_counts(&combined);
    for suit_index in 0..4 {
        let hole_in_suit = hole
            .cards()
            .iter()
            .filter(|c| c.suit.index() == suit_index)
            .count();
        if hole_in_suit == 0 {
            continue;
        }
        if combined_suits[suit_index] >= 5 {
            flags.is_flush = true;
        } else if combined_suits[suit_index] == 4 && board.len() < 5 {
            flags.is_flush_draw = true;
        }
    }

    if board.len() < 5 && combined_straight.is_none() {
        flags.is_straight_draw = open_straight_draw(&combined_counts, &hole_ranks);
    }

    flags.uses_hole_cards = category_level(&combined_counts, &combined)
        > category_level(&board_counts, board);
    flags
}

fn rank_counts(cards: &[Card]) -> [u8; 15] {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank as usize] += 1;
    }
    counts
}

fn suit_counts(cards: &[Card]) -> [u8; 4] {
    let mut counts = [0u8; 4];
    for c in cards {
        counts[c.suit.index()] += 1;
    }
    counts
}

fn full_house_pattern(counts: &[u8; 15]) -> bool {
    let trips = counts.iter().filter(|&&c| c >= 3).count();
    let pairs = counts.iter().filter(|&&c| c >= 2).count();
    trips >= 1 && pairs >= 2
}

/// Highest straight top value present, Ace counting both high and low.
fn straight_high(counts: &[u8; 15]) -> Option<u8> {
    let present = |v: u8| -> bool {
        if v == 1 {
            counts[14] > 0
        } else {
            counts[v as usize] > 0
        }
    };
    for high in (5..=14u8).rev() {
        if (high - 4..=high).all(present) {
            return Some(high);
        }
    }
    None
}

/// Four ranks inside some 5-window, at least one from the hole cards.
fn open_straight_draw(counts: &[u8; 15], hole_ranks: &[Rank; 2]) -> bool {
    let present = |v: u8| -> bool {
        if v == 1 {
            counts[14] > 0
        } else {
            counts[v as usize] > 0
        }
    };
    let hole_has = |v: u8| -> bool {
        let rank = if v == 1 { 14 } else { v };
        hole_ranks.iter().any(|&r| r as u8 == rank)
    };
    for high in (5..=14u8).rev() {
        let window: Vec<u8> = (high - 4..=high).collect();
        let hits = window.iter().filter(|&&v| present(v)).count();
        if hits == 4 && window.iter().any(|&v| present(v) && hole_has(v)) {
            return true;
        }
    }
    false
}

/// True when a straight is completable: at least 3 distinct board ranks
/// inside some 5-card window.
fn straight_possible(board_counts: &[u8; 15]) -> bool {
    let present = |v: u8| -> bool {
        if v == 1 {
            board_counts[14] > 0
        } else {
            board_counts[v as usize] > 0
        }
    };
    for high in (5..=14u8).rev() {
        let hits = (high - 4..=high).filter(|&v| present(v)).count();
        if hits >= 3 {
            return true;
        }
    }
    false
}

/// Coarse made-hand level for hole-card involvement comparison.
fn category_level(counts: &[u8; 15], cards: &[Card]) -> u8 {
    let quads = counts.iter().any(|&c| c == 4);
    let flush = suit_counts(cards).iter().any(|&c| c >= 5);
    let straight = straight_high(counts).is_some();
    if quads {
        7
    } else if full_house_pattern(counts) {
        6
    } else if flush {
        5
    } else if straight {
        4
    } else if counts.iter().any(|&c| c == 3) {
        3
    } else if counts.iter().filter(|&&c| c >= 2).count() >= 2 {
        2
    } else if counts.iter().any(|&c| c >= 2) {
        1
    } else {
        0
    }
}
