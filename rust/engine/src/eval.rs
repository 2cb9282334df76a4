//! Seven-card hand strength evaluation and the hand-rank oracle port.
//!
//! The engine only ever orders the returned integers: higher is better.
//! [`SevenCardEvaluator`] is the built-in oracle; hosts can substitute any
//! other implementation of [`HandEvaluator`].

use std::cmp::Ordering;

use crate::cards::{Card, Rank, Suit};
use crate::errors::EngineError;

/// Port for the external 7-card strength oracle.
///
/// `cards` encodes seven cards in the `"Rs"` text form separated by single
/// spaces, e.g. `"Ah Kh Qh Jh Th 2c 3d"`.
pub trait HandEvaluator {
    fn rank_hand(&self, cards: &str) -> Result<u32, EngineError>;
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl HandStrength {
    /// Packs the strength into a single ordered integer: the category in the
    /// high bits, kickers below. Ordering of packed values matches
    /// [`compare_hands`].
    pub fn to_rank(&self) -> u32 {
        let mut rank = (self.category as u32) << 20;
        for (i, &k) in self.kickers.iter().enumerate() {
            rank |= (k as u32) << (16 - 4 * i);
        }
        rank
    }
}

/// Built-in implementation of the [`HandEvaluator`] port.
#[derive(Debug, Default)]
pub struct SevenCardEvaluator;

impl HandEvaluator for SevenCardEvaluator {
    fn rank_hand(&self, cards: &str) -> Result<u32, EngineError> {
        let parsed: Vec<Card> = cards
            .split_whitespace()
            .map(|s| s.parse::<Card>())
            .collect::<Result<_, _>>()?;
        let seven: [Card; 7] = parsed
            .try_into()
            .map_err(|_| EngineError::InvalidCard(cards.to_string()))?;
        Ok(evaluate_hand(&seven).to_rank())
    }
}

/// Evaluates the best 5-card hand out of the given 7 cards.
pub fn evaluate_hand(cards: &[Card; 7]) -> HandStrength {
    // Count ranks and suits
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut suit_counts = [0u8; 4];
    let mut by_suit: [Vec<u8>; 4] = [vec![], vec![], vec![], vec![]];
    for &c in cards.iter() {
        let r = rank_val(c.rank);
        rank_counts[r as usize] += 1;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        by_suit[s].push(r);
    }

    // Check flush and straight flush
    let mut flush_suit: Option<usize> = None;
    for (s, &count) in suit_counts.iter().enumerate() {
        if count >= 5 {
            flush_suit = Some(s);
            break;
        }
    }

    // Straight flush
    if let Some(s) = flush_suit {
        by_suit[s].sort_unstable();
        by_suit[s].dedup();
        if let Some(high) = detect_straight_high(&by_suit[s]) {
            return HandStrength {
                category: Category::StraightFlush,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    // Four of a kind
    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    // Full house
    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandStrength {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    // Flush
    if let Some(s) = flush_suit {
        let mut ranks = by_suit[s].clone();
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let mut k = [0u8; 5];
        k.copy_from_slice(&ranks[..5]);
        return HandStrength {
            category: Category::Flush,
            kickers: k,
        };
    }

    // Straight
    let mut uniq: Vec<u8> = Vec::new();
    for r in 2..=14u8 {
        if rank_counts[r as usize] > 0 {
            uniq.push(r);
        }
    }
    if let Some(high) = detect_straight_high(&uniq) {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    // Three / Two pair / One pair / High card
    let (trip_ranks, pair_ranks, singles) = classify_multiples(&rank_counts);
    if let Some(t) = trip_ranks.first().copied() {
        // trips + two highest kickers
        let mut k = [t, 0, 0, 0, 0];
        let mut remain = vec![];
        remain.extend(pair_ranks.iter().copied());
        remain.extend(singles.iter().copied());
        remain.sort_unstable_by(|a, b| b.cmp(a));
        k[1] = *remain.first().unwrap_or(&0);
        k[2] = *remain.get(1).unwrap_or(&0);
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: k,
        };
    }
    if pair_ranks.len() >= 2 {
        let mut prs = pair_ranks.clone();
        prs.sort_unstable();
        prs.reverse();
        let high = prs[0];
        let low = prs[1];
        let mut k = [high, low, 0, 0, 0];
        let mut rest: Vec<u8> = singles.clone();
        rest.extend(prs.iter().skip(2).copied());
        rest.sort_unstable_by(|a, b| b.cmp(a));
        k[2] = *rest.first().unwrap_or(&0);
        return HandStrength {
            category: Category::TwoPair,
            kickers: k,
        };
    }
    if let Some(p) = pair_ranks.first().copied() {
        let mut k = [p, 0, 0, 0, 0];
        let mut rest = singles.clone();
        rest.sort_unstable_by(|a, b| b.cmp(a));
        for i in 0..3 {
            k[i + 1] = *rest.get(i).unwrap_or(&0);
        }
        return HandStrength {
            category: Category::OnePair,
            kickers: k,
        };
    }

    // High card: top 5 ranks
    let mut highs = singles.clone();
    highs.sort_unstable_by(|a, b| b.cmp(a));
    let mut k = [0u8; 5];
    for (i, item) in k.iter_mut().enumerate() {
        *item = *highs.get(i).unwrap_or(&0);
    }
    HandStrength {
        category: Category::HighCard,
        kickers: k,
    }
}

/// Orders two hand strengths: category first, kickers as tiebreak.
pub fn compare_hands(a: &HandStrength, b: &HandStrength) -> Ordering {
    match a.category.cmp(&b.category) {
        Ordering::Equal => a.kickers.cmp(&b.kickers),
        ord => ord,
    }
}

fn rank_val(r: Rank) -> u8 {
    r as u8
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

fn detect_straight_high(sorted_unique_ranks: &[u8]) -> Option<u8> {
    if sorted_unique_ranks.is_empty() {
        return None;
    }
    // Ensure ascending order
    let mut v = sorted_unique_ranks.to_vec();
    v.sort_unstable();
    // Ace-low straight support: treat Ace as 1 additionally
    let mut w = v.clone();
    if v.binary_search(&14).is_ok() {
        w.insert(0, 1);
    }

    let mut run = 1;
    let mut best_high = 0u8;
    for i in 1..w.len() {
        if w[i] == w[i - 1] + 1 {
            run += 1;
            if run >= 5 {
                best_high = w[i];
            }
        } else if w[i] != w[i - 1] {
            // break in sequence
            run = 1;
        }
    }
    if best_high == 0 {
        None
    } else {
        Some(best_high)
    }
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut quad = 0u8;
    let mut kicker = 0u8;
    for r in (2..=14u8).rev() {
        if rank_counts[r as usize] == 4 {
            quad = r;
            break;
        }
    }
    if quad == 0 {
        return None;
    }
    for r in (2..=14u8).rev() {
        if r != quad && rank_counts[r as usize] > 0 {
            kicker = r;
            break;
        }
    }
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    if trips.is_empty() {
        return None;
    }
    if trips.len() >= 2 {
        return Some((trips[0], trips[1]));
    }
    if !pairs.is_empty() {
        return Some((trips[0], pairs[0]));
    }
    None
}

fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in 2..=14u8 {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    // highest first
    trips.reverse();
    pairs.reverse();
    (trips, pairs, singles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(s: &str) -> [Card; 7] {
        let v: Vec<Card> = s.split_whitespace().map(|c| c.parse().unwrap()).collect();
        v.try_into().unwrap()
    }

    #[test]
    fn detects_royal_flush() {
        let hs = evaluate_hand(&cards("Ah Kh Qh Jh Th 2c 3d"));
        assert_eq!(hs.category, Category::StraightFlush);
        assert_eq!(hs.kickers[0], 14);
    }

    #[test]
    fn detects_wheel_straight() {
        let hs = evaluate_hand(&cards("Ah 2c 3d 4s 5h 9c Jd"));
        assert_eq!(hs.category, Category::Straight);
        assert_eq!(hs.kickers[0], 5);
    }

    #[test]
    fn detects_full_house_over_flush() {
        let hs = evaluate_hand(&cards("Kh Kd Ks Qh Qd 2h 3h"));
        assert_eq!(hs.category, Category::FullHouse);
        assert_eq!(hs.kickers[0], 13);
        assert_eq!(hs.kickers[1], 12);
    }

    #[test]
    fn double_trips_form_full_house() {
        let hs = evaluate_hand(&cards("Kh Kd Ks Qh Qd Qc 2h"));
        assert_eq!(hs.category, Category::FullHouse);
        assert_eq!(hs.kickers[0], 13);
        assert_eq!(hs.kickers[1], 12);
    }

    #[test]
    fn quads_beat_full_house() {
        let quads = evaluate_hand(&cards("Ac Ad Ah As Kc Qd 2h"));
        let boat = evaluate_hand(&cards("Kc Kd Kh Qc Qd 2h 3s"));
        assert_eq!(quads.category, Category::FourOfAKind);
        assert_eq!(compare_hands(&quads, &boat), Ordering::Greater);
        assert!(quads.to_rank() > boat.to_rank());
    }

    #[test]
    fn kicker_breaks_pair_tie() {
        let ak = evaluate_hand(&cards("Ah As Kc Qd Jh 9c 2d"));
        let aq = evaluate_hand(&cards("Ad Ac Qc Jd Th 9s 2h"));
        assert_eq!(ak.category, Category::OnePair);
        assert_eq!(compare_hands(&ak, &aq), Ordering::Greater);
    }

    #[test]
    fn oracle_orders_packed_ranks() {
        let eval = SevenCardEvaluator;
        let strong = eval.rank_hand("Ah Kh Qh Jh Th 2c 3d").unwrap();
        let weak = eval.rank_hand("2c 4d 6h 8s Tc Qd Ah").unwrap();
        assert!(strong > weak);
    }

    #[test]
    fn oracle_rejects_malformed_input() {
        let eval = SevenCardEvaluator;
        assert!(eval.rank_hand("Ah Kh").is_err());
        assert!(eval.rank_hand("Ah Kh Qh Jh Th 2c Zx").is_err());
    }
}
