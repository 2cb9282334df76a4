use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::EngineError;

/// A 52-card deck with an injectable, seedable shuffle.
///
/// The deck is shuffled once at hand start; dealing removes cards from the
/// front and there is no reshuffle within a hand.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        if self.position >= self.cards.len() {
            None
        } else {
            let c = self.cards[self.position];
            self.position += 1;
            Some(c)
        }
    }

    /// Deals exactly `n` cards, failing if fewer remain.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if self.remaining() < n {
            return Err(EngineError::DeckExhausted {
                requested: n,
                remaining: self.remaining(),
            });
        }
        Ok((0..n).filter_map(|_| self.deal_card()).collect())
    }

    pub fn burn_card(&mut self) {
        let _ = self.deal_card();
    }

    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_order() {
        let mut a = Deck::new_with_seed(42);
        let mut b = Deck::new_with_seed(42);
        a.shuffle();
        b.shuffle();
        for _ in 0..52 {
            assert_eq!(a.deal_card(), b.deal_card());
        }
    }

    #[test]
    fn deal_fails_when_short() {
        let mut d = Deck::new_with_seed(1);
        d.shuffle();
        assert!(d.deal(50).is_ok());
        assert!(d.deal(3).is_err());
        assert_eq!(d.remaining(), 2);
    }

    #[test]
    fn shuffled_deck_has_no_duplicates() {
        let mut d = Deck::new_with_seed(7);
        d.shuffle();
        let cards = d.deal(52).unwrap();
        let mut seen = [false; 52];
        for c in cards {
            assert!(!seen[c.index()]);
            seen[c.index()] = true;
        }
    }
}
