//! Starting-hand categories and range sets.
//!
//! The 169 distinct starting-hand classes (13 pairs, 78 suited, 78 offsuit)
//! are indexed into a fixed-size bitset so range pruning stays cheap.

use std::fmt;
use std::str::FromStr;

use crate::cards::{Card, Rank};
use crate::errors::EngineError;

pub const NUM_STARTING_HANDS: usize = 169;

/// One of the 169 starting-hand classes, e.g. `QQ`, `AKs`, `T9o`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct StartingHand {
    high: Rank,
    low: Rank,
    suited: bool,
}

impl StartingHand {
    pub fn new(a: Rank, b: Rank, suited: bool) -> StartingHand {
        let (high, low) = if a >= b { (a, b) } else { (b, a) };
        // a pair has no suitedness
        let suited = suited && high != low;
        StartingHand { high, low, suited }
    }

    pub fn from_cards(a: Card, b: Card) -> StartingHand {
        StartingHand::new(a.rank, b.rank, a.suit == b.suit)
    }

    pub fn high(&self) -> Rank {
        self.high
    }

    pub fn low(&self) -> Rank {
        self.low
    }

    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }

    pub fn is_suited(&self) -> bool {
        self.suited
    }

    pub fn is_broadway(&self) -> bool {
        self.low >= Rank::Ten
    }

    /// Stable index in `0..169`: pairs first, then suited, then offsuit.
    pub fn index(&self) -> usize {
        let h = self.high as usize - 2;
        let l = self.low as usize - 2;
        if self.is_pair() {
            h
        } else {
            let pos = h * (h - 1) / 2 + l;
            if self.suited {
                13 + pos
            } else {
                91 + pos
            }
        }
    }

    pub fn from_index(index: usize) -> Option<StartingHand> {
        all_starting_hands().get(index).copied()
    }

    /// Heuristic preflop strength on a 0-10 scale; tiers are read off this.
    pub fn strength(&self) -> u8 {
        let high = self.high as u8;
        let low = self.low as u8;
        let suited = self.suited;

        if self.is_pair() {
            return match high {
                14 | 13 => 10, // AA, KK
                12 | 11 => 9,  // QQ, JJ
                10 => 8,       // TT
                9 => 7,        // 99
                8 => 6,        // 88
                7 => 5,        // 77
                _ => 4,        // 66-22
            };
        }

        match (high, low) {
            (14, 13) => {
                if suited {
                    10
                } else {
                    8
                }
            }
            (14, 12) => {
                if suited {
                    8
                } else {
                    7
                }
            }
            (14, 11) => {
                if suited {
                    7
                } else {
                    6
                }
            }
            (14, 10) => {
                if suited {
                    6
                } else {
                    5
                }
            }
            (14, _) => {
                if suited {
                    5
                } else {
                    4
                }
            }
            (13, 12) => {
                if suited {
                    7
                } else {
                    6
                }
            }
            (13, 11) => {
                if suited {
                    6
                } else {
                    5
                }
            }
            (13, 10) => {
                if suited {
                    5
                } else {
                    4
                }
            }
            (12, 11) => {
                if suited {
                    6
                } else {
                    5
                }
            }
            (12, 10) => {
                if suited {
                    5
                } else {
                    4
                }
            }
            _ => {
                if suited && high - low <= 2 {
                    if high >= 9 {
                        5
                    } else {
                        4
                    }
                } else if high >= 11 && low >= 9 {
                    4
                } else {
                    2
                }
            }
        }
    }

    pub fn tier(&self) -> HandTier {
        match self.strength() {
            9..=10 => HandTier::Premium,
            7..=8 => HandTier::Strong,
            5..=6 => HandTier::Medium,
            3..=4 => HandTier::Marginal,
            _ => HandTier::Trash,
        }
    }
}

impl fmt::Display for StartingHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.high.to_char(), self.low.to_char())?;
        if !self.is_pair() {
            write!(f, "{}", if self.suited { 's' } else { 'o' })?;
        }
        Ok(())
    }
}

impl FromStr for StartingHand {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<StartingHand, EngineError> {
        let chars: Vec<char> = s.chars().collect();
        let invalid = || EngineError::InvalidCard(s.to_string());
        match chars.as_slice() {
            [h, l] => {
                let high = Rank::from_char(*h).ok_or_else(invalid)?;
                let low = Rank::from_char(*l).ok_or_else(invalid)?;
                if high != low {
                    return Err(invalid());
                }
                Ok(StartingHand::new(high, low, false))
            }
            [h, l, m] => {
                let high = Rank::from_char(*h).ok_or_else(invalid)?;
                let low = Rank::from_char(*l).ok_or_else(invalid)?;
                if high == low {
                    return Err(invalid());
                }
                match m {
                    's' => Ok(StartingHand::new(high, low, true)),
                    'o' => Ok(StartingHand::new(high, low, false)),
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }
}

/// Coarse strength buckets over starting-hand classes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub enum HandTier {
    Trash,
    Marginal,
    Medium,
    Strong,
    Premium,
}

/// Parses a class or a `+` group ("TT+", "AJs+") into the classes it covers.
/// For pairs the group runs up to aces; for non-pairs the low card runs up
/// to one below the high card, keeping suitedness.
pub fn parse_group(s: &str) -> Result<Vec<StartingHand>, EngineError> {
    match s.strip_suffix('+') {
        None => Ok(vec![s.parse()?]),
        Some(base) => {
            let hand: StartingHand = base.parse()?;
            let mut hands = Vec::new();
            if hand.is_pair() {
                for r in hand.high() as u8..=14 {
                    hands.push(StartingHand::new(
                        Rank::from_u8(r),
                        Rank::from_u8(r),
                        false,
                    ));
                }
            } else {
                for l in hand.low() as u8..hand.high() as u8 {
                    hands.push(StartingHand::new(
                        hand.high(),
                        Rank::from_u8(l),
                        hand.is_suited(),
                    ));
                }
            }
            Ok(hands)
        }
    }
}

/// All 169 classes, ordered by index.
pub fn all_starting_hands() -> &'static [StartingHand] {
    use std::sync::OnceLock;
    static ALL: OnceLock<Vec<StartingHand>> = OnceLock::new();
    ALL.get_or_init(|| {
        let mut hands = vec![
            StartingHand {
                high: Rank::Two,
                low: Rank::Two,
                suited: false,
            };
            NUM_STARTING_HANDS
        ];
        for a in 2..=14u8 {
            for b in 2..=a {
                let high = Rank::from_u8(a);
                let low = Rank::from_u8(b);
                if a == b {
                    let h = StartingHand::new(high, low, false);
                    hands[h.index()] = h;
                } else {
                    for suited in [true, false] {
                        let h = StartingHand::new(high, low, suited);
                        hands[h.index()] = h;
                    }
                }
            }
        }
        hands
    })
}

/// Fixed-size set over the 169 starting-hand classes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StartingHandSet {
    bits: [u64; 3],
}

impl StartingHandSet {
    pub fn empty() -> StartingHandSet {
        StartingHandSet { bits: [0; 3] }
    }

    /// The full universe of 169 classes.
    pub fn universe() -> StartingHandSet {
        let mut set = StartingHandSet::empty();
        for hand in all_starting_hands() {
            set.insert(*hand);
        }
        set
    }

    pub fn insert(&mut self, hand: StartingHand) {
        let i = hand.index();
        self.bits[i / 64] |= 1 << (i % 64);
    }

    pub fn remove(&mut self, hand: StartingHand) {
        let i = hand.index();
        self.bits[i / 64] &= !(1 << (i % 64));
    }

    pub fn contains(&self, hand: StartingHand) -> bool {
        let i = hand.index();
        self.bits[i / 64] & (1 << (i % 64)) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    /// Keeps only the classes the predicate accepts.
    pub fn retain(&mut self, mut pred: impl FnMut(StartingHand) -> bool) {
        for hand in all_starting_hands() {
            if self.contains(*hand) && !pred(*hand) {
                self.remove(*hand);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = StartingHand> + '_ {
        all_starting_hands()
            .iter()
            .copied()
            .filter(move |h| self.contains(*h))
    }
}

impl Default for StartingHandSet {
    fn default() -> Self {
        StartingHandSet::universe()
    }
}
