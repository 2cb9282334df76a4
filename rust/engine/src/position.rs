//! Seat position assignment.
//!
//! Positions are ordered so that later-to-act seats compare greater; raise
//! sizing and the positional-advantage check rely on that ordering.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

pub const MIN_NUMBER_OF_PLAYERS: usize = 2;
pub const MAX_NUMBER_OF_PLAYERS: usize = 10;

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub enum Position {
    Unknown = 0,
    SmallBlind = 1,
    BigBlind = 2,
    UnderTheGun = 3,
    UnderTheGunPlusOne = 4,
    UnderTheGunPlusTwo = 5,
    Middle = 6,
    MiddlePlusOne = 7,
    Late = 8,
    Cutoff = 9,
    Button = 10,
    /// Heads-up degenerate case: one seat is both Button and Small Blind.
    ButtonSmallBlind = 11,
}

impl Position {
    pub fn is_small_blind(self) -> bool {
        matches!(self, Position::SmallBlind | Position::ButtonSmallBlind)
    }

    pub fn is_button(self) -> bool {
        matches!(self, Position::Button | Position::ButtonSmallBlind)
    }
}

/// Position of the seat at circular offset `offset` from the dealer, for a
/// table of `nb_players` seats. The dealer is always at offset 0.
pub fn position_from_offset(offset: usize, nb_players: usize) -> Position {
    use Position::*;
    match nb_players {
        2 => {
            if offset == 0 {
                ButtonSmallBlind
            } else {
                BigBlind
            }
        }
        3 => match offset {
            0 => Button,
            1 => SmallBlind,
            _ => BigBlind,
        },
        4 => match offset {
            0 => Button,
            1 => SmallBlind,
            2 => BigBlind,
            _ => UnderTheGun,
        },
        5 => match offset {
            0 => Button,
            1 => SmallBlind,
            2 => BigBlind,
            3 => UnderTheGun,
            _ => Cutoff,
        },
        6 => match offset {
            0 => Button,
            1 => SmallBlind,
            2 => BigBlind,
            3 => UnderTheGun,
            4 => Middle,
            _ => Cutoff,
        },
        7 => match offset {
            0 => Button,
            1 => SmallBlind,
            2 => BigBlind,
            3 => UnderTheGun,
            4 => Middle,
            5 => Cutoff,
            _ => Late,
        },
        8 => match offset {
            0 => Button,
            1 => SmallBlind,
            2 => BigBlind,
            3 => UnderTheGun,
            4 => UnderTheGunPlusOne,
            5 => Middle,
            6 => Cutoff,
            _ => Late,
        },
        9 => match offset {
            0 => Button,
            1 => SmallBlind,
            2 => BigBlind,
            3 => UnderTheGun,
            4 => UnderTheGunPlusOne,
            5 => UnderTheGunPlusTwo,
            6 => Middle,
            7 => Cutoff,
            _ => Late,
        },
        _ => match offset {
            0 => Button,
            1 => SmallBlind,
            2 => BigBlind,
            3 => UnderTheGun,
            4 | 5 => UnderTheGunPlusOne,
            6 | 7 => Middle,
            o if o == nb_players - 2 => Cutoff,
            _ => Late,
        },
    }
}

/// Assigns a position to every seat given the dealer's seat index.
/// Seat `i` gets the position of offset `(i - dealer) mod n`.
pub fn assign_positions(
    nb_players: usize,
    dealer_index: usize,
) -> Result<Vec<Position>, EngineError> {
    if !(MIN_NUMBER_OF_PLAYERS..=MAX_NUMBER_OF_PLAYERS).contains(&nb_players) {
        return Err(EngineError::InvalidConfiguration(format!(
            "seat count {} outside {}..={}",
            nb_players, MIN_NUMBER_OF_PLAYERS, MAX_NUMBER_OF_PLAYERS
        )));
    }
    if dealer_index >= nb_players {
        return Err(EngineError::InvalidConfiguration(format!(
            "dealer index {} outside table of {}",
            dealer_index, nb_players
        )));
    }
    Ok((0..nb_players)
        .map(|seat| {
            let offset = (seat + nb_players - dealer_index) % nb_players;
            position_from_offset(offset, nb_players)
        })
        .collect())
}

/// True when `position` acts after every position still in `others`.
pub fn has_position(position: Position, others: &[Position]) -> bool {
    others.iter().all(|&o| o <= position)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heads_up_table() {
        let positions = assign_positions(2, 0).unwrap();
        assert_eq!(
            positions,
            vec![Position::ButtonSmallBlind, Position::BigBlind]
        );
    }

    #[test]
    fn six_handed_table() {
        let positions = assign_positions(6, 0).unwrap();
        assert_eq!(
            positions,
            vec![
                Position::Button,
                Position::SmallBlind,
                Position::BigBlind,
                Position::UnderTheGun,
                Position::Middle,
                Position::Cutoff,
            ]
        );
    }

    #[test]
    fn nine_handed_table() {
        let positions = assign_positions(9, 0).unwrap();
        assert_eq!(
            positions,
            vec![
                Position::Button,
                Position::SmallBlind,
                Position::BigBlind,
                Position::UnderTheGun,
                Position::UnderTheGunPlusOne,
                Position::UnderTheGunPlusTwo,
                Position::Middle,
                Position::Cutoff,
                Position::Late,
            ]
        );
    }

    #[test]
    fn dealer_offset_rotates_assignment() {
        let positions = assign_positions(3, 2).unwrap();
        assert_eq!(
            positions,
            vec![Position::SmallBlind, Position::BigBlind, Position::Button]
        );
    }

    #[test]
    fn assignment_is_defined_for_every_offset() {
        for n in MIN_NUMBER_OF_PLAYERS..=MAX_NUMBER_OF_PLAYERS {
            for dealer in 0..n {
                let positions = assign_positions(n, dealer).unwrap();
                assert_eq!(positions.len(), n);
                assert!(positions.iter().all(|&p| p != Position::Unknown));
                // exactly one dealer seat and one big blind
                let buttons = positions.iter().filter(|p| p.is_button()).count();
                let bbs = positions
                    .iter()
                    .filter(|&&p| p == Position::BigBlind)
                    .count();
                assert_eq!(buttons, 1);
                assert_eq!(bbs, 1);
            }
        }
    }

    #[test]
    fn rejects_invalid_tables() {
        assert!(assign_positions(1, 0).is_err());
        assert!(assign_positions(11, 0).is_err());
        assert!(assign_positions(4, 4).is_err());
    }

    #[test]
    fn button_has_position_over_blinds() {
        assert!(has_position(
            Position::Button,
            &[Position::SmallBlind, Position::BigBlind]
        ));
        assert!(!has_position(
            Position::SmallBlind,
            &[Position::Button, Position::BigBlind]
        ));
    }
}
