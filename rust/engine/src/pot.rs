//! Pot construction and distribution.
//!
//! Chips are distributed in contribution layers: each iteration peels the
//! smallest positive remaining contribution off every seat (folded seats
//! included, their chips are in the pot even though they cannot win it) and
//! awards that layer to the best non-folded hand among the seats that
//! reached it. Odd chips go one per winner clockwise from the dealer.

use crate::player::Player;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotResult {
    /// The players reported as winners: non-folded seats holding the overall
    /// best rank. Side-pot winners with inferior hands are not listed here.
    pub winners: Vec<u32>,
    /// Every layer winner in award order, duplicates across side pots kept.
    pub layer_winners: Vec<u32>,
    pub total: u32,
}

#[derive(Debug)]
pub struct Pot {
    total: u32,
    dealer_id: u32,
}

impl Pot {
    /// `total` is the sum of all committed chips across the hand.
    pub fn new(total: u32, dealer_id: u32) -> Pot {
        Pot { total, dealer_id }
    }

    pub fn distribute(&mut self, seats: &mut [Player]) -> PotResult {
        for p in seats.iter_mut() {
            p.clear_last_money_won();
        }

        let mut remaining: Vec<u32> = seats
            .iter()
            .map(|p| p.cash_at_hand_start().saturating_sub(p.cash()))
            .collect();
        let mut layer_winners: Vec<u32> = Vec::new();
        let mut total_left = self.total;

        while remaining.iter().any(|&r| r > 0) {
            let level = remaining
                .iter()
                .copied()
                .filter(|&r| r > 0)
                .min()
                .unwrap_or(0);
            if level == 0 {
                break;
            }
            let contributors = remaining.iter().filter(|&&r| r >= level).count() as u32;
            let pot_level = (level * contributors).min(total_left);

            let eligible: Vec<usize> = seats
                .iter()
                .enumerate()
                .filter(|(i, p)| remaining[*i] >= level && !p.is_folded())
                .map(|(i, _)| i)
                .collect();

            // only folders reached this layer: nobody can claim it here,
            // the fallback split below handles whatever is left
            if eligible.is_empty() {
                break;
            }

            let best_rank = eligible
                .iter()
                .map(|&i| seats[i].hand_ranking())
                .max()
                .unwrap_or(0);
            let winners: Vec<usize> = eligible
                .iter()
                .copied()
                .filter(|&i| seats[i].hand_ranking() == best_rank)
                .collect();

            let base_share = pot_level / winners.len() as u32;
            let remainder = pot_level % winners.len() as u32;

            for &i in &winners {
                seats[i].award(base_share);
                layer_winners.push(seats[i].id());
            }
            self.award_odd_chips(seats, &winners, remainder);

            for r in remaining.iter_mut() {
                *r = r.saturating_sub(level);
            }
            total_left -= pot_level;
        }

        if total_left > 0 {
            self.fallback_split(seats, &layer_winners, total_left);
        }

        let winners = gui_winners(seats, &layer_winners);
        PotResult {
            winners,
            layer_winners,
            total: self.total,
        }
    }

    /// Gives `remainder` odd chips away one at a time, to winners in
    /// clockwise order starting from the seat after the dealer.
    fn award_odd_chips(&self, seats: &mut [Player], winners: &[usize], remainder: u32) {
        if remainder == 0 || winners.is_empty() {
            return;
        }
        let order = self.clockwise_from_dealer(seats, winners);
        for (_, &i) in (0..remainder).zip(order.iter().cycle()) {
            seats[i].award(1);
        }
    }

    fn clockwise_from_dealer(&self, seats: &[Player], winners: &[usize]) -> Vec<usize> {
        let dealer_index = seats
            .iter()
            .position(|p| p.id() == self.dealer_id)
            .unwrap_or(0);
        let mut order = Vec::with_capacity(winners.len());
        for step in 1..=seats.len() {
            let idx = (dealer_index + step) % seats.len();
            if winners.contains(&idx) {
                order.push(idx);
            }
        }
        order
    }

    /// Splits chips nobody claimed through the layers: evenly among the
    /// winners recorded so far, or among all non-folded seats when there are
    /// none, with the same clockwise odd-chip rule.
    fn fallback_split(&self, seats: &mut [Player], layer_winners: &[u32], total_left: u32) {
        let mut ids: Vec<u32> = layer_winners.to_vec();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            ids = seats
                .iter()
                .filter(|p| !p.is_folded())
                .map(|p| p.id())
                .collect();
        }
        if ids.is_empty() {
            return;
        }

        let indices: Vec<usize> = seats
            .iter()
            .enumerate()
            .filter(|(_, p)| ids.contains(&p.id()))
            .map(|(i, _)| i)
            .collect();
        let base = total_left / indices.len() as u32;
        let remainder = total_left % indices.len() as u32;
        for &i in &indices {
            seats[i].award(base);
        }
        self.award_odd_chips(seats, &indices, remainder);
    }
}

/// The winners reported to the host: non-folded seats whose rank equals the
/// overall maximum. Falls back to the layer winners when no rankings exist.
fn gui_winners(seats: &[Player], layer_winners: &[u32]) -> Vec<u32> {
    let best_rank = seats
        .iter()
        .filter(|p| !p.is_folded())
        .map(|p| p.hand_ranking())
        .max()
        .unwrap_or(0);
    if best_rank == 0 {
        let mut ids: Vec<u32> = layer_winners.to_vec();
        ids.sort_unstable();
        ids.dedup();
        return ids;
    }
    seats
        .iter()
        .filter(|p| !p.is_folded() && p.hand_ranking() == best_rank)
        .map(|p| p.id())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{ActionKind, GameState, PlayerAction};

    fn seat(id: u32, start: u32, committed: u32, ranking: u32, folded: bool) -> Player {
        let mut p = Player::new(id, format!("p{}", id), "UltraTight", start);
        p.reset_for_new_hand();
        p.commit_chips(GameState::Preflop, committed).unwrap();
        p.set_hand_ranking(ranking);
        let kind = if folded { ActionKind::Fold } else { ActionKind::Call };
        p.set_last_action(PlayerAction::new(id, kind, 0));
        p
    }

    fn total(seats: &[Player]) -> u32 {
        seats.iter().map(|p| p.total_bet_amount()).sum()
    }

    #[test]
    fn single_winner_takes_full_pot() {
        let mut seats = vec![seat(0, 1000, 250, 200, false), seat(1, 1000, 250, 100, false)];
        let pot_total = total(&seats);
        let result = Pot::new(pot_total, 0).distribute(&mut seats);
        assert_eq!(result.winners, vec![0]);
        assert_eq!(seats[0].cash(), 1250);
        assert_eq!(seats[1].cash(), 750);
    }

    #[test]
    fn short_stack_wins_main_pot_only() {
        // spec scenario D: stacks 100/300/300, everyone all-in, no folds
        let mut seats = vec![
            seat(0, 100, 100, 150, false),
            seat(1, 300, 300, 100, false),
            seat(2, 300, 300, 120, false),
        ];
        let result = Pot::new(700, 0).distribute(&mut seats);
        assert_eq!(seats[0].cash(), 300);
        assert_eq!(seats[1].cash(), 0);
        assert_eq!(seats[2].cash(), 400);
        // seat 0 holds the overall best hand
        assert_eq!(result.winners, vec![0]);
        assert!(result.layer_winners.contains(&2));
    }

    #[test]
    fn odd_chip_goes_clockwise_from_dealer() {
        // pot of 501 split between tied winners: one layer of 167 x 3 with
        // the third contributor folded
        let mut seats = vec![
            seat(0, 1000, 167, 300, true),
            seat(1, 1000, 167, 150, false),
            seat(2, 1000, 167, 150, false),
        ];
        Pot::new(501, 0).distribute(&mut seats);
        // seat 1 sits clockwise from the dealer (seat 0) and takes the chip
        assert_eq!(seats[1].last_money_won(), 251);
        assert_eq!(seats[2].last_money_won(), 250);
        let after: u32 = seats.iter().map(|p| p.cash()).sum();
        assert_eq!(after, 3000);
    }

    #[test]
    fn folded_best_hand_wins_nothing() {
        let mut seats = vec![
            seat(0, 1000, 200, 300, true),
            seat(1, 1000, 200, 100, false),
            seat(2, 1000, 200, 120, false),
        ];
        let result = Pot::new(600, 0).distribute(&mut seats);
        assert_eq!(result.winners, vec![2]);
        assert_eq!(seats[0].cash(), 800);
        assert_eq!(seats[0].last_money_won(), 0);
        assert_eq!(seats[2].cash(), 1400);
    }

    #[test]
    fn chip_conservation_across_layers() {
        let mut seats = vec![
            seat(0, 120, 120, 90, false),
            seat(1, 500, 400, 70, false),
            seat(2, 800, 400, 70, false),
            seat(3, 60, 60, 10, true),
        ];
        let before: u32 = seats.iter().map(|p| p.cash_at_hand_start()).sum();
        Pot::new(total(&seats), 2).distribute(&mut seats);
        let after: u32 = seats.iter().map(|p| p.cash()).sum();
        assert_eq!(before, after);
    }

    #[test]
    fn all_folders_leave_pot_undistributed() {
        let mut seats = vec![
            seat(0, 1000, 250, 100, true),
            seat(1, 1000, 250, 100, true),
        ];
        let result = Pot::new(500, 1).distribute(&mut seats);
        assert!(result.winners.is_empty());
        assert_eq!(seats[0].cash(), 750);
        assert_eq!(seats[1].cash(), 750);
    }

    #[test]
    fn layer_shares_differ_by_at_most_one_chip() {
        let mut seats = vec![
            seat(0, 1000, 334, 150, false),
            seat(1, 1000, 334, 150, false),
            seat(2, 1000, 333, 150, false),
        ];
        Pot::new(1001, 0).distribute(&mut seats);
        let won: Vec<u32> = seats.iter().map(|p| p.last_money_won()).collect();
        let max = won.iter().max().unwrap();
        let min = won.iter().min().unwrap();
        assert!(max - min <= 2); // two layers, each off by at most one
        assert_eq!(won.iter().sum::<u32>(), 1001);
    }
}
