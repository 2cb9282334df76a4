//! Persistence port for per-strategy statistics.

use crate::player::Player;
use crate::stats::StatisticsBySeats;

/// Error surface of a statistics store. Store failures never abort a hand;
/// the session logs them and retries the delta on the next save.
#[derive(Debug, thiserror::Error)]
#[error("statistics store: {0}")]
pub struct StoreError(pub String);

/// Contract every statistics backend implements.
///
/// `load` returns one `PlayerStatistics` per seat count (2..=10), with the
/// three table-size classes fanned out over their seat ranges. `save`
/// extracts each seated player's delta since the previous save and applies
/// it atomically; seats without a persistable strategy or without new
/// preflop hands are skipped.
pub trait PlayersStatisticsStore {
    fn load(&mut self, strategy_name: &str) -> Result<StatisticsBySeats, StoreError>;

    fn save(&mut self, seats: &mut [Player]) -> Result<(), StoreError>;
}

/// A store that persists nothing. Used by tests and headless runs.
#[derive(Debug, Default)]
pub struct NullPlayersStatisticsStore;

impl PlayersStatisticsStore for NullPlayersStatisticsStore {
    fn load(&mut self, _strategy_name: &str) -> Result<StatisticsBySeats, StoreError> {
        Ok(StatisticsBySeats::default())
    }

    fn save(&mut self, seats: &mut [Player]) -> Result<(), StoreError> {
        // still advance the baselines so a later real store only sees new hands
        let nb_players = seats.len();
        for player in seats.iter_mut() {
            let _ = player
                .statistics_updater_mut()
                .delta_and_update_baseline(nb_players);
        }
        Ok(())
    }
}
