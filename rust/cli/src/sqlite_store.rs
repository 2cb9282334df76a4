//! SQLite-backed statistics store.
//!
//! One row per `(strategy_name, table_type)` cell. Saves apply deltas with
//! `UPDATE ... SET col = col + ?` after an `INSERT OR IGNORE` creates the
//! row; loads fan each class row out over its seat-count range.

use rusqlite::{params, Connection};

use felt_engine::player::Player;
use felt_engine::stats::{PlayerStatistics, StatisticsBySeats, TableSizeClass};
use felt_engine::store::{PlayersStatisticsStore, StoreError};
use felt_engine::strategy::NO_STRATEGY_NAME;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS players_statistics (
    strategy_name TEXT NOT NULL,
    table_type TEXT NOT NULL CHECK(table_type IN ('HU', 'SH', 'FR')),

    /* preflop */
    pf_hands INTEGER NOT NULL,
    pf_checks INTEGER NOT NULL,
    pf_calls INTEGER NOT NULL,
    pf_raises INTEGER NOT NULL,
    pf_threeBets INTEGER NOT NULL,
    pf_callThreeBets INTEGER NOT NULL,
    pf_callThreeBetsOpportunities INTEGER NOT NULL,
    pf_fourBets INTEGER NOT NULL,
    pf_folds INTEGER NOT NULL,
    pf_limps INTEGER NOT NULL,

    /* flop */
    f_hands INTEGER NOT NULL,
    f_checks INTEGER NOT NULL,
    f_bets INTEGER NOT NULL,
    f_calls INTEGER NOT NULL,
    f_raises INTEGER NOT NULL,
    f_folds INTEGER NOT NULL,
    f_continuationBets INTEGER NOT NULL,
    f_continuationBetsOpportunities INTEGER NOT NULL,

    /* turn */
    t_hands INTEGER NOT NULL,
    t_checks INTEGER NOT NULL,
    t_bets INTEGER NOT NULL,
    t_calls INTEGER NOT NULL,
    t_raises INTEGER NOT NULL,
    t_folds INTEGER NOT NULL,

    /* river */
    r_hands INTEGER NOT NULL,
    r_checks INTEGER NOT NULL,
    r_bets INTEGER NOT NULL,
    r_calls INTEGER NOT NULL,
    r_raises INTEGER NOT NULL,
    r_folds INTEGER NOT NULL,

    /* showdown */
    sd_wentToShowdown INTEGER NOT NULL,
    sd_wonShowdown INTEGER NOT NULL,
    sd_wonWithoutShowdown INTEGER NOT NULL,

    /* bet sizing */
    avg_bet_size_ratio REAL NOT NULL DEFAULT 0.0,

    PRIMARY KEY (strategy_name, table_type)
);
"#;

pub struct SqlitePlayersStatisticsStore {
    conn: Connection,
}

impl SqlitePlayersStatisticsStore {
    pub fn open(path: &str) -> Result<Self, rusqlite::Error> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    fn initialize_row(&self, strategy_name: &str, class: TableSizeClass) -> rusqlite::Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO players_statistics(
                strategy_name, table_type,
                pf_hands,pf_checks,pf_calls,pf_raises,pf_threeBets,pf_callThreeBets,
                pf_callThreeBetsOpportunities,pf_fourBets,pf_folds,pf_limps,
                f_hands,f_checks,f_bets,f_calls,f_raises,f_folds,
                f_continuationBets,f_continuationBetsOpportunities,
                t_hands,t_checks,t_bets,t_calls,t_raises,t_folds,
                r_hands,r_checks,r_bets,r_calls,r_raises,r_folds,
                sd_wentToShowdown,sd_wonShowdown,sd_wonWithoutShowdown,
                avg_bet_size_ratio
            ) VALUES (?1, ?2,
                0,0,0,0,0,0,0,0,0,0,
                0,0,0,0,0,0,0,0,
                0,0,0,0,0,0,
                0,0,0,0,0,0,
                0,0,0,
                0.0)",
            params![strategy_name, class.as_str()],
        )?;
        Ok(())
    }

    fn apply_delta(
        &self,
        strategy_name: &str,
        class: TableSizeClass,
        delta: &PlayerStatistics,
    ) -> rusqlite::Result<()> {
        self.conn.execute(
            "UPDATE players_statistics SET
                pf_hands=pf_hands+?3,pf_checks=pf_checks+?4,pf_calls=pf_calls+?5,
                pf_raises=pf_raises+?6,pf_threeBets=pf_threeBets+?7,
                pf_callThreeBets=pf_callThreeBets+?8,
                pf_callThreeBetsOpportunities=pf_callThreeBetsOpportunities+?9,
                pf_fourBets=pf_fourBets+?10,pf_folds=pf_folds+?11,pf_limps=pf_limps+?12,
                f_hands=f_hands+?13,f_checks=f_checks+?14,f_bets=f_bets+?15,
                f_calls=f_calls+?16,f_raises=f_raises+?17,f_folds=f_folds+?18,
                f_continuationBets=f_continuationBets+?19,
                f_continuationBetsOpportunities=f_continuationBetsOpportunities+?20,
                t_hands=t_hands+?21,t_checks=t_checks+?22,t_bets=t_bets+?23,
                t_calls=t_calls+?24,t_raises=t_raises+?25,t_folds=t_folds+?26,
                r_hands=r_hands+?27,r_checks=r_checks+?28,r_bets=r_bets+?29,
                r_calls=r_calls+?30,r_raises=r_raises+?31,r_folds=r_folds+?32,
                sd_wentToShowdown=sd_wentToShowdown+?33,
                sd_wonShowdown=sd_wonShowdown+?34,
                sd_wonWithoutShowdown=sd_wonWithoutShowdown+?35,
                avg_bet_size_ratio=?36
             WHERE strategy_name=?1 AND table_type=?2",
            params![
                strategy_name,
                class.as_str(),
                delta.preflop.hands,
                delta.preflop.checks,
                delta.preflop.calls,
                delta.preflop.raises,
                delta.preflop.three_bets,
                delta.preflop.call_three_bets,
                delta.preflop.call_three_bets_opportunities,
                delta.preflop.four_bets,
                delta.preflop.folds,
                delta.preflop.limps,
                delta.flop.hands,
                delta.flop.checks,
                delta.flop.bets,
                delta.flop.calls,
                delta.flop.raises,
                delta.flop.folds,
                delta.flop.continuation_bets,
                delta.flop.continuation_bets_opportunities,
                delta.turn.hands,
                delta.turn.checks,
                delta.turn.bets,
                delta.turn.calls,
                delta.turn.raises,
                delta.turn.folds,
                delta.river.hands,
                delta.river.checks,
                delta.river.bets,
                delta.river.calls,
                delta.river.raises,
                delta.river.folds,
                delta.went_to_showdown,
                delta.won_showdown,
                delta.won_without_showdown,
                // not tracked yet; the column is carried for the host
                0.0f64,
            ],
        )?;
        Ok(())
    }

    /// Every stored row, for display.
    pub fn dump(&self) -> rusqlite::Result<Vec<(String, String, PlayerStatistics)>> {
        let mut stmt = self.conn.prepare(
            "SELECT strategy_name, table_type,
                pf_hands,pf_checks,pf_calls,pf_raises,pf_threeBets,pf_callThreeBets,
                pf_callThreeBetsOpportunities,pf_fourBets,pf_folds,pf_limps,
                f_hands,f_checks,f_bets,f_calls,f_raises,f_folds,
                f_continuationBets,f_continuationBetsOpportunities,
                t_hands,t_checks,t_bets,t_calls,t_raises,t_folds,
                r_hands,r_checks,r_bets,r_calls,r_raises,r_folds,
                sd_wentToShowdown,sd_wonShowdown,sd_wonWithoutShowdown
             FROM players_statistics ORDER BY strategy_name, table_type",
        )?;
        let rows = stmt.query_map([], |row| {
            let strategy: String = row.get(0)?;
            let table_type: String = row.get(1)?;
            Ok((strategy, table_type, read_statistics(row)?))
        })?;
        rows.collect()
    }
}

fn read_statistics(row: &rusqlite::Row<'_>) -> rusqlite::Result<PlayerStatistics> {
    let mut ps = PlayerStatistics::default();
    ps.preflop.hands = row.get(2)?;
    ps.preflop.checks = row.get(3)?;
    ps.preflop.calls = row.get(4)?;
    ps.preflop.raises = row.get(5)?;
    ps.preflop.three_bets = row.get(6)?;
    ps.preflop.call_three_bets = row.get(7)?;
    ps.preflop.call_three_bets_opportunities = row.get(8)?;
    ps.preflop.four_bets = row.get(9)?;
    ps.preflop.folds = row.get(10)?;
    ps.preflop.limps = row.get(11)?;
    ps.flop.hands = row.get(12)?;
    ps.flop.checks = row.get(13)?;
    ps.flop.bets = row.get(14)?;
    ps.flop.calls = row.get(15)?;
    ps.flop.raises = row.get(16)?;
    ps.flop.folds = row.get(17)?;
    ps.flop.continuation_bets = row.get(18)?;
    ps.flop.continuation_bets_opportunities = row.get(19)?;
    ps.turn.hands = row.get(20)?;
    ps.turn.checks = row.get(21)?;
    ps.turn.bets = row.get(22)?;
    ps.turn.calls = row.get(23)?;
    ps.turn.raises = row.get(24)?;
    ps.turn.folds = row.get(25)?;
    ps.river.hands = row.get(26)?;
    ps.river.checks = row.get(27)?;
    ps.river.bets = row.get(28)?;
    ps.river.calls = row.get(29)?;
    ps.river.raises = row.get(30)?;
    ps.river.folds = row.get(31)?;
    ps.went_to_showdown = row.get(32)?;
    ps.won_showdown = row.get(33)?;
    ps.won_without_showdown = row.get(34)?;
    Ok(ps)
}

impl PlayersStatisticsStore for SqlitePlayersStatisticsStore {
    fn load(&mut self, strategy_name: &str) -> Result<StatisticsBySeats, StoreError> {
        let mut results = StatisticsBySeats::default();
        if strategy_name.is_empty() || strategy_name == NO_STRATEGY_NAME {
            return Ok(results);
        }
        for class in [
            TableSizeClass::HeadsUp,
            TableSizeClass::ShortHanded,
            TableSizeClass::FullRing,
        ] {
            self.initialize_row(strategy_name, class)
                .map_err(|e| StoreError(e.to_string()))?;
        }

        let mut stmt = self
            .conn
            .prepare(
                "SELECT strategy_name, table_type,
                    pf_hands,pf_checks,pf_calls,pf_raises,pf_threeBets,pf_callThreeBets,
                    pf_callThreeBetsOpportunities,pf_fourBets,pf_folds,pf_limps,
                    f_hands,f_checks,f_bets,f_calls,f_raises,f_folds,
                    f_continuationBets,f_continuationBetsOpportunities,
                    t_hands,t_checks,t_bets,t_calls,t_raises,t_folds,
                    r_hands,r_checks,r_bets,r_calls,r_raises,r_folds,
                    sd_wentToShowdown,sd_wonShowdown,sd_wonWithoutShowdown
                 FROM players_statistics WHERE strategy_name=?1",
            )
            .map_err(|e| StoreError(e.to_string()))?;
        let rows = stmt
            .query_map(params![strategy_name], |row| {
                let table_type: String = row.get(1)?;
                Ok((table_type, read_statistics(row)?))
            })
            .map_err(|e| StoreError(e.to_string()))?;

        for row in rows {
            let (table_type, ps) = row.map_err(|e| StoreError(e.to_string()))?;
            if let Some(class) = TableSizeClass::from_str(&table_type) {
                for seats in class.seat_range() {
                    results[seats] = ps;
                }
            }
        }
        Ok(results)
    }

    fn save(&mut self, seats: &mut [Player]) -> Result<(), StoreError> {
        let nb_players = seats.len();
        let class = TableSizeClass::from_seats(nb_players);
        for player in seats.iter_mut() {
            let strategy_name = player.strategy_name().to_string();
            if strategy_name.is_empty() || strategy_name == NO_STRATEGY_NAME {
                continue;
            }
            let delta = player
                .statistics_updater_mut()
                .delta_and_update_baseline(nb_players);
            if delta.preflop.hands == 0 {
                continue;
            }
            self.initialize_row(&strategy_name, class)
                .map_err(|e| StoreError(e.to_string()))?;
            self.apply_delta(&strategy_name, class, &delta)
                .map_err(|e| StoreError(e.to_string()))?;
        }
        Ok(())
    }
}
