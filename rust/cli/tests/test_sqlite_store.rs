//! SQLite statistics store: save/load round trips and delta semantics.

use felt_engine::actions::{ActionKind, GameState};
use felt_engine::player::Player;
use felt_engine::stats::{ActionRecordContext, TableSizeClass};
use felt_engine::store::PlayersStatisticsStore;
use felt_cli::sqlite_store::SqlitePlayersStatisticsStore;

fn player_with_counts(id: u32, strategy: &str, checks: u32, calls: u32) -> Player {
    let mut p = Player::new(id, format!("p{}", id), strategy, 1000);
    let updater = p.statistics_updater_mut();
    updater.record_street_participation(2, GameState::Preflop);
    for _ in 0..checks {
        updater.record_action(
            2,
            GameState::Preflop,
            ActionKind::Check,
            ActionRecordContext::default(),
        );
    }
    for _ in 0..calls {
        updater.record_action(
            2,
            GameState::Preflop,
            ActionKind::Call,
            ActionRecordContext::default(),
        );
    }
    p
}

#[test]
fn save_then_load_round_trips_per_class() {
    let mut store = SqlitePlayersStatisticsStore::open_in_memory().unwrap();

    let mut seats = vec![
        player_with_counts(0, "TightAggressive", 1, 0),
        player_with_counts(1, "UltraTight", 0, 1),
    ];
    store.save(&mut seats).unwrap();

    let loaded = store.load("TightAggressive").unwrap();
    // heads-up data lands in the HU class, index 2
    assert_eq!(loaded[2].preflop.hands, 1);
    assert_eq!(loaded[2].preflop.checks, 1);
    assert_eq!(loaded[2].preflop.calls, 0);
    // other classes stay empty
    assert_eq!(loaded[6].preflop.hands, 0);
    assert_eq!(loaded[9].preflop.hands, 0);

    let other = store.load("UltraTight").unwrap();
    assert_eq!(other[2].preflop.calls, 1);
    assert_eq!(other[2].preflop.limps, 1);
}

#[test]
fn deltas_accumulate_across_saves() {
    let mut store = SqlitePlayersStatisticsStore::open_in_memory().unwrap();

    let mut seats = vec![
        player_with_counts(0, "Maniac", 1, 0),
        player_with_counts(1, "UltraTight", 0, 0),
    ];
    store.save(&mut seats).unwrap();

    // more play on the same seats, then a second save
    seats[0]
        .statistics_updater_mut()
        .record_street_participation(2, GameState::Preflop);
    seats[0].statistics_updater_mut().record_action(
        2,
        GameState::Preflop,
        ActionKind::Raise,
        ActionRecordContext::default(),
    );
    store.save(&mut seats).unwrap();

    let loaded = store.load("Maniac").unwrap();
    assert_eq!(loaded[2].preflop.hands, 2);
    assert_eq!(loaded[2].preflop.checks, 1);
    assert_eq!(loaded[2].preflop.raises, 1);
}

#[test]
fn zero_delta_saves_are_no_ops() {
    let mut store = SqlitePlayersStatisticsStore::open_in_memory().unwrap();

    let mut seats = vec![
        player_with_counts(0, "Maniac", 1, 0),
        player_with_counts(1, "UltraTight", 0, 0),
    ];
    store.save(&mut seats).unwrap();
    // nothing new happened; saving twice must not change the counts
    store.save(&mut seats).unwrap();

    let loaded = store.load("Maniac").unwrap();
    assert_eq!(loaded[2].preflop.hands, 1);
    assert_eq!(loaded[2].preflop.checks, 1);
}

#[test]
fn human_seat_is_never_persisted() {
    let mut store = SqlitePlayersStatisticsStore::open_in_memory().unwrap();

    let mut seats = vec![
        player_with_counts(0, "Human", 1, 0),
        player_with_counts(1, "Maniac", 1, 0),
    ];
    store.save(&mut seats).unwrap();

    let rows = store.dump().unwrap();
    assert!(rows.iter().all(|(name, _, _)| name != "Human"));
    assert!(rows
        .iter()
        .any(|(name, _, stats)| name == "Maniac" && stats.preflop.hands == 1));
}

#[test]
fn short_handed_rows_fan_out_over_their_seat_range() {
    let mut store = SqlitePlayersStatisticsStore::open_in_memory().unwrap();

    // a 4-seat table writes into the SH class
    let mut seats = vec![
        {
            let mut p = Player::new(0, "p0", "TightAggressive", 1000);
            p.statistics_updater_mut()
                .record_street_participation(4, GameState::Preflop);
            p
        },
        Player::new(1, "p1", "Human", 1000),
        Player::new(2, "p2", "Human", 1000),
        Player::new(3, "p3", "Human", 1000),
    ];
    store.save(&mut seats).unwrap();

    let loaded = store.load("TightAggressive").unwrap();
    for seats_at_table in TableSizeClass::ShortHanded.seat_range() {
        assert_eq!(loaded[seats_at_table].preflop.hands, 1);
    }
    assert_eq!(loaded[2].preflop.hands, 0);
    assert_eq!(loaded[7].preflop.hands, 0);
}

#[test]
fn statistics_survive_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.db");
    let path = path.to_str().unwrap();

    {
        let mut store = SqlitePlayersStatisticsStore::open(path).unwrap();
        let mut seats = vec![
            player_with_counts(0, "LooseAggressive", 0, 1),
            player_with_counts(1, "UltraTight", 0, 0),
        ];
        store.save(&mut seats).unwrap();
    }

    let mut reopened = SqlitePlayersStatisticsStore::open(path).unwrap();
    let loaded = reopened.load("LooseAggressive").unwrap();
    assert_eq!(loaded[2].preflop.calls, 1);
}
