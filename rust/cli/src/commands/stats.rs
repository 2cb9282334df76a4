//! Prints the persisted per-strategy statistics.

use std::io::Write;

use crate::config;
use crate::error::CliError;
use crate::sqlite_store::SqlitePlayersStatisticsStore;

pub fn handle_stats_command(
    db: Option<String>,
    strategy: Option<String>,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let db_path = match db {
        Some(path) => path,
        None => {
            config::load()
                .map_err(|e| CliError::Config(e.to_string()))?
                .db_path
        }
    };
    let store = SqlitePlayersStatisticsStore::open(&db_path)?;
    let mut rows = store.dump()?;
    if let Some(filter) = &strategy {
        rows.retain(|(name, _, _)| name == filter);
    }
    if rows.is_empty() {
        writeln!(out, "no statistics recorded in {}", db_path)?;
        return Ok(());
    }

    if json {
        let payload: Vec<serde_json::Value> = rows
            .iter()
            .map(|(name, table_type, stats)| {
                serde_json::json!({
                    "strategy": name,
                    "table_type": table_type,
                    "statistics": stats,
                })
            })
            .collect();
        let text = serde_json::to_string_pretty(&payload)
            .map_err(|e| CliError::Store(e.to_string()))?;
        writeln!(out, "{}", text)?;
        return Ok(());
    }

    writeln!(
        out,
        "statistics from {} as of {}",
        db_path,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    for (name, table_type, stats) in rows {
        writeln!(out, "{} ({})", name, table_type)?;
        writeln!(
            out,
            "  preflop: hands={} folds={} checks={} calls={} raises={} limps={} 3bets={} 4bets={}",
            stats.preflop.hands,
            stats.preflop.folds,
            stats.preflop.checks,
            stats.preflop.calls,
            stats.preflop.raises,
            stats.preflop.limps,
            stats.preflop.three_bets,
            stats.preflop.four_bets,
        )?;
        writeln!(
            out,
            "  flop:    hands={} checks={} bets={} calls={} raises={} folds={} cbets={}/{}",
            stats.flop.hands,
            stats.flop.checks,
            stats.flop.bets,
            stats.flop.calls,
            stats.flop.raises,
            stats.flop.folds,
            stats.flop.continuation_bets,
            stats.flop.continuation_bets_opportunities,
        )?;
        writeln!(
            out,
            "  turn:    hands={} checks={} bets={} calls={} raises={} folds={}",
            stats.turn.hands,
            stats.turn.checks,
            stats.turn.bets,
            stats.turn.calls,
            stats.turn.raises,
            stats.turn.folds,
        )?;
        writeln!(
            out,
            "  river:   hands={} checks={} bets={} calls={} raises={} folds={}",
            stats.river.hands,
            stats.river.checks,
            stats.river.bets,
            stats.river.calls,
            stats.river.raises,
            stats.river.folds,
        )?;
        writeln!(
            out,
            "  ratios:  vpip={:.1} pfr={:.1} af={:.2} afreq={:.1}",
            stats.preflop.voluntary_put_money_in_pot(),
            stats.preflop.preflop_raise(),
            stats.aggression_factor(),
            stats.aggression_frequency(),
        )?;
    }
    Ok(())
}
