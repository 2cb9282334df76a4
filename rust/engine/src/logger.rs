//! JSONL hand-record logging.
//!
//! One line per completed hand: actions, board, winners, timestamp. This is
//! a diagnostic facility, not a queryable history store.

use serde::{Deserialize, Serialize};

use crate::actions::{ActionKind, GameState};
use crate::cards::Card;

/// Records a single player action within a hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player_id: u32,
    pub round: GameState,
    pub kind: ActionKind,
    pub amount: u32,
}

/// Showdown outcome of a hand, when one was reached.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShowdownInfo {
    pub winners: Vec<u32>,
    pub reveal_order: Vec<u32>,
}

/// Complete record of one hand, serialized to JSONL.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Unique identifier for this hand (format: YYYYMMDD-NNNNNN)
    pub hand_id: String,
    /// RNG seed used for the deck shuffle (enables deterministic replay)
    pub seed: Option<u64>,
    pub actions: Vec<ActionRecord>,
    pub board: Vec<Card>,
    pub pot: u32,
    /// Timestamp when the hand was played (RFC3339)
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

pub fn format_hand_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct HandLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl HandLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                let _ = create_dir_all(parent);
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that formats ids but writes nowhere.
    pub fn disabled() -> Self {
        Self {
            writer: None,
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_hand_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &HandRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_ids_are_sequential() {
        let mut logger = HandLogger::disabled();
        let first = logger.next_id();
        let second = logger.next_id();
        assert!(first.ends_with("-000001"));
        assert!(second.ends_with("-000002"));
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = HandRecord {
            hand_id: format_hand_id("20250101", 7),
            seed: Some(42),
            actions: vec![ActionRecord {
                player_id: 0,
                round: GameState::Preflop,
                kind: ActionKind::Call,
                amount: 20,
            }],
            board: vec!["Ah".parse().unwrap()],
            pot: 40,
            ts: Some("2025-01-01T00:00:00Z".into()),
            showdown: None,
        };
        let line = serde_json::to_string(&record).unwrap();
        let back: HandRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(back, record);
    }
}
