//! Replays a JSONL hand log as a readable transcript.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};

use felt_engine::actions::PlayerAction;
use felt_engine::logger::HandRecord;

use crate::error::CliError;
use crate::formatters::{format_action, format_board};

pub fn handle_replay_command(input: String, out: &mut dyn Write) -> Result<(), CliError> {
    let file = File::open(&input)
        .map_err(|e| CliError::InvalidInput(format!("cannot open {}: {}", input, e)))?;
    let reader = BufReader::new(file);

    let mut hands = 0usize;
    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: HandRecord = serde_json::from_str(&line).map_err(|e| {
            CliError::InvalidInput(format!("bad record on line {}: {}", line_number + 1, e))
        })?;
        hands += 1;

        writeln!(out, "=== hand {} ===", record.hand_id)?;
        if let Some(seed) = record.seed {
            writeln!(out, "seed: {}", seed)?;
        }
        let mut current_round = None;
        for action in &record.actions {
            if current_round != Some(action.round) {
                writeln!(out, "-- {} --", action.round)?;
                current_round = Some(action.round);
            }
            let rendered = format_action(
                &format!("player {}", action.player_id),
                &PlayerAction::new(action.player_id, action.kind, action.amount),
            );
            writeln!(out, "{}", rendered)?;
        }
        if !record.board.is_empty() {
            writeln!(out, "board: {}", format_board(&record.board))?;
        }
        if let Some(showdown) = &record.showdown {
            let winners: Vec<String> = showdown
                .winners
                .iter()
                .map(|id| format!("player {}", id))
                .collect();
            writeln!(out, "pot of {} goes to {}", record.pot, winners.join(", "))?;
        }
        writeln!(out)?;
    }

    if hands == 0 {
        return Err(CliError::InvalidInput(format!("{} holds no hands", input)));
    }
    writeln!(out, "replayed {} hand(s)", hands)?;
    Ok(())
}
