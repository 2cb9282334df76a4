//! Command-level integration: sim batches, interactive play, stats output.

use std::io::Cursor;

fn tmp_db(dir: &tempfile::TempDir) -> String {
    dir.path().join("stats.db").to_str().unwrap().to_string()
}

#[test]
fn sim_runs_the_requested_number_of_hands() {
    let dir = tempfile::tempdir().unwrap();
    let db = tmp_db(&dir);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = felt_cli::run(
        [
            "felt", "sim", "--hands", "5", "--players", "3", "--seed", "11", "--db", db.as_str(),
        ],
        &mut out,
        &mut err,
    );
    let output = String::from_utf8(out).unwrap();
    assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));
    assert!(output.contains("simulated 5 hand(s)"), "{}", output);
}

#[test]
fn sim_persists_statistics_for_the_bots() {
    let dir = tempfile::tempdir().unwrap();
    let db = tmp_db(&dir);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = felt_cli::run(
        [
            "felt", "sim", "--hands", "3", "--players", "2", "--seed", "7", "--db", db.as_str(),
        ],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0);

    let mut out = Vec::new();
    let code = felt_cli::run(["felt", "stats", "--db", db.as_str()], &mut out, &mut err);
    assert_eq!(code, 0);
    let output = String::from_utf8(out).unwrap();
    // two bots played three heads-up hands; their strategies have rows
    assert!(output.contains("(HU)"), "{}", output);
    assert!(output.contains("preflop: hands="), "{}", output);
}

#[test]
fn sim_writes_a_hand_log_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let db = tmp_db(&dir);
    let log = dir.path().join("hands.jsonl");
    let log_path = log.to_str().unwrap().to_string();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = felt_cli::run(
        [
            "felt", "sim", "--hands", "2", "--players", "2", "--seed", "3", "--db", db.as_str(),
            "--log", log_path.as_str(),
        ],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0);
    let contents = std::fs::read_to_string(&log).unwrap();
    assert_eq!(contents.lines().count(), 2);
    // every line is a JSON hand record
    for line in contents.lines() {
        let record: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(record.get("hand_id").is_some());
        assert!(record.get("actions").is_some());
    }

    // the log replays as a transcript
    let mut out = Vec::new();
    let code = felt_cli::run(
        ["felt", "replay", "--input", log_path.as_str()],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0);
    let transcript = String::from_utf8(out).unwrap();
    assert!(transcript.contains("replayed 2 hand(s)"), "{}", transcript);
    assert!(transcript.contains("-- Preflop --"), "{}", transcript);
}

#[test]
fn play_session_can_be_quit_from_stdin() {
    use felt_cli::commands::{handle_play_command, PlayOptions};

    let dir = tempfile::tempdir().unwrap();
    let db = tmp_db(&dir);
    let mut out = Vec::new();
    let mut err = Vec::new();

    // fold whenever prompted, quit after the third prompt
    let input = "fold\nfold\nq\n";
    let mut stdin = Cursor::new(input.as_bytes());
    let opts = PlayOptions {
        players: Some(2),
        hands: None,
        seed: Some(5),
        profile: Some("tight".to_string()),
        db: Some(db),
    };
    let result = handle_play_command(opts, &mut out, &mut err, &mut stdin);
    assert!(result.is_ok());
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("session over"), "{}", output);
}
