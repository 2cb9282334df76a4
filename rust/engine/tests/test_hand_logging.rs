//! JSONL hand records written through the session logger.

mod common;

use felt_engine::actions::ActionKind;
use felt_engine::logger::{HandLogger, HandRecord};
use felt_engine::session::SessionStatus;

use common::{build_session, scripted_seat, session_config, StubEvaluator};

use felt_engine::actions::ActionKind::{Call, Check};

#[test]
fn completed_hands_are_appended_as_json_lines() {
    let dir = std::env::temp_dir().join(format!("felt-log-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("hands.jsonl");

    let seats = vec![
        scripted_seat("sb", &[(Call, 0), (Check, 0), (Check, 0), (Check, 0)]),
        scripted_seat("bb", &[(Check, 0), (Check, 0), (Check, 0), (Check, 0)]),
    ];
    let evaluator = StubEvaluator::with_ranks(&[100, 200, 100, 200]);
    let mut session = build_session(session_config(10, 1000), seats, evaluator);
    session.set_hand_logger(HandLogger::create(&path).unwrap());

    for _ in 0..2 {
        session.start_hand().unwrap();
        assert_eq!(session.advance().unwrap(), SessionStatus::HandComplete);
    }

    let contents = std::fs::read_to_string(&path).unwrap();
    let records: Vec<HandRecord> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert!(first.hand_id.ends_with("-000001"));
    assert_eq!(first.board.len(), 5);
    assert_eq!(first.pot, 40);
    assert!(first.ts.is_some());
    // blinds plus the scripted actions are all in the log
    assert!(first
        .actions
        .iter()
        .any(|a| a.kind == ActionKind::PostSmallBlind));
    assert!(first.actions.iter().any(|a| a.kind == ActionKind::Call));
    let showdown = first.showdown.as_ref().unwrap();
    assert_eq!(showdown.winners, vec![1]);

    // each hand derives its own seed from the session's
    assert_ne!(records[0].seed, records[1].seed);

    std::fs::remove_dir_all(&dir).ok();
}
