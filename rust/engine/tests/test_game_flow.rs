//! End-to-end hand scenarios driven through the session.

mod common;

use felt_engine::session::SessionStatus;

use common::{build_session, capture_events, scripted_seat, session_config, StubEvaluator};

use felt_engine::actions::ActionKind::{Bet, Call, Check, Fold};

#[test]
fn heads_up_checked_down_single_winner() {
    // N=2, stacks 1000, SB=10: SB calls, BB checks, then checks to showdown
    let seats = vec![
        scripted_seat("sb", &[(Call, 0), (Check, 0), (Check, 0), (Check, 0)]),
        scripted_seat("bb", &[(Check, 0), (Check, 0), (Check, 0), (Check, 0)]),
    ];
    let evaluator = StubEvaluator::with_ranks(&[1000, 2000]);
    let mut session = build_session(session_config(10, 1000), seats, evaluator);
    let captured = capture_events(&mut session);

    session.start_hand().unwrap();
    let status = session.advance().unwrap();
    assert_eq!(status, SessionStatus::HandComplete);

    let players = session.players();
    assert_eq!(players[0].cash(), 980);
    assert_eq!(players[1].cash(), 1020);

    let (winners, pot) = captured.completed.borrow().clone().unwrap();
    assert_eq!(winners, vec![1]);
    assert_eq!(pot, 40);

    // the big blind checked last and nobody beats their rank afterwards
    assert_eq!(*captured.reveal_order.borrow(), vec![1]);
}

#[test]
fn heads_up_flop_bet_and_call() {
    // SB calls, BB checks; flop: BB checks, SB bets 200, BB calls; checked
    // down from there
    let seats = vec![
        scripted_seat("sb", &[(Call, 0), (Bet, 200), (Check, 0), (Check, 0)]),
        scripted_seat(
            "bb",
            &[(Check, 0), (Check, 0), (Call, 0), (Check, 0), (Check, 0)],
        ),
    ];
    let evaluator = StubEvaluator::with_ranks(&[1000, 2000]);
    let mut session = build_session(session_config(10, 1000), seats, evaluator);
    let captured = capture_events(&mut session);

    session.start_hand().unwrap();
    assert_eq!(session.advance().unwrap(), SessionStatus::HandComplete);

    let players = session.players();
    assert_eq!(players[0].cash(), 780);
    assert_eq!(players[1].cash(), 1220);
    let (winners, pot) = captured.completed.borrow().clone().unwrap();
    assert_eq!(winners, vec![1]);
    assert_eq!(pot, 440);
}

#[test]
fn three_way_fold_excludes_best_rank() {
    // dealer folds preflop; SB and BB see a showdown the BB wins. The
    // folded dealer would have held the best hand but gets nothing.
    let seats = vec![
        scripted_seat("dealer", &[(Fold, 0)]),
        scripted_seat("sb", &[(Call, 0), (Bet, 200), (Check, 0), (Check, 0)]),
        scripted_seat(
            "bb",
            &[(Check, 0), (Call, 0), (Check, 0), (Check, 0)],
        ),
    ];
    let evaluator = StubEvaluator::with_ranks(&[1000, 2000]);
    let mut session = build_session(session_config(10, 1000), seats, evaluator);
    let captured = capture_events(&mut session);

    session.start_hand().unwrap();
    assert_eq!(session.advance().unwrap(), SessionStatus::HandComplete);

    let players = session.players();
    assert_eq!(players[0].cash(), 1000);
    assert_eq!(players[1].cash(), 780);
    assert_eq!(players[2].cash(), 1220);
    let (winners, _) = captured.completed.borrow().clone().unwrap();
    assert_eq!(winners, vec![2]);
    assert_eq!(players[0].last_money_won(), 0);
}

#[test]
fn everyone_folding_ends_the_hand_immediately() {
    // three seats; everyone folds to the big blind, who never acts
    let seats = vec![
        scripted_seat("dealer", &[(Fold, 0)]),
        scripted_seat("sb", &[(Fold, 0)]),
        scripted_seat("bb", &[]),
    ];
    let evaluator = StubEvaluator::with_ranks(&[]);
    let mut session = build_session(session_config(10, 1000), seats, evaluator);
    let captured = capture_events(&mut session);

    session.start_hand().unwrap();
    assert_eq!(session.advance().unwrap(), SessionStatus::HandComplete);

    let players = session.players();
    assert_eq!(players[0].cash(), 1000);
    assert_eq!(players[1].cash(), 990);
    assert_eq!(players[2].cash(), 1010);

    // no showdown, so nobody reveals
    assert!(captured.reveal_order.borrow().is_empty());
    let (winners, pot) = captured.completed.borrow().clone().unwrap();
    assert_eq!(winners, vec![2]);
    assert_eq!(pot, 30);
}

#[test]
fn chip_conservation_over_several_hands() {
    let seats = vec![
        scripted_seat("a", &[]),
        scripted_seat("b", &[]),
        scripted_seat("c", &[]),
    ];
    let evaluator = StubEvaluator::with_ranks(&[5, 9, 7, 9, 5, 7, 7, 9, 5]);
    let mut session = build_session(session_config(10, 500), seats, evaluator);

    for _ in 0..3 {
        if !session.can_start_hand() {
            break;
        }
        session.start_hand().unwrap();
        assert_eq!(session.advance().unwrap(), SessionStatus::HandComplete);
        let total: u32 = session.players().iter().map(|p| p.cash()).sum();
        assert_eq!(total, 1500);
    }
}

#[test]
fn dealer_button_rotates_between_hands() {
    let seats = vec![
        scripted_seat("a", &[]),
        scripted_seat("b", &[]),
        scripted_seat("c", &[]),
    ];
    let evaluator = StubEvaluator::with_ranks(&[1, 1, 1, 1, 1, 1]);
    let mut session = build_session(session_config(10, 1000), seats, evaluator);

    session.start_hand().unwrap();
    let first_dealer = session.dealer_id();
    session.advance().unwrap();

    session.start_hand().unwrap();
    let second_dealer = session.dealer_id();
    session.advance().unwrap();

    assert_ne!(first_dealer, second_dealer);
}
