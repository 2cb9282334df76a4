//! All-in boundary behaviors: side pots, board runout, short blinds.

mod common;

use felt_engine::actions::GameState;
use felt_engine::session::SessionStatus;

use common::{build_session, capture_events, scripted_seat, session_config, StubEvaluator};

use felt_engine::actions::ActionKind::{AllIn, Call};

#[test]
fn short_stack_wins_main_pot_three_way_jam() {
    // stacks 100/300/300; the dealer jams short, both blinds get it in too
    use felt_engine::actions::PlayerAction;
    use felt_engine::deck::Deck;
    use felt_engine::events::GameEvents;
    use felt_engine::hand::Hand;
    use felt_engine::player::Player;

    let seats = vec![
        Player::new(0, "short", "Scripted", 100),
        Player::new(1, "sb", "Scripted", 300),
        Player::new(2, "bb", "Scripted", 300),
    ];
    let mut deck = Deck::new_with_seed(42);
    deck.shuffle();
    let evaluator = StubEvaluator::with_ranks(&[150, 100, 120]);
    let mut events = GameEvents::default();
    let mut hand = Hand::new(seats, 0, 10, deck, evaluator).unwrap();
    hand.begin(&mut events).unwrap();

    assert_eq!(hand.next_to_act(), Some(0));
    hand.handle_player_action(PlayerAction::new(0, AllIn, 0), &mut events)
        .unwrap();
    hand.handle_player_action(PlayerAction::new(1, AllIn, 0), &mut events)
        .unwrap();
    hand.handle_player_action(PlayerAction::new(2, Call, 0), &mut events)
        .unwrap();

    assert!(hand.is_complete());
    let result = hand.result().unwrap().clone();
    // the short stack holds the best hand and wins only the main pot
    assert_eq!(result.winners, vec![0]);
    assert!(result.layer_winners.contains(&2));
    let players = hand.finish().unwrap();
    assert_eq!(players[0].cash(), 300);
    assert_eq!(players[1].cash(), 0);
    assert_eq!(players[2].cash(), 400);
}

#[test]
fn all_in_contest_runs_out_all_five_board_cards() {
    // heads-up: SB jams preflop, BB calls; board must be run out to the
    // river without soliciting further actions
    let seats = vec![
        scripted_seat("sb", &[(AllIn, 0)]),
        scripted_seat("bb", &[(Call, 0)]),
    ];
    let evaluator = StubEvaluator::with_ranks(&[500, 900]);
    let mut session = build_session(session_config(10, 1000), seats, evaluator);
    let captured = capture_events(&mut session);

    let rounds = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    {
        let rounds = std::rc::Rc::clone(&rounds);
        session.events.on_betting_round_started = Some(Box::new(move |state| {
            rounds.borrow_mut().push(state);
        }));
    }
    let boards = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
    {
        let boards = std::rc::Rc::clone(&boards);
        session.events.on_board_cards_dealt = Some(Box::new(move |board| {
            boards.borrow_mut().push(board.num_cards());
        }));
    }

    session.start_hand().unwrap();
    assert_eq!(session.advance().unwrap(), SessionStatus::HandComplete);

    // the intermediate states are walked in order
    assert_eq!(
        *rounds.borrow(),
        vec![
            GameState::Preflop,
            GameState::Flop,
            GameState::Turn,
            GameState::River,
            GameState::PostRiver,
        ]
    );
    assert_eq!(*boards.borrow(), vec![3, 4, 5]);

    // both all-in contestants reveal
    assert_eq!(*captured.reveal_order.borrow(), vec![0, 1]);

    let players = session.players();
    assert_eq!(players[0].cash(), 0);
    assert_eq!(players[1].cash(), 2000);
    let (winners, pot) = captured.completed.borrow().clone().unwrap();
    assert_eq!(winners, vec![1]);
    assert_eq!(pot, 2000);
}

#[test]
fn live_player_calling_a_jam_still_reaches_showdown() {
    // BB covers the jam; betting ends with one live player, the board runs
    // out and both reveal
    let seats = vec![
        scripted_seat("sb", &[(AllIn, 0)]),
        scripted_seat("bb", &[(Call, 0)]),
    ];
    let evaluator = StubEvaluator::with_ranks(&[900, 500]);
    let mut session = build_session(session_config(10, 1000), seats, evaluator);
    let captured = capture_events(&mut session);
    session.start_hand().unwrap();
    assert_eq!(session.advance().unwrap(), SessionStatus::HandComplete);
    assert_eq!(*captured.reveal_order.borrow(), vec![0, 1]);
    let players = session.players();
    assert_eq!(players[0].cash(), 2000);
    assert_eq!(players[1].cash(), 0);
}
