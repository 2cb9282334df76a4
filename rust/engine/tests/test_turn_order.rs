//! Turn-order resolution at the hand level.

mod common;

use felt_engine::actions::{ActionKind, PlayerAction};
use felt_engine::deck::Deck;
use felt_engine::events::GameEvents;
use felt_engine::hand::Hand;
use felt_engine::player::Player;

use common::StubEvaluator;

fn fresh_hand(stacks: &[u32], dealer: u32) -> (Hand, GameEvents) {
    let seats: Vec<Player> = stacks
        .iter()
        .enumerate()
        .map(|(i, &cash)| Player::new(i as u32, format!("p{}", i), "Scripted", cash))
        .collect();
    let mut deck = Deck::new_with_seed(7);
    deck.shuffle();
    let evaluator = StubEvaluator::with_ranks(&[1, 2, 3, 4]);
    let mut events = GameEvents::default();
    let mut hand = Hand::new(seats, dealer, 10, deck, evaluator).unwrap();
    hand.begin(&mut events).unwrap();
    (hand, events)
}

fn act(hand: &mut Hand, events: &mut GameEvents, id: u32, kind: ActionKind, amount: u32) {
    hand.handle_player_action(PlayerAction::new(id, kind, amount), events)
        .unwrap();
}

#[test]
fn heads_up_small_blind_opens_preflop() {
    let (hand, _) = fresh_hand(&[1000, 1000], 0);
    // seat 0 is the dealer and small blind and speaks first preflop
    assert_eq!(hand.next_to_act(), Some(0));
}

#[test]
fn heads_up_big_blind_opens_postflop() {
    let (mut hand, mut events) = fresh_hand(&[1000, 1000], 0);
    act(&mut hand, &mut events, 0, ActionKind::Call, 0);
    act(&mut hand, &mut events, 1, ActionKind::Check, 0);
    // flop: first still-acting player clockwise from the dealer
    assert_eq!(hand.next_to_act(), Some(1));
}

#[test]
fn under_the_gun_opens_a_full_table() {
    let (hand, _) = fresh_hand(&[1000; 6], 0);
    // seat 3 sits behind the big blind (seat 2)
    assert_eq!(hand.next_to_act(), Some(3));
}

#[test]
fn action_passes_clockwise_and_wraps() {
    let (mut hand, mut events) = fresh_hand(&[1000; 4], 0);
    assert_eq!(hand.next_to_act(), Some(3));
    act(&mut hand, &mut events, 3, ActionKind::Call, 0);
    assert_eq!(hand.next_to_act(), Some(0));
    act(&mut hand, &mut events, 0, ActionKind::Call, 0);
    assert_eq!(hand.next_to_act(), Some(1));
    act(&mut hand, &mut events, 1, ActionKind::Call, 0);
    // wraps around to the big blind's option
    assert_eq!(hand.next_to_act(), Some(2));
}

#[test]
fn folded_seats_are_skipped() {
    let (mut hand, mut events) = fresh_hand(&[1000; 4], 0);
    act(&mut hand, &mut events, 3, ActionKind::Fold, 0);
    assert_eq!(hand.next_to_act(), Some(0));
    act(&mut hand, &mut events, 0, ActionKind::Call, 0);
    act(&mut hand, &mut events, 1, ActionKind::Call, 0);
    act(&mut hand, &mut events, 2, ActionKind::Check, 0);
    // flop: seat 1 (small blind) is the first acting seat after the dealer
    assert_eq!(hand.next_to_act(), Some(1));
    act(&mut hand, &mut events, 1, ActionKind::Check, 0);
    assert_eq!(hand.next_to_act(), Some(2));
    act(&mut hand, &mut events, 2, ActionKind::Check, 0);
    // the folded seat 3 is skipped; back to the dealer
    assert_eq!(hand.next_to_act(), Some(0));
}

#[test]
fn raise_reopens_the_action() {
    let (mut hand, mut events) = fresh_hand(&[1000; 3], 0);
    // dealer calls, small blind calls, big blind raises
    act(&mut hand, &mut events, 0, ActionKind::Call, 0);
    act(&mut hand, &mut events, 1, ActionKind::Call, 0);
    act(&mut hand, &mut events, 2, ActionKind::Raise, 60);
    // action returns to the dealer, still in the same round
    assert_eq!(hand.state(), felt_engine::actions::GameState::Preflop);
    assert_eq!(hand.next_to_act(), Some(0));
    act(&mut hand, &mut events, 0, ActionKind::Call, 0);
    act(&mut hand, &mut events, 1, ActionKind::Call, 0);
    // everyone matched the raiser: the flop begins
    assert_eq!(hand.state(), felt_engine::actions::GameState::Flop);
}

#[test]
fn acting_out_of_turn_is_rejected() {
    use felt_engine::errors::EngineError;
    use felt_engine::validator::RejectReason;

    let (mut hand, mut events) = fresh_hand(&[1000; 3], 0);
    assert_eq!(hand.next_to_act(), Some(0));
    let err = hand
        .handle_player_action(PlayerAction::new(1, ActionKind::Call, 0), &mut events)
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::ActionRejected {
            player_id: 1,
            reason: RejectReason::OutOfTurn
        }
    );
    // the hand is still waiting on the right seat
    assert_eq!(hand.next_to_act(), Some(0));
}
