//! Full two-player games over a reliable link.

use pairlink_harness::{End, TwoPlayerGame};
use pairlink_session::SessionAction;

#[test]
fn host_clears_board_and_guest_converges() {
    let mut game = TwoPlayerGame::new(11, 0.0);
    game.start().expect("start");

    assert_eq!(game.turn_owner(), Some(End::Host));
    assert_eq!(
        game.session(End::Host).deck().map(pairlink_core::Deck::symbols),
        game.session(End::Guest).deck().map(pairlink_core::Deck::symbols),
        "deck must cross the link intact"
    );

    // Host plays perfectly and keeps the turn throughout.
    for _ in 0..8 {
        let pair = game.find_pair(End::Host).expect("unmatched pair remains");
        game.play(End::Host, pair).expect("play");
    }

    assert!(game.session(End::Host).is_cleared());
    assert_eq!(game.session(End::Host).matched(), game.session(End::Guest).matched());
    assert!(
        game.actions
            .iter()
            .any(|(end, a)| *end == End::Guest && matches!(a, SessionAction::OpponentCleared)),
        "guest must learn the game is over"
    );
    assert!(game.violations.is_empty(), "invariants: {:?}", game.violations);
}

#[test]
fn turn_alternates_on_mismatch() {
    let mut game = TwoPlayerGame::new(23, 0.0);
    game.start().expect("start");

    let mismatch = game.find_mismatch(End::Host).expect("mismatch exists");
    game.play(End::Host, mismatch).expect("play");
    assert_eq!(game.turn_owner(), Some(End::Guest), "mismatch hands the turn over");

    let mismatch = game.find_mismatch(End::Guest).expect("mismatch exists");
    game.play(End::Guest, mismatch).expect("play");
    assert_eq!(game.turn_owner(), Some(End::Host), "and back again");

    // A successful pair keeps the turn.
    let pair = game.find_pair(End::Host).expect("pair exists");
    game.play(End::Host, pair).expect("play");
    assert_eq!(game.turn_owner(), Some(End::Host));

    assert!(game.violations.is_empty(), "invariants: {:?}", game.violations);
}

#[test]
fn out_of_turn_guest_cannot_act() {
    let mut game = TwoPlayerGame::new(31, 0.0);
    game.start().expect("start");

    let pair = game.find_pair(End::Guest).expect("pair exists");
    game.play(End::Guest, pair).expect("play");

    assert!(game.session(End::Guest).matched().is_empty(), "flip out of turn does nothing");
    assert!(game.session(End::Host).matched().is_empty());
    assert_eq!(game.turn_owner(), Some(End::Host));
}

#[test]
fn alternating_players_still_converge() {
    let mut game = TwoPlayerGame::new(47, 0.0);
    game.start().expect("start");

    // Every other move is a deliberate mismatch, so the turn keeps
    // changing hands. Bounded so a logic bug cannot hang the test.
    for move_number in 0..64 {
        if game.session(End::Host).is_cleared() && game.session(End::Guest).is_cleared() {
            break;
        }
        let Some(end) = game.turn_owner() else {
            break;
        };
        let step = if move_number % 2 == 0 {
            game.find_pair(end).or_else(|| game.find_mismatch(end))
        } else {
            game.find_mismatch(end).or_else(|| game.find_pair(end))
        };
        let Some(step) = step else { break };
        game.play(end, step).expect("play");
    }

    assert!(game.session(End::Host).is_cleared(), "game must finish within the bound");

    assert_eq!(
        game.session(End::Host).matched(),
        game.session(End::Guest).matched(),
        "both sides agree on the final board"
    );
    assert!(game.violations.is_empty(), "invariants: {:?}", game.violations);
}
