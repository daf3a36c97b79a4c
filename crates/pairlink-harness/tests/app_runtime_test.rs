//! Full app runtime driven by a scripted driver.
//!
//! Exercises the same Runtime/App/Bridge wiring the TUI uses, with
//! scripted keys instead of a terminal and virtual time instead of a
//! clock.

use pairlink_app::{AppEvent, CardView, KeyInput, Runtime};
use pairlink_core::{DECK_SIZE, savefile};
use pairlink_harness::{SimEnv, new_sim_driver};
use pairlink_proto::PeerMessage;

fn key(c: KeyInput) -> AppEvent {
    AppEvent::Key(c)
}

#[tokio::test]
async fn start_and_export_through_the_runtime() {
    let env = SimEnv::new(3);
    let script = vec![
        key(KeyInput::Char('s')),
        key(KeyInput::Char('e')),
        key(KeyInput::Esc),
    ];
    let (driver, state) = new_sim_driver(env.clone(), script);

    Runtime::new(driver, env, "sim-player".into()).run().await.expect("runtime");

    let state = state.lock().expect("state");
    assert!(state.stopped);
    assert_eq!(state.last_view.len(), DECK_SIZE);

    let json = state.save.as_ref().expect("export wrote the save slot");
    let snapshot = savefile::from_json(json).expect("export emits a valid save");
    assert_eq!(snapshot.player_name, "sim-player");
    assert!(snapshot.matched.is_empty());
}

#[tokio::test]
async fn import_restores_matched_cards() {
    // A finished-but-for-one-pair game written by hand.
    let env = SimEnv::new(4);
    let (driver, state) = new_sim_driver(
        env.clone(),
        vec![key(KeyInput::Char('i')), key(KeyInput::Esc)],
    );
    {
        let mut state = state.lock().expect("state");
        state.save = Some(
            r#"{
                "version": 1,
                "playerName": "restored",
                "matchedCards": [0, 1],
                "deck": ["🍎","🍎","🍌","🍌","🍇","🍇","🍒","🍒",
                         "🥝","🥝","🍍","🍍","🥥","🥥","🍉","🍉"],
                "gameMode": "single"
            }"#
            .to_string(),
        );
    }

    Runtime::new(driver, env, "sim-player".into()).run().await.expect("runtime");

    let state = state.lock().expect("state");
    assert_eq!(state.last_view.len(), DECK_SIZE);
    assert!(matches!(state.last_view[0], CardView::Matched(_)));
    assert!(matches!(state.last_view[1], CardView::Matched(_)));
    assert!(matches!(state.last_view[2], CardView::Hidden));
}

#[tokio::test]
async fn import_without_save_reports_an_error() {
    let env = SimEnv::new(5);
    let (driver, state) = new_sim_driver(
        env.clone(),
        vec![key(KeyInput::Char('i')), key(KeyInput::Esc)],
    );

    Runtime::new(driver, env, "sim-player".into()).run().await.expect("runtime");

    let state = state.lock().expect("state");
    assert!(state.last_view.is_empty(), "no board appears from a missing save");
    assert!(state.log_len > 0, "the failure leaves a log entry");
}

#[tokio::test]
async fn peer_start_sends_deck_and_inbound_gameover_reaches_the_log() {
    let env = SimEnv::new(6);
    let (driver, state) = new_sim_driver(
        env.clone(),
        vec![
            key(KeyInput::Char('p')),
            AppEvent::Tick,
            AppEvent::Tick,
            key(KeyInput::Esc),
        ],
    );
    {
        let mut state = state.lock().expect("state");
        state.linked = true;
        state.inbound.push_back(PeerMessage::GameOver);
    }

    Runtime::new(driver, env, "sim-player".into()).run().await.expect("runtime");

    let state = state.lock().expect("state");
    assert!(
        matches!(state.sent.first(), Some(PeerMessage::Deck { .. })),
        "peer start must broadcast the deck, got {:?}",
        state.sent.first()
    );
    assert!(state.log_len > 0, "the game log records the session notices");
}

#[tokio::test]
async fn flips_resolve_over_virtual_time() {
    // Script: start, flip the first two cards, let the pause elapse via
    // ticks, then export so the save reflects any match.
    let env = SimEnv::new(7);
    let mut script = vec![key(KeyInput::Char('s')), key(KeyInput::Enter)];
    script.push(key(KeyInput::Right));
    script.push(key(KeyInput::Enter));
    // Each poll advances 100ms; the resolve pause is 1s.
    script.extend(std::iter::repeat_n(AppEvent::Tick, 15));
    script.push(key(KeyInput::Char('e')));
    script.push(key(KeyInput::Esc));
    let (driver, state) = new_sim_driver(env.clone(), script);

    Runtime::new(driver, env, "sim-player".into()).run().await.expect("runtime");

    let state = state.lock().expect("state");
    let json = state.save.as_ref().expect("export succeeds");
    let snapshot = savefile::from_json(json).expect("valid save");

    // Cards 0 and 1 either matched (equal symbols) or went back face
    // down; never stuck revealed.
    let deck = snapshot.deck.symbols();
    if deck[0] == deck[1] {
        assert!(snapshot.matched.contains(&0) && snapshot.matched.contains(&1));
        assert!(matches!(state.last_view[0], CardView::Matched(_)));
    } else {
        assert!(snapshot.matched.is_empty());
        assert!(matches!(state.last_view[0], CardView::Hidden));
    }
}
