//! Fuzz target for the session state machine.
//!
//! Drives a session with arbitrary interleavings of user input, peer
//! messages, time, and restores. The session must never panic; the only
//! permitted errors are the documented caller-misuse ones.

#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pairlink_core::{Environment, GameMode};
use pairlink_harness::SimEnv;
use pairlink_proto::{PeerMessage, Symbol};
use pairlink_session::{Session, SessionEvent};

#[derive(Debug, Clone, Arbitrary)]
enum FuzzStep {
    StartSingle,
    StartDaily,
    StartPeer,
    Flip { index: u8 },
    Advance { millis: u16 },
    Deck { chars: Vec<char> },
    Match { a: u8, b: u8 },
    NoMatch { a: u8, b: u8 },
    GameOver,
}

fuzz_target!(|input: (u64, Vec<FuzzStep>)| {
    let (seed, steps) = input;
    let env = SimEnv::new(seed);
    let mut session = Session::new(env.clone());

    for step in steps {
        let event = match step {
            FuzzStep::StartSingle => SessionEvent::Start { mode: GameMode::Single },
            FuzzStep::StartDaily => SessionEvent::Start { mode: GameMode::Daily },
            FuzzStep::StartPeer => SessionEvent::Start { mode: GameMode::Peer },
            FuzzStep::Flip { index } => SessionEvent::Flip { index },
            FuzzStep::Advance { millis } => {
                env.advance(Duration::from_millis(u64::from(millis)));
                SessionEvent::Tick { now: env.now() }
            }
            FuzzStep::Deck { chars } => SessionEvent::MessageReceived(PeerMessage::Deck {
                deck: chars.into_iter().map(Symbol::new).collect(),
            }),
            FuzzStep::Match { a, b } => {
                SessionEvent::MessageReceived(PeerMessage::Match { indices: [a, b] })
            }
            FuzzStep::NoMatch { a, b } => {
                SessionEvent::MessageReceived(PeerMessage::NoMatch { indices: [a, b] })
            }
            FuzzStep::GameOver => SessionEvent::MessageReceived(PeerMessage::GameOver),
        };

        // Errors are fine; panics are the bug being hunted.
        let _ = session.handle(event);

        assert!(session.revealed().len() <= 2);
        assert!(session.matched().len() % 2 == 0);
    }
});
