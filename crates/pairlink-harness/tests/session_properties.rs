//! Property-based invariant checks for a single session.

use std::time::Duration;

use pairlink_core::{Environment, GameMode};
use pairlink_harness::{InvariantRegistry, SessionSnapshot, SimEnv};
use pairlink_proto::{CardIndex, PeerMessage};
use pairlink_session::{Session, SessionEvent};
use proptest::prelude::*;

/// One scripted input to a session.
#[derive(Debug, Clone)]
enum Step {
    Start(GameMode),
    Flip(CardIndex),
    AdvanceAndTick(u64),
    Message(PeerMessage),
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        prop_oneof![
            Just(GameMode::Single),
            Just(GameMode::Daily),
            Just(GameMode::Peer),
        ]
        .prop_map(Step::Start),
        (0u8..16).prop_map(Step::Flip),
        (0u64..3000).prop_map(Step::AdvanceAndTick),
        arb_message().prop_map(Step::Message),
    ]
}

/// Peer messages including hostile ones the session must shrug off.
fn arb_message() -> impl Strategy<Value = PeerMessage> {
    prop_oneof![
        proptest::collection::vec(0u8..16, 2)
            .prop_map(|v| PeerMessage::Match { indices: [v[0], v[1]] }),
        proptest::collection::vec(0u8..32, 2)
            .prop_map(|v| PeerMessage::NoMatch { indices: [v[0], v[1]] }),
        Just(PeerMessage::GameOver),
    ]
}

proptest! {
    /// No input sequence violates the session invariants or panics.
    #[test]
    fn random_inputs_preserve_invariants(
        seed in 0u64..1000,
        steps in proptest::collection::vec(arb_step(), 1..80),
    ) {
        let env = SimEnv::new(seed);
        let mut session = Session::new(env.clone());
        let registry = InvariantRegistry::standard();
        let idle = SessionSnapshot::empty();

        let mut prev = SessionSnapshot::capture(&session);
        for step in steps {
            let event = match step {
                Step::Start(mode) => SessionEvent::Start { mode },
                Step::Flip(index) => SessionEvent::Flip { index },
                Step::AdvanceAndTick(millis) => {
                    env.advance(Duration::from_millis(millis));
                    SessionEvent::Tick { now: env.now() }
                },
                Step::Message(message) => SessionEvent::MessageReceived(message),
            };

            // Flips can legitimately error before a game exists; nothing
            // else may.
            let _ = session.handle(event);

            let next = SessionSnapshot::capture(&session);
            let violations =
                registry.check_step(&(prev.clone(), idle.clone()), &(next.clone(), idle.clone()));
            prop_assert!(violations.is_empty(), "violations: {violations:?}");
            prev = next;
        }
    }

    /// Whatever happens, a session that reports cleared has every card
    /// matched and refuses further flips.
    #[test]
    fn cleared_sessions_are_terminal(
        seed in 0u64..200,
        flips in proptest::collection::vec(0u8..16, 0..200),
    ) {
        let env = SimEnv::new(seed);
        let mut session = Session::new(env.clone());
        let _ = session.handle(SessionEvent::Start { mode: GameMode::Single });

        for index in flips {
            let _ = session.handle(SessionEvent::Flip { index });
            env.advance(Duration::from_millis(1100));
            let _ = session.handle(SessionEvent::Tick { now: env.now() });

            if session.is_cleared() {
                prop_assert_eq!(session.matched().len(), 16);
                let actions = session
                    .handle(SessionEvent::Flip { index: 0 })
                    .expect("in-range flip never errors");
                prop_assert!(actions.is_empty());
                break;
            }
        }
    }
}
