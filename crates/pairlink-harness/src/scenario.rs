//! Two-player game scenarios over a simulated link.
//!
//! [`TwoPlayerGame`] wires two sessions to a [`LossyLink`] on a shared
//! virtual clock and offers move-level helpers, so tests read as game
//! scripts instead of event plumbing.

use std::time::Duration;

use pairlink_core::GameMode;
use pairlink_proto::CardIndex;
use pairlink_session::{RESOLVE_DELAY, Session, SessionAction, SessionError, SessionEvent};

use crate::{
    End, InvariantRegistry, LossyLink, SessionSnapshot, SimEnv,
    invariants::Violation,
};

/// Two sessions, a link, and an invariant registry on one virtual clock.
pub struct TwoPlayerGame {
    env: SimEnv,
    host: Session<SimEnv>,
    guest: Session<SimEnv>,
    link: LossyLink,
    registry: InvariantRegistry,
    /// Invariant violations observed so far.
    pub violations: Vec<Violation>,
    /// Every action either side has produced, with its end.
    pub actions: Vec<(End, SessionAction)>,
}

impl TwoPlayerGame {
    /// Create a game over a link with the given loss rate.
    #[must_use]
    pub fn new(seed: u64, loss: f64) -> Self {
        let env = SimEnv::new(seed);
        Self {
            host: Session::new(env.clone()),
            guest: Session::new(env.clone()),
            env,
            link: LossyLink::new(seed, loss),
            registry: InvariantRegistry::standard(),
            violations: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Host starts a peer game and the deck crosses the link.
    ///
    /// # Errors
    ///
    /// Propagates session errors, which indicate harness misuse.
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.apply(End::Host, SessionEvent::Start { mode: GameMode::Peer })?;
        self.pump();
        Ok(())
    }

    /// One full move: flip two cards, wait out the pause, deliver mail.
    ///
    /// # Errors
    ///
    /// Propagates session errors, which indicate harness misuse.
    pub fn play(&mut self, end: End, indices: [CardIndex; 2]) -> Result<(), SessionError> {
        self.apply(end, SessionEvent::Flip { index: indices[0] })?;
        self.apply(end, SessionEvent::Flip { index: indices[1] })?;

        self.env.advance(RESOLVE_DELAY + Duration::from_millis(100));
        let now = self.now();
        self.apply(end, SessionEvent::Tick { now })?;
        self.pump();
        Ok(())
    }

    /// First unmatched pair of equal symbols on `end`'s board.
    #[must_use]
    pub fn find_pair(&self, end: End) -> Option<[CardIndex; 2]> {
        self.find_move(end, true)
    }

    /// First two unmatched cards with different symbols on `end`'s board.
    #[must_use]
    pub fn find_mismatch(&self, end: End) -> Option<[CardIndex; 2]> {
        self.find_move(end, false)
    }

    /// Whose turn it is, if either side holds it.
    #[must_use]
    pub fn turn_owner(&self) -> Option<End> {
        if self.host.our_turn() {
            Some(End::Host)
        } else if self.guest.our_turn() {
            Some(End::Guest)
        } else {
            None
        }
    }

    /// Session on the given end.
    #[must_use]
    pub fn session(&self, end: End) -> &Session<SimEnv> {
        match end {
            End::Host => &self.host,
            End::Guest => &self.guest,
        }
    }

    /// The link between the two sides.
    #[must_use]
    pub fn link(&self) -> &LossyLink {
        &self.link
    }

    /// Feed one event to one side, ferrying produced messages and
    /// checking invariants.
    ///
    /// # Errors
    ///
    /// Propagates session errors, which indicate harness misuse.
    pub fn apply(&mut self, end: End, event: SessionEvent<Duration>) -> Result<(), SessionError> {
        let prev = self.snapshot_pair();

        let actions = match end {
            End::Host => self.host.handle(event)?,
            End::Guest => self.guest.handle(event)?,
        };
        for action in actions {
            if let SessionAction::Send(message) = &action {
                self.link.send(end, message);
            }
            self.actions.push((end, action));
        }

        let next = self.snapshot_pair();
        self.violations.extend(self.registry.check_step(&prev, &next));
        Ok(())
    }

    /// Deliver queued messages on both directions until the link is idle.
    pub fn pump(&mut self) {
        // A delivery can trigger replies, so loop until quiet.
        while !self.link.is_idle() {
            for end in [End::Host, End::Guest] {
                while let Some(message) = self.link.recv(end) {
                    // Inbound messages never error by contract.
                    let _ = self.apply(end, SessionEvent::MessageReceived(message));
                }
            }
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        use pairlink_core::Environment as _;
        self.env.now()
    }

    fn snapshot_pair(&self) -> (SessionSnapshot, SessionSnapshot) {
        (SessionSnapshot::capture(&self.host), SessionSnapshot::capture(&self.guest))
    }

    fn find_move(&self, end: End, equal: bool) -> Option<[CardIndex; 2]> {
        let session = self.session(end);
        let deck = session.deck()?;
        let symbols = deck.symbols();
        let matched = session.matched();

        for a in 0..symbols.len() {
            for b in (a + 1)..symbols.len() {
                let (ia, ib) = (a as CardIndex, b as CardIndex);
                if matched.contains(&ia) || matched.contains(&ib) {
                    continue;
                }
                if (symbols[a] == symbols[b]) == equal {
                    return Some([ia, ib]);
                }
            }
        }
        None
    }
}
