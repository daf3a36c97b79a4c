//! Observable session state for invariant checks.

use std::collections::BTreeSet;

use pairlink_core::Environment;
use pairlink_proto::{CardIndex, Symbol};
use pairlink_session::Session;

/// Everything an invariant may observe about one side of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Board symbols in position order. `None` before a game exists.
    pub deck: Option<Vec<Symbol>>,
    /// Permanently face-up indices.
    pub matched: BTreeSet<CardIndex>,
    /// Indices face-up pending resolution, in flip order.
    pub revealed: Vec<CardIndex>,
    /// Whether this side may act (peer mode).
    pub our_turn: bool,
    /// Whether this side's board is fully matched.
    pub cleared: bool,
}

impl SessionSnapshot {
    /// Capture the observable state of a session.
    pub fn capture<E: Environment>(session: &Session<E>) -> Self {
        Self {
            deck: session.deck().map(|deck| deck.symbols().to_vec()),
            matched: session.matched().clone(),
            revealed: session.revealed().iter().collect(),
            our_turn: session.our_turn(),
            cleared: session.is_cleared(),
        }
    }

    /// Snapshot of a side with no game in progress.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            deck: None,
            matched: BTreeSet::new(),
            revealed: Vec::new(),
            our_turn: false,
            cleared: false,
        }
    }

    /// Whether this snapshot and `prev` belong to the same game.
    ///
    /// A new deal, peer sync, or import replaces the deck wholesale;
    /// monotonicity checks only apply within one game.
    #[must_use]
    pub fn same_game(&self, prev: &Self) -> bool {
        self.deck.is_some() && self.deck == prev.deck
    }
}
