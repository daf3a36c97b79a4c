//! Turn/match state machine.
//!
//! # State machine
//!
//! ```text
//! ┌──────┐  Flip   ┌─────────────┐  Flip   ┌───────────┐
//! │ Idle │────────>│ OneRevealed │────────>│ Resolving │
//! └──────┘         └─────────────┘         └───────────┘
//!     ↑                                          │ Tick >= deadline
//!     │            mismatch, or match            │
//!     ├──────────── with cards left ─────────────┤
//!     │                                          │ match fills board
//!     │                                          ↓
//!     │                                     ┌─────────┐
//!     └──────────────── Start ──────────────│ Cleared │
//!                                           └─────────┘
//! ```
//!
//! Flips are globally disabled while `Resolving`; the one-second pause is a
//! stored deadline resolved by `Tick { now }`, so nothing leaks if the
//! session is dropped or restarted mid-resolution.
//!
//! Inbound peer claims are validated against the local deck before being
//! applied; invalid claims are logged and dropped with no state change.

use std::{collections::BTreeSet, time::Duration};

use pairlink_core::{Deck, Environment, GameMode, GameSnapshot};
use pairlink_proto::{CardIndex, PeerMessage, Symbol};

use crate::{
    error::SessionError,
    event::{SessionAction, SessionEvent},
};

/// Pause between the second reveal and resolution, so the player can see
/// both cards.
pub const RESOLVE_DELAY: Duration = Duration::from_secs(1);

/// The 0, 1, or 2 indices currently face-up pending resolution.
///
/// Size ≤ 2 by construction; cleared after each resolution cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealSet {
    slots: [Option<CardIndex>; 2],
}

impl RevealSet {
    /// Number of indices currently revealed.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// True when nothing is revealed.
    pub fn is_empty(&self) -> bool {
        self.slots[0].is_none()
    }

    /// Whether `index` is currently revealed.
    pub fn contains(&self, index: CardIndex) -> bool {
        self.slots.contains(&Some(index))
    }

    /// Both indices, once two cards are revealed.
    pub fn pair(&self) -> Option<[CardIndex; 2]> {
        match self.slots {
            [Some(a), Some(b)] => Some([a, b]),
            _ => None,
        }
    }

    /// Revealed indices in flip order.
    pub fn iter(&self) -> impl Iterator<Item = CardIndex> + '_ {
        self.slots.iter().flatten().copied()
    }

    fn push(&mut self, index: CardIndex) {
        if self.slots[0].is_none() {
            self.slots[0] = Some(index);
        } else if self.slots[1].is_none() {
            self.slots[1] = Some(index);
        }
    }

    fn clear(&mut self) {
        self.slots = [None, None];
    }
}

/// Where the session is in its reveal/resolve cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase<I> {
    Idle,
    OneRevealed,
    Resolving { due: I },
    Cleared,
}

/// Game session state machine.
///
/// Owns the deck, reveal/match sets, mode, and turn flag for one game.
/// There are no process-wide singletons: the caller owns the session and
/// passes events in.
#[derive(Debug, Clone)]
pub struct Session<E: Environment> {
    /// Environment for time and shuffle randomness.
    env: E,
    /// Mode of the current game. `None` before the first start/sync.
    mode: Option<GameMode>,
    /// Current board. `None` before the first start/sync.
    deck: Option<Deck>,
    /// Indices face-up pending resolution.
    revealed: RevealSet,
    /// Indices permanently face-up. Grows monotonically within a game.
    matched: BTreeSet<CardIndex>,
    /// Reveal/resolve cycle position.
    phase: Phase<E::Instant>,
    /// Peer mode: whether the local player may act.
    our_turn: bool,
}

impl<E: Environment> Session<E> {
    /// Create a session with no game in progress.
    pub fn new(env: E) -> Self {
        Self {
            env,
            mode: None,
            deck: None,
            revealed: RevealSet::default(),
            matched: BTreeSet::new(),
            phase: Phase::Idle,
            our_turn: false,
        }
    }

    /// Process an event and return resulting actions.
    pub fn handle(
        &mut self,
        event: SessionEvent<E::Instant>,
    ) -> Result<Vec<SessionAction>, SessionError> {
        match event {
            SessionEvent::Start { mode } => Ok(self.handle_start(mode)),
            SessionEvent::Flip { index } => self.handle_flip(index),
            SessionEvent::Tick { now } => Ok(self.handle_tick(now)),
            SessionEvent::MessageReceived(message) => Ok(self.handle_message(message)),
            SessionEvent::Restore(snapshot) => Ok(self.handle_restore(snapshot)),
        }
    }

    fn handle_start(&mut self, mode: GameMode) -> Vec<SessionAction> {
        let deck = Deck::deal(&self.env);

        self.mode = Some(mode);
        self.revealed.clear();
        self.matched.clear();
        self.phase = Phase::Idle;
        self.our_turn = mode.is_peer();

        let mut actions = vec![SessionAction::BoardReset];
        match mode {
            GameMode::Single => {
                actions.push(SessionAction::Notice { message: "single game started".into() });
            },
            GameMode::Daily => {
                actions.push(SessionAction::Notice { message: "daily challenge started".into() });
            },
            GameMode::Peer => {
                actions.push(SessionAction::Notice {
                    message: "peer game started, you act first".into(),
                });
                actions.push(SessionAction::Send(PeerMessage::Deck {
                    deck: deck.symbols().to_vec(),
                }));
                actions.push(SessionAction::TurnChanged { ours: true });
            },
        }

        self.deck = Some(deck);
        actions
    }

    fn handle_flip(&mut self, index: CardIndex) -> Result<Vec<SessionAction>, SessionError> {
        let Some(deck) = self.deck.as_ref() else {
            return Err(SessionError::NotStarted);
        };
        let Some(symbol) = deck.symbol(index) else {
            return Err(SessionError::IndexOutOfRange { index });
        };

        // Flips are globally gated while a comparison is pending or the
        // game is over.
        if matches!(self.phase, Phase::Resolving { .. } | Phase::Cleared) {
            return Ok(Vec::new());
        }

        // Re-flipping a matched or already-revealed card is a silent no-op.
        if self.matched.contains(&index) || self.revealed.contains(index) {
            return Ok(Vec::new());
        }

        // Out-of-turn flips in peer mode are rejected with a notice.
        if self.is_peer() && !self.our_turn {
            return Ok(vec![SessionAction::Notice {
                message: "waiting for the opponent to act".into(),
            }]);
        }

        self.revealed.push(index);
        let actions = vec![SessionAction::Revealed { index, symbol }];

        if self.revealed.pair().is_some() {
            self.phase = Phase::Resolving { due: self.env.now() + RESOLVE_DELAY };
        } else {
            self.phase = Phase::OneRevealed;
        }

        Ok(actions)
    }

    fn handle_tick(&mut self, now: E::Instant) -> Vec<SessionAction> {
        match self.phase {
            Phase::Resolving { due } if now >= due => self.resolve(),
            _ => Vec::new(),
        }
    }

    /// Compare the two revealed cards and apply the outcome.
    fn resolve(&mut self) -> Vec<SessionAction> {
        let Some([a, b]) = self.revealed.pair() else {
            return Vec::new();
        };
        let Some(deck) = self.deck.as_ref() else {
            return Vec::new();
        };
        let (Some(sym_a), Some(sym_b)) = (deck.symbol(a), deck.symbol(b)) else {
            return Vec::new();
        };
        let deck_len = deck.len();
        let peer = self.is_peer();

        let mut actions = Vec::new();

        if sym_a == sym_b {
            self.matched.insert(a);
            self.matched.insert(b);
            actions.push(SessionAction::PairMatched { indices: [a, b], symbol: sym_a });
            if peer {
                actions.push(SessionAction::Send(PeerMessage::Match { indices: [a, b] }));
            }
        } else {
            actions.push(SessionAction::Concealed { indices: [a, b] });
            if peer {
                actions.push(SessionAction::Send(PeerMessage::NoMatch { indices: [a, b] }));
                self.our_turn = false;
                actions.push(SessionAction::TurnChanged { ours: false });
            }
        }

        self.revealed.clear();

        if self.matched.len() == deck_len {
            self.phase = Phase::Cleared;
            actions.push(SessionAction::Cleared);
            if peer {
                actions.push(SessionAction::Send(PeerMessage::GameOver));
            }
        } else {
            self.phase = Phase::Idle;
        }

        actions
    }

    fn handle_message(&mut self, message: PeerMessage) -> Vec<SessionAction> {
        match message {
            PeerMessage::Deck { deck } => self.apply_peer_deck(deck),
            PeerMessage::Match { indices } => self.apply_peer_match(indices),
            PeerMessage::NoMatch { indices } => self.apply_peer_no_match(indices),
            PeerMessage::GameOver => vec![SessionAction::OpponentCleared],
        }
    }

    /// Replace the board with the peer's deck and become the waiting side.
    fn apply_peer_deck(&mut self, symbols: Vec<Symbol>) -> Vec<SessionAction> {
        let deck = match Deck::from_symbols(symbols) {
            Ok(deck) => deck,
            Err(e) => {
                tracing::warn!(error = %e, "dropping peer deck");
                return vec![SessionAction::Notice { message: format!("peer deck rejected: {e}") }];
            },
        };

        self.deck = Some(deck);
        self.mode = Some(GameMode::Peer);
        self.revealed.clear();
        self.matched.clear();
        self.phase = Phase::Idle;
        self.our_turn = false;

        vec![
            SessionAction::BoardReset,
            SessionAction::TurnChanged { ours: false },
            SessionAction::Notice { message: "deck received from peer, they act first".into() },
        ]
    }

    /// Apply a match the peer claims to have resolved.
    ///
    /// Unlike the original trust-the-sender protocol, the claim is checked
    /// against the local deck first: indices must be distinct, on the
    /// board, not already matched, and carry equal symbols.
    fn apply_peer_match(&mut self, indices: [CardIndex; 2]) -> Vec<SessionAction> {
        let [a, b] = indices;
        let Some(deck) = self.deck.as_ref() else {
            return dropped_claim("match", "no game in progress");
        };
        if a == b {
            return dropped_claim("match", "indices are not distinct");
        }
        let (Some(sym_a), Some(sym_b)) = (deck.symbol(a), deck.symbol(b)) else {
            return dropped_claim("match", "index out of range");
        };
        if self.matched.contains(&a) || self.matched.contains(&b) {
            return dropped_claim("match", "card already matched");
        }
        if sym_a != sym_b {
            return dropped_claim("match", "symbols differ on local deck");
        }
        let deck_len = deck.len();

        self.matched.insert(a);
        self.matched.insert(b);

        // The peer announces completion itself via `gameover`; we only
        // mark the terminal phase locally.
        if self.matched.len() == deck_len {
            self.phase = Phase::Cleared;
        }

        vec![SessionAction::OpponentMatched { indices }]
    }

    /// The peer mismatched; the turn comes to us.
    fn apply_peer_no_match(&mut self, indices: [CardIndex; 2]) -> Vec<SessionAction> {
        let Some(deck) = self.deck.as_ref() else {
            return dropped_claim("no-match", "no game in progress");
        };
        if !deck.contains_index(indices[0]) || !deck.contains_index(indices[1]) {
            return dropped_claim("no-match", "index out of range");
        }

        self.our_turn = true;

        vec![
            SessionAction::Concealed { indices },
            SessionAction::TurnChanged { ours: true },
            SessionAction::Notice { message: "opponent found no pair, your turn".into() },
        ]
    }

    /// Replace the game with an imported snapshot.
    fn handle_restore(&mut self, snapshot: GameSnapshot) -> Vec<SessionAction> {
        let full = snapshot.matched.len() == snapshot.deck.len();

        self.mode = Some(snapshot.mode);
        self.deck = Some(snapshot.deck);
        self.matched = snapshot.matched;
        self.revealed.clear();
        self.phase = if full { Phase::Cleared } else { Phase::Idle };
        // Imported peer games resume as the waiting side; the original
        // never persisted turn ownership.
        self.our_turn = false;

        vec![
            SessionAction::BoardReset,
            SessionAction::Notice { message: "save imported".into() },
        ]
    }

    /// Capture the current game for export.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NotStarted`] if no game is in progress
    pub fn snapshot(&self, player_name: impl Into<String>) -> Result<GameSnapshot, SessionError> {
        let deck = self.deck.clone().ok_or(SessionError::NotStarted)?;
        Ok(GameSnapshot {
            player_name: player_name.into(),
            mode: self.mode.unwrap_or_default(),
            deck,
            matched: self.matched.clone(),
        })
    }

    /// Mode of the current game. `None` before the first start/sync.
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Current board. `None` before the first start/sync.
    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    /// Indices currently face-up pending resolution.
    pub fn revealed(&self) -> &RevealSet {
        &self.revealed
    }

    /// Indices permanently face-up.
    pub fn matched(&self) -> &BTreeSet<CardIndex> {
        &self.matched
    }

    /// Peer mode: whether the local player may act.
    pub fn our_turn(&self) -> bool {
        self.our_turn
    }

    /// Whether the board is fully matched.
    pub fn is_cleared(&self) -> bool {
        matches!(self.phase, Phase::Cleared)
    }

    /// Whether flip events are currently accepted.
    ///
    /// This is the single gate ensuring no more than two cards are ever
    /// pending resolution.
    pub fn flips_enabled(&self) -> bool {
        !matches!(self.phase, Phase::Resolving { .. } | Phase::Cleared)
    }

    fn is_peer(&self) -> bool {
        self.mode.is_some_and(GameMode::is_peer)
    }
}

fn dropped_claim(kind: &str, reason: &str) -> Vec<SessionAction> {
    tracing::warn!(kind, reason, "dropping invalid peer claim");
    vec![SessionAction::Notice { message: format!("ignoring invalid {kind} from peer: {reason}") }]
}
