//! Session events and actions.

use pairlink_core::{GameMode, GameSnapshot};
use pairlink_proto::{CardIndex, PeerMessage, Symbol};

/// Events the caller feeds into the session.
///
/// The caller is responsible for:
/// - Forwarding user intents (start a game, flip a card)
/// - Delivering inbound peer messages
/// - Driving time forward via ticks so the resolution pause can fire
///
/// Generic over `I` (Instant type) to support both production
/// (`std::time::Instant`) and simulation (virtual time) environments.
#[derive(Debug, Clone)]
pub enum SessionEvent<I = std::time::Instant> {
    /// Start a fresh game in the given mode.
    ///
    /// Deals a new deck and discards any previous game, including a pending
    /// resolution. In peer mode this side is the host: it acts first and
    /// broadcasts the deck.
    Start {
        /// Mode to start in.
        mode: GameMode,
    },

    /// The player flipped the card at `index`.
    Flip {
        /// Board position that was flipped.
        index: CardIndex,
    },

    /// Time tick.
    ///
    /// The caller should send ticks periodically; a pending two-card
    /// comparison resolves on the first tick at or past its deadline.
    Tick {
        /// Current time from the environment.
        now: I,
    },

    /// Message received from the peer link.
    MessageReceived(PeerMessage),

    /// Replace the game with an imported save.
    ///
    /// The snapshot is already validated; restoring cannot fail and also
    /// cancels any pending resolution.
    Restore(GameSnapshot),
}

/// Actions the session produces for the caller to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Send a message over the peer link.
    Send(PeerMessage),

    /// A card turned face-up.
    Revealed {
        /// Board position.
        index: CardIndex,
        /// Symbol now showing.
        symbol: Symbol,
    },

    /// Two cards turned back face-down after a mismatch.
    Concealed {
        /// The two positions.
        indices: [CardIndex; 2],
    },

    /// The local player resolved a successful pair.
    PairMatched {
        /// The two positions, now permanently face-up.
        indices: [CardIndex; 2],
        /// The matched symbol.
        symbol: Symbol,
    },

    /// The peer resolved a successful pair; applied locally after
    /// validation.
    OpponentMatched {
        /// The two positions, now permanently face-up.
        indices: [CardIndex; 2],
    },

    /// Turn ownership changed (peer mode only).
    TurnChanged {
        /// Whether the local player may act now.
        ours: bool,
    },

    /// The deck was replaced wholesale (new game, peer sync, or import);
    /// any board view should be rebuilt from session state.
    BoardReset,

    /// The local board is fully matched; the session is terminal.
    Cleared,

    /// The peer reports its board fully matched. Informational only.
    OpponentCleared,

    /// User-visible log line with no structured counterpart (rejected
    /// flips, dropped peer messages, mode banners).
    Notice {
        /// Text for the log panel.
        message: String,
    },
}
