//! Application input events.
//!
//! This module defines [`AppEvent`], the comprehensive set of inputs that
//! drive the [`crate::App`] state machine.
//!
//! Events originate from two distinct sources:
//! - User interactions (Keyboard, Resize) and system ticks.
//! - Game notifications translated from the underlying session by the
//!   [`crate::Bridge`].

use pairlink_core::GameMode;
use pairlink_proto::{CardIndex, Symbol};

use crate::{CardView, KeyInput};

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick.
    Tick,

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// The peer link came up.
    LinkUp,

    /// The peer link went down. Fires at most once per link.
    LinkDown,

    /// A fresh board replaced the old one (new game, peer sync, or
    /// import). Carries the full view so the App never reaches into the
    /// session.
    BoardReset {
        /// View of every board position.
        cards: Vec<CardView>,
        /// Mode of the new game.
        mode: GameMode,
    },

    /// A card turned face-up.
    CardRevealed {
        /// Board position.
        index: CardIndex,
        /// Symbol now showing.
        symbol: Symbol,
    },

    /// Two cards turned back face-down after a mismatch.
    CardsConcealed {
        /// The two positions.
        indices: [CardIndex; 2],
    },

    /// A pair was resolved, by either side.
    PairMatched {
        /// The two positions, now permanently face-up.
        indices: [CardIndex; 2],
        /// The matched symbol.
        symbol: Symbol,
        /// Whether the local player found it.
        ours: bool,
    },

    /// Turn ownership changed (peer mode only).
    TurnChanged {
        /// Whether the local player may act now.
        ours: bool,
    },

    /// The local board is fully matched.
    Cleared,

    /// The peer reports its board fully matched.
    OpponentCleared,

    /// Game log line.
    Notice {
        /// Text for the log panel.
        message: String,
    },

    /// Error occurred.
    Error {
        /// Error description.
        message: String,
    },
}
