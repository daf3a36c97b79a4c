//! Peer control message types.
//!
//! Three message kinds drive a two-player session: `deck` replaces the
//! receiver's board wholesale, `match`/`no-match` replay the sender's
//! resolution at the index level, and `gameover` is informational. The
//! receiver is expected to validate claims against its own deck before
//! applying them; nothing in this crate enforces that.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a card on the board.
///
/// Boards are small (16 cards) so a byte is plenty; keeping the wire type
/// narrow also bounds what a malicious peer can claim.
pub type CardIndex = u8;

/// A single card symbol.
///
/// One Unicode scalar (the original game uses fruit emoji). Serialized as a
/// one-character JSON string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(char);

impl Symbol {
    /// Create a symbol from a character.
    pub const fn new(c: char) -> Self {
        Self(c)
    }

    /// The underlying character.
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Control message exchanged between two peers.
///
/// Serialized as a JSON object with a `type` tag, matching the link
/// contract: `{"type":"deck",...}`, `{"type":"match",...}`,
/// `{"type":"no-match",...}`, `{"type":"gameover"}`.
///
/// # Invariants
///
/// - `Deck` carries the complete board; the receiver replaces its deck and
///   becomes the waiting side.
/// - `Match`/`NoMatch` carry exactly the two indices the sender resolved.
/// - `GameOver` carries no state; it is log-only on the receiving side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PeerMessage {
    /// Full deck broadcast by the dealing side at game start.
    Deck {
        /// All 16 symbols in board order.
        deck: Vec<Symbol>,
    },

    /// The sender resolved a successful pair.
    Match {
        /// The two indices that matched.
        indices: [CardIndex; 2],
    },

    /// The sender resolved a mismatch; the turn passes to the receiver.
    NoMatch {
        /// The two indices that were flipped back face-down.
        indices: [CardIndex; 2],
    },

    /// The sender's board is fully matched.
    #[serde(rename = "gameover")]
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_wire_form() {
        let msg = PeerMessage::Match { indices: [0, 2] };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"match","indices":[0,2]}"#);
    }

    #[test]
    fn no_match_wire_form() {
        let msg = PeerMessage::NoMatch { indices: [0, 1] };
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"no-match","indices":[0,1]}"#);
    }

    #[test]
    fn gameover_wire_form() {
        let json = serde_json::to_string(&PeerMessage::GameOver).unwrap();
        assert_eq!(json, r#"{"type":"gameover"}"#);
    }

    #[test]
    fn deck_symbols_round_trip() {
        let msg = PeerMessage::Deck { deck: vec![Symbol::new('🍎'), Symbol::new('🍌')] };
        let json = serde_json::to_string(&msg).unwrap();
        let back: PeerMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(msg, back);
    }

    #[test]
    fn unknown_type_rejected() {
        let result: Result<PeerMessage, _> = serde_json::from_str(r#"{"type":"resync"}"#);
        assert!(result.is_err());
    }
}
