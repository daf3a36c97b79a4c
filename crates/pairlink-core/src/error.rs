//! Error types for core game rules.
//!
//! Strongly-typed errors per concern: deck validation and save-file
//! import/export. Both are recoverable: a failed import or a rejected peer
//! deck leaves the current game untouched.

use pairlink_proto::{CardIndex, Symbol};
use thiserror::Error;

/// Errors from validating an untrusted symbol sequence into a deck.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// The sequence is not exactly 16 cards.
    #[error("deck has {actual} cards, expected 16")]
    WrongSize {
        /// Number of cards actually present.
        actual: usize,
    },

    /// A symbol outside the fixed set appeared.
    #[error("unknown symbol {symbol} in deck")]
    UnknownSymbol {
        /// The offending symbol.
        symbol: Symbol,
    },

    /// A known symbol does not appear exactly twice.
    #[error("symbol {symbol} appears {count} times, expected 2")]
    WrongMultiplicity {
        /// The offending symbol.
        symbol: Symbol,
        /// How often it appeared.
        count: usize,
    },
}

/// Errors from parsing or validating a save file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SaveError {
    /// The document is not valid JSON or is missing required fields
    /// (`deck`, `matchedCards`).
    #[error("save file parse failed: {0}")]
    Parse(String),

    /// The file was written by a newer format version.
    #[error("unsupported save version {version}, newest supported is {supported}")]
    UnsupportedVersion {
        /// Version claimed by the file.
        version: u32,
        /// Newest version this build understands.
        supported: u32,
    },

    /// The deck in the file is malformed.
    #[error("save file deck invalid: {0}")]
    Deck(#[from] DeckError),

    /// A matched index does not address a card on the board.
    #[error("matched index {index} out of range")]
    MatchedOutOfRange {
        /// The offending index.
        index: CardIndex,
    },

    /// Serialization failed on export.
    #[error("save file write failed: {0}")]
    Serialize(String),
}
