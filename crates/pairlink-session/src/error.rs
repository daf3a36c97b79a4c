//! Session error types.
//!
//! Errors here mean the caller misused the session (flipping before a game
//! exists, addressing a card that is not on the board). Invalid *peer*
//! input is never an error: the link contract says bad inbound messages
//! are logged and dropped while the session continues, so those surface as
//! notice actions instead.

use pairlink_proto::CardIndex;
use thiserror::Error;

/// Errors from driving the session state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A flip or snapshot was requested before any game was started.
    #[error("no game in progress")]
    NotStarted,

    /// The flipped index does not address a card on the board.
    #[error("card index {index} out of range")]
    IndexOutOfRange {
        /// The offending index.
        index: CardIndex,
    },
}
