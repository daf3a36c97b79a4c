//! Observable application state types.
//!
//! This module defines the data structures that represent the application's
//! current view of the world, such as [`CardView`] and [`LinkState`].
//!
//! These structures serve as the "View Model" for the application. They
//! contain exactly what a board renderer needs, without exposing the
//! session's internal phase tracking.

use pairlink_proto::Symbol;

/// What one board position currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardView {
    /// Face-down.
    Hidden,
    /// Face-up pending resolution.
    Revealed(Symbol),
    /// Permanently face-up.
    Matched(Symbol),
}

impl CardView {
    /// Symbol showing at this position. `None` when face-down.
    pub fn symbol(&self) -> Option<Symbol> {
        match self {
            Self::Hidden => None,
            Self::Revealed(symbol) | Self::Matched(symbol) => Some(*symbol),
        }
    }
}

/// Peer link state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkState {
    /// No peer link; single and daily modes only.
    #[default]
    Offline,
    /// Link is up; peer mode available.
    Linked,
}

/// One line in the game log panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Position in the log, starting at 1.
    pub seq: usize,
    /// Entry text.
    pub text: String,
}
