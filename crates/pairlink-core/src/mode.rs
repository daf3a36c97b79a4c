//! Game mode selection.

use serde::{Deserialize, Serialize};

/// How a game session was started.
///
/// Set once at game start; governs whether turn ownership and the peer link
/// are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Solo play against nobody.
    #[default]
    Single,

    /// Daily challenge.
    ///
    /// Uses the same unseeded shuffle as [`GameMode::Single`]. The original
    /// never derived a date-based seed, and that inconsistency is preserved
    /// rather than fixed.
    Daily,

    /// Two-device session synchronized over the peer link.
    ///
    /// Legacy save files call this mode `bluetooth`.
    #[serde(alias = "bluetooth")]
    Peer,
}

impl GameMode {
    /// Whether turn ownership and the transport are active.
    pub const fn is_peer(self) -> bool {
        matches!(self, Self::Peer)
    }
}
