//! Save-file schema and validation.
//!
//! The export/import contract is a human-readable JSON document:
//!
//! ```json
//! {
//!   "version": 1,
//!   "playerName": "player",
//!   "matchedCards": [0, 2, 5, 9],
//!   "deck": ["🍎", "🍌", ...],
//!   "gameMode": "single"
//! }
//! ```
//!
//! `deck` and `matchedCards` are required; `playerName` and `gameMode`
//! default when absent. Files from the pre-versioning era carry no
//! `version` field and are read as version 0; files claiming a newer
//! version than this build writes are rejected rather than silently
//! misinterpreted.

use std::collections::BTreeSet;

use pairlink_proto::{CardIndex, Symbol};
use serde::{Deserialize, Serialize};

use crate::{
    deck::{DECK_SIZE, Deck},
    error::SaveError,
    mode::GameMode,
};

/// Format version written on export.
pub const SAVE_VERSION: u32 = 1;

fn default_player_name() -> String {
    "player".to_string()
}

/// Raw on-disk schema.
///
/// This mirrors the file field-for-field; validated game state lives in
/// [`GameSnapshot`]. Field names follow the original contract (camelCase).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFile {
    /// Format version; 0 for legacy files without the field.
    #[serde(default)]
    pub version: u32,

    /// Display name of the player.
    #[serde(default = "default_player_name")]
    pub player_name: String,

    /// Indices permanently face-up.
    pub matched_cards: Vec<CardIndex>,

    /// All 16 symbols in board order.
    pub deck: Vec<Symbol>,

    /// Mode the game was started in.
    #[serde(default)]
    pub game_mode: GameMode,
}

/// Validated game state extracted from a save file, or captured from a live
/// session for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Display name of the player.
    pub player_name: String,

    /// Mode the game was started in.
    pub mode: GameMode,

    /// The validated board.
    pub deck: Deck,

    /// Indices permanently face-up. Duplicate entries in the file collapse
    /// here, matching the original's set semantics.
    pub matched: BTreeSet<CardIndex>,
}

/// Parse and validate a save document.
///
/// On any failure the caller's in-memory state is expected to stay
/// untouched; this function never partially applies anything.
///
/// # Errors
///
/// - [`SaveError::Parse`] if the text is not valid JSON or `deck` /
///   `matchedCards` are missing
/// - [`SaveError::UnsupportedVersion`] if the file claims a version newer
///   than [`SAVE_VERSION`]
/// - [`SaveError::Deck`] if the deck fails composition validation
/// - [`SaveError::MatchedOutOfRange`] if a matched index is off the board
pub fn from_json(text: &str) -> Result<GameSnapshot, SaveError> {
    let file: SaveFile = serde_json::from_str(text).map_err(|e| SaveError::Parse(e.to_string()))?;

    if file.version > SAVE_VERSION {
        return Err(SaveError::UnsupportedVersion {
            version: file.version,
            supported: SAVE_VERSION,
        });
    }

    let deck = Deck::from_symbols(file.deck)?;

    let mut matched = BTreeSet::new();
    for index in file.matched_cards {
        if usize::from(index) >= DECK_SIZE {
            return Err(SaveError::MatchedOutOfRange { index });
        }
        matched.insert(index);
    }

    Ok(GameSnapshot { player_name: file.player_name, mode: file.game_mode, deck, matched })
}

/// Serialize a snapshot to the export document (pretty-printed, current
/// version).
///
/// # Errors
///
/// - [`SaveError::Serialize`] if JSON serialization fails
pub fn to_json(snapshot: &GameSnapshot) -> Result<String, SaveError> {
    let file = SaveFile {
        version: SAVE_VERSION,
        player_name: snapshot.player_name.clone(),
        matched_cards: snapshot.matched.iter().copied().collect(),
        deck: snapshot.deck.symbols().to_vec(),
        game_mode: snapshot.mode,
    };

    serde_json::to_string_pretty(&file).map_err(|e| SaveError::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::SYMBOLS;

    fn ordered_deck_json() -> String {
        let symbols: Vec<String> =
            SYMBOLS.iter().flat_map(|s| [s.to_string(), s.to_string()]).collect();
        serde_json::to_string(&symbols).unwrap()
    }

    #[test]
    fn round_trip_preserves_state() {
        let deck_json = ordered_deck_json();
        let text = format!(
            r#"{{"version":1,"playerName":"aya","matchedCards":[0,1],"deck":{deck_json},"gameMode":"peer"}}"#
        );

        let snapshot = from_json(&text).unwrap();
        assert_eq!(snapshot.player_name, "aya");
        assert_eq!(snapshot.mode, GameMode::Peer);
        assert_eq!(snapshot.matched.len(), 2);

        let exported = to_json(&snapshot).unwrap();
        let back = from_json(&exported).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn missing_deck_is_a_parse_error() {
        let text = r#"{"playerName":"aya","matchedCards":[]}"#;
        assert!(matches!(from_json(text), Err(SaveError::Parse(_))));
    }

    #[test]
    fn missing_matched_cards_is_a_parse_error() {
        let deck_json = ordered_deck_json();
        let text = format!(r#"{{"deck":{deck_json}}}"#);
        assert!(matches!(from_json(&text), Err(SaveError::Parse(_))));
    }

    #[test]
    fn legacy_file_without_version_accepted() {
        // What the original browser build exported: no version, mode "bluetooth".
        let deck_json = ordered_deck_json();
        let text = format!(
            r#"{{"playerName":"p","matchedCards":[4],"deck":{deck_json},"gameMode":"bluetooth"}}"#
        );

        let snapshot = from_json(&text).unwrap();
        assert_eq!(snapshot.mode, GameMode::Peer);
    }

    #[test]
    fn future_version_rejected() {
        let deck_json = ordered_deck_json();
        let text = format!(r#"{{"version":9,"matchedCards":[],"deck":{deck_json}}}"#);
        assert!(matches!(from_json(&text), Err(SaveError::UnsupportedVersion { version: 9, .. })));
    }

    #[test]
    fn out_of_range_matched_index_rejected() {
        let deck_json = ordered_deck_json();
        let text = format!(r#"{{"matchedCards":[16],"deck":{deck_json}}}"#);
        assert!(matches!(from_json(&text), Err(SaveError::MatchedOutOfRange { index: 16 })));
    }

    #[test]
    fn missing_mode_defaults_to_single() {
        let deck_json = ordered_deck_json();
        let text = format!(r#"{{"matchedCards":[],"deck":{deck_json}}}"#);
        let snapshot = from_json(&text).unwrap();
        assert_eq!(snapshot.mode, GameMode::Single);
    }
}
