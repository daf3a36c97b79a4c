//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use pairlink_core::GameMode;
use pairlink_proto::CardIndex;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Start a fresh game.
    StartGame {
        /// Mode to start in.
        mode: GameMode,
    },

    /// Flip the card at `index`.
    FlipCard {
        /// Board position to flip.
        index: CardIndex,
    },

    /// Export the current game to the save file.
    ExportSave,

    /// Import a game from the save file.
    ImportSave,
}
