//! Core game rules for Pairlink.
//!
//! Deck construction and validation, the save-file schema, the game mode
//! enum, and the [`env::Environment`] abstraction that keeps time and
//! randomness out of game logic so the same code runs in production and in
//! deterministic simulation.

pub mod deck;
pub mod env;
pub mod error;
pub mod mode;
pub mod savefile;

pub use deck::{DECK_SIZE, Deck, PAIR_COUNT, SYMBOLS};
pub use env::{Environment, SystemEnv};
pub use error::{DeckError, SaveError};
pub use mode::GameMode;
pub use savefile::{GameSnapshot, SAVE_VERSION, SaveFile};
