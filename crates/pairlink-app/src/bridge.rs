//! Session-to-Application translation layer.
//!
//! The [`Bridge`] wraps the sans-IO [`pairlink_session::Session`] and adapts
//! it to the high-level application lifecycle.
//!
//! # Responsibilities
//!
//! - Converts high-level [`crate::AppAction`] into specific session events.
//! - Accumulates outgoing [`pairlink_proto::PeerMessage`] to be sent by the
//!   driver in the next I/O cycle.
//! - Interprets session actions and converts them back into
//!   [`crate::AppEvent`]s to update the UI, resolving card symbols so the
//!   App never touches the deck.
//! - Manages time ticks generically to support both real-time execution and
//!   deterministic simulation.

use pairlink_core::{Environment, SaveError, savefile};
use pairlink_proto::PeerMessage;
use pairlink_session::{Session, SessionAction, SessionError, SessionEvent};
use thiserror::Error;

use crate::{AppAction, AppEvent, CardView};

/// Errors from export/import requests.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The session cannot produce a snapshot.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The save file failed to serialize or validate.
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Bridge between App and session game logic.
///
/// Generic over Environment to support both production and simulation.
/// The Instant type is determined by the Environment's associated type.
pub struct Bridge<E: Environment> {
    session: Session<E>,
    player_name: String,
    outgoing: Vec<PeerMessage>,
}

impl<E: Environment> Bridge<E> {
    /// Create a new Bridge with the given environment and player name.
    pub fn new(env: E, player_name: String) -> Self {
        Self { session: Session::new(env), player_name, outgoing: Vec::new() }
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::StartGame { mode } => {
                let result = self.session.handle(SessionEvent::Start { mode });
                self.handle_session_result(result)
            },
            AppAction::FlipCard { index } => {
                let result = self.session.handle(SessionEvent::Flip { index });
                self.handle_session_result(result)
            },
            // File I/O and rendering are the runtime's business.
            AppAction::Render
            | AppAction::Quit
            | AppAction::ExportSave
            | AppAction::ImportSave => vec![],
        }
    }

    /// Handle a message from the peer link.
    pub fn handle_message(&mut self, message: PeerMessage) -> Vec<AppEvent> {
        let result = self.session.handle(SessionEvent::MessageReceived(message));
        self.handle_session_result(result)
    }

    /// Process a time tick.
    pub fn handle_tick(&mut self, now: E::Instant) -> Vec<AppEvent> {
        let result = self.session.handle(SessionEvent::Tick { now });
        self.handle_session_result(result)
    }

    /// Serialize the current game for export.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] if no game is in progress or serialization
    /// fails.
    pub fn export_json(&self) -> Result<String, BridgeError> {
        let snapshot = self.session.snapshot(self.player_name.clone())?;
        Ok(savefile::to_json(&snapshot)?)
    }

    /// Validate a save file and restore the game from it.
    pub fn import_json(&mut self, json: &str) -> Vec<AppEvent> {
        match savefile::from_json(json) {
            Ok(snapshot) => {
                let result = self.session.handle(SessionEvent::Restore(snapshot));
                self.handle_session_result(result)
            },
            Err(e) => vec![AppEvent::Error { message: format!("import failed: {e}") }],
        }
    }

    /// Take pending outgoing messages.
    pub fn take_outgoing(&mut self) -> Vec<PeerMessage> {
        std::mem::take(&mut self.outgoing)
    }

    /// View of every board position, derived from session state.
    pub fn board_view(&self) -> Vec<CardView> {
        let Some(deck) = self.session.deck() else {
            return Vec::new();
        };

        deck.symbols()
            .iter()
            .enumerate()
            .map(|(i, symbol)| {
                // Board indices fit the wire index type by construction.
                #[allow(clippy::cast_possible_truncation)]
                let index = i as pairlink_proto::CardIndex;
                if self.session.matched().contains(&index) {
                    CardView::Matched(*symbol)
                } else if self.session.revealed().contains(index) {
                    CardView::Revealed(*symbol)
                } else {
                    CardView::Hidden
                }
            })
            .collect()
    }

    fn handle_session_result(
        &mut self,
        result: Result<Vec<SessionAction>, SessionError>,
    ) -> Vec<AppEvent> {
        match result {
            Ok(actions) => self.process_session_actions(actions),
            Err(e) => vec![AppEvent::Error { message: e.to_string() }],
        }
    }

    fn process_session_actions(&mut self, actions: Vec<SessionAction>) -> Vec<AppEvent> {
        let mut events = Vec::new();

        for action in actions {
            match action {
                SessionAction::Send(message) => {
                    self.outgoing.push(message);
                },
                SessionAction::Revealed { index, symbol } => {
                    events.push(AppEvent::CardRevealed { index, symbol });
                },
                SessionAction::Concealed { indices } => {
                    events.push(AppEvent::CardsConcealed { indices });
                },
                SessionAction::PairMatched { indices, symbol } => {
                    events.push(AppEvent::PairMatched { indices, symbol, ours: true });
                },
                SessionAction::OpponentMatched { indices } => {
                    // The claim was validated against the local deck, so the
                    // symbol lookup cannot miss.
                    let symbol = self
                        .session
                        .deck()
                        .and_then(|deck| deck.symbol(indices[0]));
                    if let Some(symbol) = symbol {
                        events.push(AppEvent::PairMatched { indices, symbol, ours: false });
                    }
                },
                SessionAction::TurnChanged { ours } => {
                    events.push(AppEvent::TurnChanged { ours });
                },
                SessionAction::BoardReset => {
                    let cards = self.board_view();
                    let mode = self.session.mode().unwrap_or_default();
                    events.push(AppEvent::BoardReset { cards, mode });
                },
                SessionAction::Cleared => {
                    events.push(AppEvent::Cleared);
                },
                SessionAction::OpponentCleared => {
                    events.push(AppEvent::OpponentCleared);
                },
                SessionAction::Notice { message } => {
                    events.push(AppEvent::Notice { message });
                },
            }
        }

        events
    }
}
