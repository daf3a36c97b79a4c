//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! interactive state of the application completely decoupled from I/O and
//! game mechanics.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Tracks the board view, cursor position, and game log.
//! - Stores terminal dimensions to handle resize events.
//! - Tracks peer link state so peer mode is only offered when a link is up.
//!
//! The board view is event-sourced: the App applies the bridge's
//! card-level events and never reaches into the session.

use pairlink_core::GameMode;
use pairlink_proto::CardIndex;

use crate::{AppAction, AppEvent, CardView, KeyInput, LinkState, LogEntry};

/// Board columns used for cursor movement.
const BOARD_COLUMNS: usize = 4;

/// Log lines kept before the oldest are dropped.
const LOG_CAPACITY: usize = 200;

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies, fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Player name used for exports.
    player_name: String,
    /// View of every board position. Empty before the first game.
    cards: Vec<CardView>,
    /// Board position under the cursor.
    cursor: usize,
    /// Mode of the current game. `None` before the first game.
    mode: Option<GameMode>,
    /// Peer mode: whether the local player may act.
    our_turn: bool,
    /// Whether the local board is fully matched.
    cleared: bool,
    /// Peer link state.
    link: LinkState,
    /// Game log, oldest first.
    log: Vec<LogEntry>,
    /// Total log lines ever added, including dropped ones.
    log_seq: usize,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
}

impl App {
    /// Create a new App for the given player.
    pub fn new(player_name: String) -> Self {
        Self {
            player_name,
            cards: Vec::new(),
            cursor: 0,
            mode: None,
            our_turn: false,
            cleared: false,
            link: LinkState::Offline,
            log: Vec::new(),
            log_seq: 0,
            terminal_size: (80, 24),
            status_message: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => vec![],
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::LinkUp => {
                self.link = LinkState::Linked;
                self.push_log("peer link up");
                vec![AppAction::Render]
            },
            AppEvent::LinkDown => {
                self.link = LinkState::Offline;
                self.push_log("peer link lost");
                vec![AppAction::Render]
            },
            AppEvent::BoardReset { cards, mode } => {
                self.cursor = self.cursor.min(cards.len().saturating_sub(1));
                self.cards = cards;
                self.mode = Some(mode);
                self.cleared = false;
                vec![AppAction::Render]
            },
            AppEvent::CardRevealed { index, symbol } => {
                self.set_card(index, CardView::Revealed(symbol));
                vec![AppAction::Render]
            },
            AppEvent::CardsConcealed { indices } => {
                for index in indices {
                    self.set_card(index, CardView::Hidden);
                }
                vec![AppAction::Render]
            },
            AppEvent::PairMatched { indices, symbol, ours } => {
                for index in indices {
                    self.set_card(index, CardView::Matched(symbol));
                }
                if ours {
                    self.push_log(format!("you matched a {symbol} pair"));
                } else {
                    self.push_log(format!("opponent matched a {symbol} pair"));
                }
                vec![AppAction::Render]
            },
            AppEvent::TurnChanged { ours } => {
                self.our_turn = ours;
                vec![AppAction::Render]
            },
            AppEvent::Cleared => {
                self.cleared = true;
                self.push_log("board cleared, well played!");
                vec![AppAction::Render]
            },
            AppEvent::OpponentCleared => {
                self.push_log("opponent cleared their board");
                vec![AppAction::Render]
            },
            AppEvent::Notice { message } => {
                self.push_log(message);
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                // Failures go to the log as well as the status line; the
                // status message is transient, the log is the record.
                self.push_log(format!("error: {message}"));
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc | KeyInput::Char('q') => vec![AppAction::Quit],
            KeyInput::Char('s') => self.start_game(GameMode::Single),
            KeyInput::Char('d') => self.start_game(GameMode::Daily),
            KeyInput::Char('p') => {
                if self.link == LinkState::Linked {
                    self.start_game(GameMode::Peer)
                } else {
                    self.status_message = Some("no peer link; peer mode unavailable".into());
                    vec![AppAction::Render]
                }
            },
            KeyInput::Char('e') => vec![AppAction::ExportSave, AppAction::Render],
            KeyInput::Char('i') => vec![AppAction::ImportSave, AppAction::Render],
            KeyInput::Enter | KeyInput::Char(' ') => self.flip_at_cursor(),
            KeyInput::Left | KeyInput::Char('h') => self.move_cursor(-1),
            KeyInput::Right | KeyInput::Char('l') => self.move_cursor(1),
            KeyInput::Up | KeyInput::Char('k') => self.move_cursor(-(BOARD_COLUMNS as isize)),
            KeyInput::Down | KeyInput::Char('j') => self.move_cursor(BOARD_COLUMNS as isize),
            KeyInput::Char(_) => vec![],
        }
    }

    fn start_game(&mut self, mode: GameMode) -> Vec<AppAction> {
        self.status_message = None;
        vec![AppAction::StartGame { mode }, AppAction::Render]
    }

    fn flip_at_cursor(&mut self) -> Vec<AppAction> {
        if self.cards.is_empty() {
            self.status_message = Some("no game in progress; press s, d, or p".into());
            return vec![AppAction::Render];
        }
        // Cursor stays within the board, so the cast is lossless.
        #[allow(clippy::cast_possible_truncation)]
        let index = self.cursor as CardIndex;
        vec![AppAction::FlipCard { index }, AppAction::Render]
    }

    fn move_cursor(&mut self, delta: isize) -> Vec<AppAction> {
        if self.cards.is_empty() {
            return vec![];
        }
        let len = self.cards.len() as isize;
        let next = self.cursor as isize + delta;
        if (0..len).contains(&next) {
            self.cursor = next as usize;
            vec![AppAction::Render]
        } else {
            vec![]
        }
    }

    fn set_card(&mut self, index: CardIndex, view: CardView) {
        if let Some(card) = self.cards.get_mut(usize::from(index)) {
            *card = view;
        }
    }

    fn push_log(&mut self, text: impl Into<String>) {
        self.log_seq += 1;
        self.log.push(LogEntry { seq: self.log_seq, text: text.into() });
        if self.log.len() > LOG_CAPACITY {
            self.log.remove(0);
        }
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Player name used for exports.
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// View of every board position. Empty before the first game.
    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    /// Board position under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Mode of the current game. `None` before the first game.
    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    /// Peer mode: whether the local player may act.
    pub fn our_turn(&self) -> bool {
        self.our_turn
    }

    /// Whether the local board is fully matched.
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }

    /// Peer link state.
    pub fn link(&self) -> LinkState {
        self.link
    }

    /// Game log, oldest first.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use pairlink_proto::Symbol;

    use super::*;

    fn app_with_board() -> App {
        let mut app = App::new("player".into());
        let _ = app.handle(AppEvent::BoardReset {
            cards: vec![CardView::Hidden; 16],
            mode: GameMode::Single,
        });
        app
    }

    #[test]
    fn enter_flips_card_under_cursor() {
        let mut app = app_with_board();
        let _ = app.handle(AppEvent::Key(KeyInput::Right));
        let actions = app.handle(AppEvent::Key(KeyInput::Enter));

        assert!(matches!(actions.as_slice(), [
            AppAction::FlipCard { index: 1 },
            AppAction::Render
        ]));
    }

    #[test]
    fn flip_without_board_is_status_only() {
        let mut app = App::new("player".into());
        let actions = app.handle(AppEvent::Key(KeyInput::Enter));

        assert_eq!(actions, vec![AppAction::Render]);
        assert!(app.status_message().is_some());
    }

    #[test]
    fn cursor_stays_on_the_board() {
        let mut app = app_with_board();

        let _ = app.handle(AppEvent::Key(KeyInput::Left));
        assert_eq!(app.cursor(), 0, "left edge clamps");

        for _ in 0..20 {
            let _ = app.handle(AppEvent::Key(KeyInput::Down));
        }
        assert_eq!(app.cursor(), 12, "bottom edge clamps");

        for _ in 0..20 {
            let _ = app.handle(AppEvent::Key(KeyInput::Right));
        }
        assert_eq!(app.cursor(), 15, "end of board clamps");
    }

    #[test]
    fn peer_mode_requires_link() {
        let mut app = app_with_board();

        let actions = app.handle(AppEvent::Key(KeyInput::Char('p')));
        assert_eq!(actions, vec![AppAction::Render]);
        assert!(app.status_message().is_some());

        let _ = app.handle(AppEvent::LinkUp);
        let actions = app.handle(AppEvent::Key(KeyInput::Char('p')));
        assert!(matches!(actions.as_slice(), [
            AppAction::StartGame { mode: GameMode::Peer },
            AppAction::Render
        ]));
    }

    #[test]
    fn board_reset_replaces_view() {
        let mut app = app_with_board();
        let _ = app.handle(AppEvent::CardRevealed { index: 0, symbol: Symbol::new('🍎') });
        assert!(matches!(app.cards()[0], CardView::Revealed(_)));

        let _ = app.handle(AppEvent::BoardReset {
            cards: vec![CardView::Hidden; 16],
            mode: GameMode::Daily,
        });
        assert!(app.cards().iter().all(|c| *c == CardView::Hidden));
        assert_eq!(app.mode(), Some(GameMode::Daily));
    }

    #[test]
    fn pair_matched_marks_both_cards() {
        let mut app = app_with_board();
        let symbol = Symbol::new('🍇');
        let _ = app.handle(AppEvent::PairMatched { indices: [3, 5], symbol, ours: false });

        assert_eq!(app.cards()[3], CardView::Matched(symbol));
        assert_eq!(app.cards()[5], CardView::Matched(symbol));
        assert!(app.log().last().is_some_and(|e| e.text.contains("opponent")));
    }

    #[test]
    fn errors_reach_the_log_not_just_the_status_line() {
        let mut app = App::new("player".into());
        let actions =
            app.handle(AppEvent::Error { message: "import failed: missing deck".into() });

        assert_eq!(actions, vec![AppAction::Render]);
        assert!(app.status_message().is_some_and(|s| s.contains("import failed")));
        assert!(app.log().last().is_some_and(|e| e.text.contains("import failed")));
    }

    #[test]
    fn quit_keys() {
        let mut app = App::new("player".into());
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Esc)), vec![AppAction::Quit]);
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Char('q'))), vec![AppAction::Quit]);
    }

    #[test]
    fn log_is_bounded() {
        let mut app = App::new("player".into());
        for i in 0..500 {
            let _ = app.handle(AppEvent::Notice { message: format!("line {i}") });
        }
        assert_eq!(app.log().len(), 200);
        assert_eq!(app.log().last().map(|e| e.seq), Some(500));
    }
}
