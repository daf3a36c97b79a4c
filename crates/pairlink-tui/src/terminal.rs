//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The peer link uses UDP
//! datagrams; saves go to a JSON file on disk.

use std::{
    io::{self, Stdout, stdout},
    path::PathBuf,
    time::Instant,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use pairlink_app::{App, AppEvent, Driver, KeyInput};
use pairlink_proto::PeerMessage;
use pairlink_session::transport::{ConnectedPeer, TransportError};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc::error::TryRecvError;

use crate::ui;

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations or the save file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Channel send error.
    #[error("channel send error")]
    ChannelSend,
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Handles terminal I/O (crossterm), rendering (ratatui), the peer link
/// (UDP datagrams), and the save file.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
    link: Option<ConnectedPeer>,
    /// Set when the link task ends, so `LinkDown` fires exactly once.
    link_down_pending: bool,
    save_path: PathBuf,
}

impl TerminalDriver {
    /// Create a new terminal driver without a peer link.
    pub fn new(save_path: PathBuf) -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let event_stream = EventStream::new();

        Ok(Self { terminal, event_stream, link: None, link_down_pending: false, save_path })
    }

    /// Attach a peer link.
    pub fn with_link(mut self, link: ConnectedPeer) -> Self {
        self.link = Some(link);
        self
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            _ => None,
        }
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;
    type Instant = Instant;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        if self.link_down_pending {
            self.link_down_pending = false;
            self.link = None;
            return Ok(Some(AppEvent::LinkDown));
        }

        let timeout = tokio::time::Duration::from_millis(100);

        tokio::select! {
            biased;

            // Terminal events
            maybe_event = self.event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) if key_event.kind == KeyEventKind::Press => {
                        Ok(Self::convert_key(key_event.code).map(AppEvent::Key))
                    },
                    Some(Ok(Event::Resize(cols, rows))) => {
                        Ok(Some(AppEvent::Resize(cols, rows)))
                    },
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    _ => Ok(None),
                }
            }

            // Tick timeout
            () = tokio::time::sleep(timeout) => {
                Ok(Some(AppEvent::Tick))
            }
        }
    }

    async fn send_message(&mut self, message: PeerMessage) -> Result<(), Self::Error> {
        if let Some(link) = &self.link {
            link.to_peer.send(message).await.map_err(|_| TerminalError::ChannelSend)?;
        }
        Ok(())
    }

    async fn recv_message(&mut self) -> Option<PeerMessage> {
        let link = self.link.as_mut()?;
        match link.from_peer.try_recv() {
            Ok(message) => Some(message),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.link_down_pending = true;
                None
            },
        }
    }

    fn is_linked(&self) -> bool {
        self.link.is_some()
    }

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| {
            ui::render(frame, app);
        })?;
        Ok(())
    }

    fn write_save(&mut self, json: &str) -> Result<(), Self::Error> {
        std::fs::write(&self.save_path, json)?;
        Ok(())
    }

    fn read_save(&mut self) -> Result<Option<String>, Self::Error> {
        match std::fs::read_to_string(&self.save_path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TerminalError::Io(e)),
        }
    }

    fn stop(&mut self) {
        if let Some(ref link) = self.link {
            link.stop();
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
