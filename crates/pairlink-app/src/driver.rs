//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::{
    future::Future,
    ops::{Add, Sub},
    time::Duration,
};

use pairlink_proto::PeerMessage;

use crate::{App, AppEvent};

/// Abstracts I/O operations for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures
/// the same orchestration code runs in production TUI and simulation.
///
/// # Implementations
///
/// - **TUI**: Uses crossterm for terminal events, UDP datagrams for the
///   peer link, and real files for saves
/// - **Simulation**: Uses scripted inputs, an in-memory lossy link, and
///   in-memory saves
///
/// # Associated Types
///
/// - [`Error`](Driver::Error): Platform-specific error type
/// - [`Instant`](Driver::Instant): Time representation (real or virtual)
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Time instant type. Enables virtual time in simulation.
    type Instant: Copy
        + Ord
        + Send
        + Sync
        + Sub<Output = Duration>
        + Add<Duration, Output = Self::Instant>;

    /// Poll for the next input event.
    ///
    /// Returns an available event or `None` if no events are ready. Must
    /// not block indefinitely; the runtime relies on regular returns to
    /// drive ticks.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Send a message to the peer.
    ///
    /// # Errors
    ///
    /// Returns an error if the link is down or send fails.
    fn send_message(
        &mut self,
        message: PeerMessage,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Receive a message from the peer, if one is waiting.
    ///
    /// Must not block indefinitely. Returns `None` when nothing is queued.
    fn recv_message(&mut self) -> impl Future<Output = Option<PeerMessage>> + Send;

    /// Whether the peer link is currently up.
    fn is_linked(&self) -> bool;

    /// Current time instant.
    fn now(&self) -> Self::Instant;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Persist an exported save.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be written.
    fn write_save(&mut self, json: &str) -> Result<(), Self::Error>;

    /// Load a previously exported save. `None` if no save exists.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing save cannot be read.
    fn read_save(&mut self) -> Result<Option<String>, Self::Error>;

    /// Stop the peer link and clean up resources.
    fn stop(&mut self);
}
