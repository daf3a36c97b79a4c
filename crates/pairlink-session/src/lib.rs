//! Turn/match state machine and peer protocol for Pairlink.
//!
//! The [`Session`] is a pure state machine: it consumes [`SessionEvent`]
//! inputs (flips, ticks, inbound peer messages) and produces
//! [`SessionAction`] instructions for the caller to execute (send a
//! message, update the board view). No I/O happens inside, which lets the
//! same code run under the production TUI and the deterministic simulation
//! harness.
//!
//! The optional `transport` feature adds a datagram link implementation
//! ([`transport::ConnectedPeer`]) for real two-device sessions.

pub mod error;
pub mod event;
pub mod session;
#[cfg(feature = "transport")]
pub mod transport;

pub use error::SessionError;
pub use event::{SessionAction, SessionEvent};
pub use session::{RESOLVE_DELAY, RevealSet, Session};
