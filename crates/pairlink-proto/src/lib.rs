//! Wire protocol for the Pairlink peer link.
//!
//! Defines the control messages two peers exchange during a game
//! ([`PeerMessage`]) and the text codec that turns them into single-write
//! payloads ([`codec`]). The link itself delivers one message per
//! write/notification with no framing, acknowledgement, or retry; this crate
//! only guarantees that an encoded message fits the link's attribute size.

pub mod codec;
pub mod errors;
pub mod message;

pub use codec::{MAX_PAYLOAD_SIZE, decode, encode};
pub use errors::{ProtocolError, Result};
pub use message::{CardIndex, PeerMessage, Symbol};

/// GATT service identifier both peers must expose.
///
/// Fixed, publicly-known contract: a session only connects when both sides
/// use this exact pair.
pub const SERVICE_UUID: &str = "0000ffe0-0000-1000-8000-00805f9b34fb";

/// GATT characteristic identifier used for both write and notify.
pub const CHARACTERISTIC_UUID: &str = "0000ffe1-0000-1000-8000-00805f9b34fb";
