//! Protocol error types.
//!
//! Strongly-typed errors for encoding and decoding peer messages. Transport
//! failures live with the transport; this layer only knows about payload
//! shape and size.

use thiserror::Error;

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors from encoding or decoding a peer message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Message could not be serialized.
    #[error("encode failed: {0}")]
    Encode(String),

    /// Inbound payload was not a valid message.
    ///
    /// Per the link contract the message is dropped; there is no recovery or
    /// resync.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Payload exceeds the link's single-write attribute size.
    #[error("payload too large: {size} bytes exceeds {max} byte limit")]
    PayloadTooLarge {
        /// Actual payload size in bytes.
        size: usize,
        /// Maximum allowed size.
        max: usize,
    },
}
