//! Text codec for peer messages.
//!
//! One encoded message per characteristic write/notification. The link
//! guarantees message-sized delivery only up to its attribute size, so the
//! size limit is enforced here on both directions: at encode to avoid
//! writing a payload the link would truncate, and at decode before the JSON
//! parser touches untrusted bytes.

use bytes::Bytes;

use crate::{
    errors::{ProtocolError, Result},
    message::PeerMessage,
};

/// Maximum payload size for a single write/notification, in bytes.
///
/// The largest legitimate message (a full 16-emoji `deck`) is well under
/// this; anything bigger is either a bug or a hostile peer.
pub const MAX_PAYLOAD_SIZE: usize = 512;

/// Encode a message into a single-write payload.
///
/// # Errors
///
/// - [`ProtocolError::Encode`] if serialization fails
/// - [`ProtocolError::PayloadTooLarge`] if the encoded form exceeds
///   [`MAX_PAYLOAD_SIZE`]
pub fn encode(message: &PeerMessage) -> Result<Bytes> {
    let bytes = serde_json::to_vec(message).map_err(|e| ProtocolError::Encode(e.to_string()))?;

    if bytes.len() > MAX_PAYLOAD_SIZE {
        return Err(ProtocolError::PayloadTooLarge { size: bytes.len(), max: MAX_PAYLOAD_SIZE });
    }

    Ok(Bytes::from(bytes))
}

/// Decode a single notification payload into a message.
///
/// The size check happens before parsing so oversized inbound data is
/// rejected without being fed to the JSON parser.
///
/// # Errors
///
/// - [`ProtocolError::PayloadTooLarge`] if the payload exceeds
///   [`MAX_PAYLOAD_SIZE`]
/// - [`ProtocolError::Decode`] if the payload is not a valid message
pub fn decode(bytes: &[u8]) -> Result<PeerMessage> {
    if bytes.len() > MAX_PAYLOAD_SIZE {
        return Err(ProtocolError::PayloadTooLarge { size: bytes.len(), max: MAX_PAYLOAD_SIZE });
    }

    serde_json::from_slice(bytes).map_err(|e| ProtocolError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Symbol;

    #[test]
    fn full_deck_fits_attribute_size() {
        let deck = "🍎🍌🍇🍒🥝🍍🥥🍉🍎🍌🍇🍒🥝🍍🥥🍉".chars().map(Symbol::new).collect();
        let wire = encode(&PeerMessage::Deck { deck }).unwrap();
        assert!(wire.len() <= MAX_PAYLOAD_SIZE);
    }

    #[test]
    fn oversized_deck_rejected_at_encode() {
        let deck = vec![Symbol::new('🍎'); 200];
        let result = encode(&PeerMessage::Deck { deck });
        assert!(matches!(result, Err(ProtocolError::PayloadTooLarge { .. })));
    }

    #[test]
    fn oversized_payload_rejected_before_parse() {
        let blob = vec![b'x'; MAX_PAYLOAD_SIZE + 1];
        let result = decode(&blob);
        assert!(matches!(result, Err(ProtocolError::PayloadTooLarge { .. })));
    }

    #[test]
    fn garbage_payload_rejected() {
        assert!(matches!(decode(b"not json"), Err(ProtocolError::Decode(_))));
        assert!(matches!(decode(br#"{"type":42}"#), Err(ProtocolError::Decode(_))));
    }

    #[test]
    fn codec_round_trip() {
        let msg = PeerMessage::Match { indices: [4, 11] };
        let wire = encode(&msg).unwrap();
        assert_eq!(decode(&wire).unwrap(), msg);
    }
}
