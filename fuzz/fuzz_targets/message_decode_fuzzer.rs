//! Fuzz target for the wire codec.
//!
//! The peer link delivers arbitrary bytes; decode must reject anything
//! that is not a well-formed message without panicking, and anything it
//! accepts must re-encode within the link's payload cap.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pairlink_proto::{MAX_PAYLOAD_SIZE, codec};

fuzz_target!(|data: &[u8]| {
    let Ok(message) = codec::decode(data) else {
        return;
    };

    // Anything decode accepts must survive a round trip.
    let encoded = codec::encode(&message).expect("decoded message re-encodes");
    assert!(encoded.len() <= MAX_PAYLOAD_SIZE);
    assert_eq!(codec::decode(&encoded).expect("re-encoded message decodes"), message);
});
