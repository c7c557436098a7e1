//! Fuzz target for SignatureMessage::decode
//!
//! Feeds arbitrary bytes to the Signature message decoder looking for:
//! - Panics on short or malformed input
//! - Allocations driven by an unchecked declared length
//!
//! The decoder should NEVER panic. Anything it accepts must re-encode to a
//! prefix of the input (trailing bytes are ignored on decode).

#![no_main]

use libfuzzer_sys::fuzz_target;
use otr_proto::SignatureMessage;

fuzz_target!(|data: &[u8]| {
    let Ok(message) = SignatureMessage::decode(data) else {
        return;
    };

    let Ok(encoded) = message.to_bytes() else {
        panic!("decoded message failed to re-encode");
    };
    assert!(data.starts_with(&encoded), "re-encoding is not a prefix of the input");
    assert_eq!(encoded.len(), message.encoded_len());
});
