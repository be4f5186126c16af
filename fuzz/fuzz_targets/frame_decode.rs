#![no_main]

use libfuzzer_sys::fuzz_target;
use sealframe::Frame;

fuzz_target!(|data: &[u8]| {
    // Attack: arbitrary bytes deserialized as a frame body.
    // Validates: no panics, exact short-frame boundary, and that decoding
    // then re-encoding an accepted body is the identity.

    match Frame::from_bytes(data) {
        Ok(frame) => {
            assert!(data.len() >= 33, "accepted frame below minimum size");
            assert_eq!(frame.ciphertext.len(), data.len() - 32);
            assert_eq!(frame.to_bytes(), data, "decode/encode must be identity");
        }
        Err(_) => {
            assert!(data.len() < 33, "rejected frame at or above minimum size");
        }
    }
});
