//! Tamper, reorder, substitution, and wrong-key detection across the full
//! pipeline. Every mutation of a sealed stream must surface as an Auth or
//! Order error naming the affected frame; none may yield plaintext.

mod common;

use common::fixtures::{other_master, pseudorandom_data, test_master, OBJECT_A, OBJECT_B};
use sealframe::{
    decrypt_frame, derive_subkey, open_buffer, open_stream, seal_buffer, seal_stream, CodecConfig,
    CodecError, Frame,
};
use std::io::Cursor;

fn small_config() -> CodecConfig {
    CodecConfig {
        frame_size: 1024,
        ..CodecConfig::default()
    }
}

fn sealed_bodies(data: &[u8]) -> Vec<Vec<u8>> {
    seal_buffer(data, &test_master(), OBJECT_A, &small_config()).unwrap()
}

#[test]
fn rewriting_the_index_field_fails_authentication() {
    // Frame 0 relabeled as frame 1: the reconstructed AAD no longer matches
    // the one baked into the tag.
    let bodies = sealed_bodies(b"Hello, World!");
    let mut frame = Frame::from_bytes(&bodies[0]).unwrap();
    frame.index = 1;

    let subkey = derive_subkey(&test_master(), OBJECT_A).unwrap();
    let result = decrypt_frame(&subkey, OBJECT_A, &frame);
    assert!(matches!(result, Err(CodecError::Auth { index: 1 })));
}

#[test]
fn wrong_object_id_fails_on_frame_zero() {
    // Sealed under "video-1", opened under "video-2": different subkey AND
    // different AAD.
    let bodies = sealed_bodies(b"Hello, World!");
    let result = open_buffer(&bodies, &test_master(), OBJECT_B);
    assert!(matches!(result, Err(CodecError::Auth { index: 0 })));
}

#[test]
fn wrong_master_fails_on_frame_zero() {
    let bodies = sealed_bodies(b"Hello, World!");
    let result = open_buffer(&bodies, &other_master(), OBJECT_A);
    assert!(matches!(result, Err(CodecError::Auth { index: 0 })));
}

#[test]
fn every_region_of_a_frame_is_tamper_protected() {
    let data = pseudorandom_data(600, 0xD00D);
    let bodies = sealed_bodies(&data);
    let body = &bodies[0];

    // One flipped bit in each region: index, nonce, tag, ciphertext.
    for &offset in &[2usize, 9, 20, 40] {
        let mut tampered = body.clone();
        tampered[offset] ^= 0x04;
        let result = open_buffer([&tampered], &test_master(), OBJECT_A);
        assert!(
            matches!(result, Err(CodecError::Auth { .. }) | Err(CodecError::Order { .. })),
            "offset {offset} flip must not decrypt: {result:?}"
        );
    }
}

#[test]
fn swapped_frames_are_rejected() {
    let data = pseudorandom_data(2048, 0xCAFE);
    let mut bodies = sealed_bodies(&data);
    assert_eq!(bodies.len(), 2);
    bodies.swap(0, 1);

    let result = open_buffer(&bodies, &test_master(), OBJECT_A);
    assert!(matches!(
        result,
        Err(CodecError::Order {
            expected: 0,
            found: 1
        })
    ));
}

#[test]
fn duplicated_frame_is_rejected() {
    let data = pseudorandom_data(2048, 0xF00D);
    let bodies = sealed_bodies(&data);
    let replayed = vec![bodies[0].clone(), bodies[0].clone(), bodies[1].clone()];

    let result = open_buffer(&replayed, &test_master(), OBJECT_A);
    assert!(matches!(
        result,
        Err(CodecError::Order {
            expected: 1,
            found: 0
        })
    ));
}

#[test]
fn dropped_leading_frame_is_rejected() {
    let data = pseudorandom_data(2048, 0xAAAA);
    let bodies = sealed_bodies(&data);
    let result = open_buffer(&bodies[1..], &test_master(), OBJECT_A);
    assert!(matches!(result, Err(CodecError::Order { .. })));
}

#[test]
fn tampered_stream_aborts_before_tainted_output() {
    // In strict mode, a failure on frame 1 must surface as an error even
    // though frame 0 already reached the sink.
    let data = pseudorandom_data(3 * 1024, 0x5EED);
    let master = test_master();
    let config = small_config();

    let mut sealed = Vec::new();
    seal_stream(Cursor::new(data), &mut sealed, &master, OBJECT_A, &config).unwrap();

    let record_len = 4 + 32 + 1024;
    sealed[record_len + 50] ^= 0x80;

    let mut opened = Vec::new();
    let result = open_stream(Cursor::new(&sealed), &mut opened, &master, OBJECT_A, &config);
    assert!(matches!(result, Err(CodecError::Auth { index: 1 })));
    // Only the authenticated prefix was ever released.
    assert_eq!(opened.len(), 1024);
}

#[test]
fn truncated_final_record_is_detected() {
    let data = pseudorandom_data(1500, 0x1234);
    let master = test_master();
    let config = small_config();

    let mut sealed = Vec::new();
    seal_stream(Cursor::new(data), &mut sealed, &master, OBJECT_A, &config).unwrap();
    sealed.truncate(sealed.len() - 7);

    let mut opened = Vec::new();
    let result = open_stream(Cursor::new(&sealed), &mut opened, &master, OBJECT_A, &config);
    assert!(matches!(
        result,
        Err(CodecError::Format(sealframe::FormatError::TruncatedEnvelope { .. }))
    ));
}
