//! Envelope layer behavior over real sealed streams: incremental parsing at
//! arbitrary read granularities, idempotent serialize/deserialize, and
//! malformed-length rejection.

mod common;

use common::fixtures::{pseudorandom_data, test_master, OBJECT_A};
use sealframe::{
    derive_subkey, encode_record, encrypt_frame, CodecError, EnvelopeParser, FormatError, Frame,
};

fn sealed_frames(payloads: &[&[u8]]) -> Vec<Frame> {
    let subkey = derive_subkey(&test_master(), OBJECT_A).unwrap();
    payloads
        .iter()
        .enumerate()
        .map(|(i, p)| encrypt_frame(&subkey, OBJECT_A, i as u32, p).unwrap())
        .collect()
}

#[test]
fn serialize_then_parse_is_identity() {
    let frames = sealed_frames(&[b"first frame" as &[u8], b"second", b"third one here"]);
    let mut stream = Vec::new();
    for frame in &frames {
        stream.extend(encode_record(frame));
    }

    let mut parser = EnvelopeParser::new(1024).unwrap();
    let parsed = parser.push(&stream).unwrap();
    parser.finish().unwrap();
    assert_eq!(parsed, frames);
}

#[test]
fn parsing_is_read_size_independent() {
    let big = pseudorandom_data(900, 11);
    let frames = sealed_frames(&[big.as_slice(), b"tail"]);
    let mut stream = Vec::new();
    for frame in &frames {
        stream.extend(encode_record(frame));
    }

    for chunk_size in [1usize, 3, 7, 64, 1000, stream.len()] {
        let mut parser = EnvelopeParser::new(1024).unwrap();
        let mut parsed = Vec::new();
        for chunk in stream.chunks(chunk_size) {
            parsed.extend(parser.push(chunk).unwrap());
        }
        parser.finish().unwrap();
        assert_eq!(parsed, frames, "chunk size {chunk_size}");
    }
}

#[test]
fn length_below_minimum_frame_is_malformed() {
    let mut parser = EnvelopeParser::new(1024).unwrap();
    // body_len 32 would be a frame with zero ciphertext bytes
    let result = parser.push(&32u32.to_be_bytes());
    assert!(matches!(
        result,
        Err(CodecError::Format(FormatError::MalformedEnvelope { body_len: 32 }))
    ));
}

#[test]
fn length_above_frame_size_is_malformed() {
    let mut parser = EnvelopeParser::new(1024).unwrap();
    let result = parser.push(&(32 + 1024 + 1u32).to_be_bytes());
    assert!(matches!(
        result,
        Err(CodecError::Format(FormatError::MalformedEnvelope { .. }))
    ));
}

#[test]
fn giant_length_does_not_allocate_or_hang() {
    let mut parser = EnvelopeParser::new(1024).unwrap();
    let result = parser.push(&u32::MAX.to_be_bytes());
    assert!(matches!(
        result,
        Err(CodecError::Format(FormatError::MalformedEnvelope { .. }))
    ));
}

#[test]
fn partial_length_prefix_is_residue() {
    let mut parser = EnvelopeParser::new(1024).unwrap();
    parser.push(&[0x00, 0x00]).unwrap();
    assert_eq!(parser.pending(), 2);
    let result = parser.finish();
    assert!(matches!(
        result,
        Err(CodecError::Format(FormatError::TruncatedEnvelope { residue: 2 }))
    ));
}

#[test]
fn garbage_after_valid_records_is_detected() {
    let frames = sealed_frames(&[b"only frame"]);
    let mut stream = encode_record(&frames[0]);
    stream.extend_from_slice(&[0xFF, 0xEE, 0xDD, 0xCC]);

    let mut parser = EnvelopeParser::new(1024).unwrap();
    let result = parser.push(&stream);
    // 0xFFEEDDCC reads as an absurd length prefix
    assert!(matches!(
        result,
        Err(CodecError::Format(FormatError::MalformedEnvelope { .. }))
    ));
}
