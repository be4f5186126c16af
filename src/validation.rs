//! Input validation shared by every public entry point.
//!
//! All checks run before any key material is touched. Structural and range
//! failures surface as [`CodecError::Validation`]; policy failures (entropy
//! floor, frame cap, path traversal) surface as [`CodecError::Security`].

use std::path::{Component, Path};

use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::error::{CodecError, SecurityCode};

/// Master secret length in bytes.
pub const MASTER_LEN: usize = 32;

/// Coarse entropy floor: a master must contain at least this many distinct
/// byte values.
pub const MASTER_MIN_DISTINCT_BYTES: usize = 16;

/// Maximum object identifier length in UTF-8 bytes.
pub const MAX_OBJECT_ID_BYTES: usize = 256;

/// Smallest accepted frame payload size.
pub const MIN_FRAME_SIZE: usize = 1024;

/// Largest accepted frame payload size (10 MiB).
pub const MAX_FRAME_SIZE: usize = 10 * 1024 * 1024;

/// Default frame payload size (512 KiB).
pub const DEFAULT_FRAME_SIZE: usize = 524_288;

/// Safety ceiling on frame indices within one object.
pub const MAX_FRAME_INDEX: u32 = 100_000;

/// Maximum accepted path length in bytes.
pub const MAX_PATH_BYTES: usize = 4096;

/// Check a prospective master secret: exact length plus the entropy floor.
pub fn validate_master_bytes(bytes: &[u8]) -> Result<(), CodecError> {
    if bytes.len() != MASTER_LEN {
        return Err(CodecError::validation("master"));
    }
    if !meets_entropy_floor(bytes) {
        return Err(CodecError::security(SecurityCode::WeakMaster));
    }
    Ok(())
}

/// Entropy floor: non-zero and at least [`MASTER_MIN_DISTINCT_BYTES`]
/// distinct byte values. A uniformly random 32-byte value fails this with
/// probability well below 10⁻⁶.
pub(crate) fn meets_entropy_floor(bytes: &[u8]) -> bool {
    if bytes.iter().all(|&b| b == 0) {
        return false;
    }
    let mut seen = [false; 256];
    let mut distinct = 0usize;
    for &b in bytes {
        if !seen[b as usize] {
            seen[b as usize] = true;
            distinct += 1;
        }
    }
    distinct >= MASTER_MIN_DISTINCT_BYTES
}

/// Object identifiers are 1..=256 bytes of `[A-Za-z0-9._:-]`.
pub fn validate_object_id(object_id: &str) -> Result<(), CodecError> {
    if object_id.is_empty() || object_id.len() > MAX_OBJECT_ID_BYTES {
        return Err(CodecError::validation("object_id"));
    }
    let ok = object_id
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.'));
    if !ok {
        return Err(CodecError::validation("object_id"));
    }
    Ok(())
}

/// Frame payload size must sit in `[MIN_FRAME_SIZE, MAX_FRAME_SIZE]`.
pub fn validate_frame_size(frame_size: usize) -> Result<(), CodecError> {
    if !(MIN_FRAME_SIZE..=MAX_FRAME_SIZE).contains(&frame_size) {
        return Err(CodecError::validation("frame_size"));
    }
    Ok(())
}

/// Frame indices are capped at [`MAX_FRAME_INDEX`]; exceeding the cap is a
/// policy violation, not a range error.
pub fn validate_frame_index(index: u32) -> Result<(), CodecError> {
    if index > MAX_FRAME_INDEX {
        return Err(CodecError::security(SecurityCode::FrameCapExceeded));
    }
    Ok(())
}

/// Reject paths carrying a `..` component or exceeding [`MAX_PATH_BYTES`].
///
/// The codec itself never opens files; this is exported for callers that
/// wire the codec to a filesystem.
pub fn validate_path(path: &Path) -> Result<(), CodecError> {
    if path.as_os_str().len() > MAX_PATH_BYTES {
        return Err(CodecError::validation("path"));
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(CodecError::security(SecurityCode::PathTraversal));
    }
    Ok(())
}

/// Constant-time equality for tag-like values. Length mismatch returns false
/// without inspecting content.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Overwrite a buffer with zeros through a write path the optimizer cannot
/// elide.
pub fn wipe(buf: &mut [u8]) {
    buf.zeroize();
}
