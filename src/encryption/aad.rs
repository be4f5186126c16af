//! Deterministic per-frame associated data.

use sha2::{Digest, Sha256};

/// Associated data length (one SHA-256 digest).
pub const AAD_LEN: usize = 32;

/// `AAD = SHA-256(object_id_utf8 || uint32_be(index))`.
///
/// Reconstructable from public values alone; no secret material enters the
/// digest. Binding both fields into every tag defeats reordering (a moved
/// frame authenticates under the wrong index) and cross-object substitution
/// (a spliced frame authenticates under the wrong identifier).
pub fn frame_aad(object_id: &str, index: u32) -> [u8; AAD_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(object_id.as_bytes());
    hasher.update(index.to_be_bytes());
    let digest = hasher.finalize();

    let mut out = [0u8; AAD_LEN];
    out.copy_from_slice(&digest[..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aad_is_deterministic() {
        assert_eq!(frame_aad("video-1", 3), frame_aad("video-1", 3));
    }

    #[test]
    fn aad_depends_on_index() {
        assert_ne!(frame_aad("video-1", 0), frame_aad("video-1", 1));
    }

    #[test]
    fn aad_depends_on_object_id() {
        assert_ne!(frame_aad("video-1", 0), frame_aad("video-2", 0));
    }

    #[test]
    fn index_is_bound_big_endian() {
        // "a" || 0x00000100 must differ from "a\x00" || 0x00000001-style
        // ambiguity; the id alphabet excludes control bytes, but the digest
        // must still separate these inputs.
        assert_ne!(frame_aad("a", 0x0100), frame_aad("a", 0x0001));
    }
}
