//! Thin adapter over the AES-256-GCM primitive and the system CSPRNG.
//!
//! Everything here is a direct pass-through to `ring`; no framing, key
//! derivation, or policy lives at this layer. Tag verification fails closed:
//! `aead_open` never releases partial plaintext.

use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};

use crate::error::CodecError;

/// AEAD key length (AES-256).
pub(crate) const KEY_LEN: usize = 32;

/// AEAD nonce length (96-bit, per the GCM standard).
pub(crate) const NONCE_LEN: usize = 12;

/// AEAD tag length (128-bit).
pub(crate) const TAG_LEN: usize = 16;

/// Tag verification failed. Carries no context; the frame layer attaches the
/// failing frame index.
#[derive(Debug)]
pub(crate) struct OpenFailure;

/// Encrypt `plaintext` under `key`/`nonce`, binding `aad` into the tag.
///
/// Returns the ciphertext (same length as the plaintext) and the 16-byte tag
/// separately; the wire layout keeps them in distinct fields.
pub(crate) fn aead_seal(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; TAG_LEN]), CodecError> {
    let unbound =
        UnboundKey::new(&AES_256_GCM, key).map_err(|_| CodecError::validation("subkey"))?;
    let sealing = LessSafeKey::new(unbound);

    let mut in_out = plaintext.to_vec();
    let tag = sealing
        .seal_in_place_separate_tag(
            Nonce::assume_unique_for_key(*nonce),
            Aad::from(aad),
            &mut in_out,
        )
        .map_err(|_| CodecError::validation("plaintext"))?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(tag.as_ref());
    Ok((in_out, tag_bytes))
}

/// Decrypt and verify one ciphertext/tag pair. Fails atomically on any
/// mismatch of key, nonce, AAD, ciphertext, or tag.
pub(crate) fn aead_open(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
) -> Result<Vec<u8>, OpenFailure> {
    let unbound = UnboundKey::new(&AES_256_GCM, key).map_err(|_| OpenFailure)?;
    let opening = LessSafeKey::new(unbound);

    // ring wants ciphertext and tag contiguous; verification happens before
    // the plaintext slice is returned.
    let mut in_out = Vec::with_capacity(ciphertext.len() + TAG_LEN);
    in_out.extend_from_slice(ciphertext);
    in_out.extend_from_slice(tag);

    let plaintext_len = opening
        .open_in_place(
            Nonce::assume_unique_for_key(*nonce),
            Aad::from(aad),
            &mut in_out,
        )
        .map_err(|_| OpenFailure)?
        .len();

    in_out.truncate(plaintext_len);
    Ok(in_out)
}

/// Fill `buf` from the OS CSPRNG.
pub(crate) fn random_bytes(buf: &mut [u8]) -> Result<(), CodecError> {
    SystemRandom::new().fill(buf).map_err(|_| {
        CodecError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            "system rng unavailable",
        ))
    })
}
