//! Master-key lifecycle and per-object subkey derivation.
//!
//! Derivation is RFC 5869 HKDF-SHA256 with the object identifier hashed into
//! the salt:
//!
//! ```text
//! salt = SHA-256(object_id)
//! prk  = HKDF-Extract(salt, master)
//! okm  = HKDF-Expand(prk, INFO)        // one round; 32 bytes
//! ```
//!
//! The same master therefore yields an independent subkey per object, and a
//! frame sealed under one object identifier can never be opened under
//! another. Key containers are zeroized on drop; the master is never stored
//! inside any frame or envelope.

use hkdf::Hkdf;
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encryption::primitives;
use crate::error::CodecError;
use crate::validation::{self, MASTER_LEN};

/// Fixed HKDF info string. Changing it changes every derived subkey; kept
/// byte-for-byte for compatibility with existing ciphertext.
pub(crate) const SUBKEY_INFO: &[u8] = b"@kitsuneislife/keyring-vcm-v1";

/// Domain prefix for master fingerprints.
const FINGERPRINT_PREFIX: &[u8] = b"sealframe/fingerprint-v1";

/// Operator-held 32-byte root secret. Wiped on drop.
///
/// `Clone` is intentionally not derived; key material should not proliferate
/// in memory.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct MasterKey([u8; MASTER_LEN]);

impl MasterKey {
    /// Draw a fresh master from the OS CSPRNG, re-drawing on the (vanishingly
    /// rare) entropy-floor false positive.
    pub fn generate() -> Result<Self, CodecError> {
        let mut bytes = [0u8; MASTER_LEN];
        loop {
            primitives::random_bytes(&mut bytes)?;
            if validation::meets_entropy_floor(&bytes) {
                return Ok(MasterKey(bytes));
            }
        }
    }

    /// Adopt caller-supplied key material after validating length and the
    /// entropy floor.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        validation::validate_master_bytes(bytes)?;
        let mut key = [0u8; MASTER_LEN];
        key.copy_from_slice(bytes);
        Ok(MasterKey(key))
    }

    /// Parse a lowercase-hex export. Rejects non-hex characters, odd length,
    /// wrong byte length, and weak values.
    pub fn import_hex(encoded: &str) -> Result<Self, CodecError> {
        let bytes = hex::decode(encoded).map_err(|_| CodecError::validation("master_hex"))?;
        let key = Self::from_bytes(&bytes);
        // Transient decode buffer held raw key material.
        let mut bytes = bytes;
        bytes.zeroize();
        key
    }

    /// Serialize as lowercase hex for operator storage.
    pub fn export_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; MASTER_LEN] {
        &self.0
    }

    /// Collision-resistant identifier for this master that reveals nothing
    /// about the key bytes. Safe to log and compare.
    pub fn fingerprint(&self) -> [u8; 16] {
        let mut hasher = Sha256::new();
        hasher.update(FINGERPRINT_PREFIX);
        hasher.update(self.0);
        let digest = hasher.finalize();
        let mut out = [0u8; 16];
        out.copy_from_slice(&digest[..16]);
        out
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MasterKey({})", hex::encode(self.fingerprint()))
    }
}

/// Per-object 32-byte AEAD key. Lives only for the duration of one seal or
/// open session; wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ObjectKey([u8; MASTER_LEN]);

impl ObjectKey {
    pub fn as_bytes(&self) -> &[u8; MASTER_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ObjectKey(..)")
    }
}

/// Draw a fresh master secret. Convenience alias for [`MasterKey::generate`].
pub fn generate_master() -> Result<MasterKey, CodecError> {
    MasterKey::generate()
}

/// Derive the subkey for `object_id` from `master`.
///
/// Deterministic: the same `(master, object_id)` pair always yields the same
/// subkey, so decryption needs no key transport beyond the master itself.
pub fn derive_subkey(master: &MasterKey, object_id: &str) -> Result<ObjectKey, CodecError> {
    validation::validate_object_id(object_id)?;

    let salt: [u8; 32] = Sha256::digest(object_id.as_bytes()).into();
    let hkdf = Hkdf::<Sha256>::new(Some(&salt), master.as_bytes());

    let mut okm = [0u8; MASTER_LEN];
    hkdf.expand(SUBKEY_INFO, &mut okm)
        .map_err(|_| CodecError::validation("subkey"))?;

    Ok(ObjectKey(okm))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SecurityCode;

    fn test_master() -> MasterKey {
        let bytes: Vec<u8> = (0u8..32).collect();
        MasterKey::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn generate_meets_entropy_floor() {
        let master = MasterKey::generate().unwrap();
        assert!(validation::meets_entropy_floor(master.as_bytes()));
    }

    #[test]
    fn derivation_is_deterministic() {
        let master = test_master();
        let a = derive_subkey(&master, "video-1").unwrap();
        let b = derive_subkey(&master, "video-1").unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn object_ids_are_domain_separated() {
        let master = test_master();
        let a = derive_subkey(&master, "video-1").unwrap();
        let b = derive_subkey(&master, "video-2").unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn different_masters_produce_different_subkeys() {
        let m1 = test_master();
        let m2 = MasterKey::from_bytes(&(32u8..64).collect::<Vec<u8>>()).unwrap();
        let a = derive_subkey(&m1, "video-1").unwrap();
        let b = derive_subkey(&m2, "video-1").unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn invalid_object_id_is_rejected_before_derivation() {
        let master = test_master();
        assert!(derive_subkey(&master, "").is_err());
        assert!(derive_subkey(&master, "no spaces").is_err());
    }

    #[test]
    fn hex_roundtrip() {
        let master = test_master();
        let encoded = master.export_hex();
        assert_eq!(encoded.len(), 64);
        assert!(encoded.bytes().all(|b| b.is_ascii_hexdigit()));

        let imported = MasterKey::import_hex(&encoded).unwrap();
        assert_eq!(imported.as_bytes(), master.as_bytes());
    }

    #[test]
    fn import_rejects_garbage() {
        // Non-hex character
        assert!(MasterKey::import_hex(&"zz".repeat(32)).is_err());
        // Odd length
        assert!(MasterKey::import_hex(&"a".repeat(63)).is_err());
        // Wrong byte length
        assert!(MasterKey::import_hex(&"ab".repeat(16)).is_err());
    }

    #[test]
    fn import_rejects_weak_master() {
        let result = MasterKey::import_hex(&"00".repeat(32));
        assert!(matches!(
            result,
            Err(CodecError::Security {
                code: SecurityCode::WeakMaster
            })
        ));
    }

    #[test]
    fn fingerprint_is_stable_and_key_sensitive() {
        let m1 = test_master();
        let m2 = MasterKey::from_bytes(&(32u8..64).collect::<Vec<u8>>()).unwrap();
        assert_eq!(m1.fingerprint(), m1.fingerprint());
        assert_ne!(m1.fingerprint(), m2.fingerprint());
    }

    #[test]
    fn debug_output_redacts_key_bytes() {
        let master = test_master();
        let rendered = format!("{master:?}");
        assert!(!rendered.contains(&master.export_hex()));
    }
}
