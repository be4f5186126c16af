//! AEAD core: primitive adapter, key hierarchy, associated data, and the
//! per-frame codec.
//!
//! # Key hierarchy
//!
//! ```text
//! Master secret (operator-held, 32 bytes)
//!        │
//!        ▼
//! HKDF-SHA256 → Object subkey (per object identifier)
//!        │
//!        ▼
//! AES-256-GCM → Frames (random nonce, index-bound AAD)
//! ```
//!
//! The master never appears inside any frame; subkeys exist only for the
//! duration of a session and are wiped on drop.

pub mod aad;
pub mod frame;
pub mod keyring;
mod primitives;

pub use aad::{frame_aad, AAD_LEN};
pub use frame::{decrypt_frame, encrypt_frame, Frame, FRAME_HEADER_LEN, MIN_FRAME_BYTES};
pub use keyring::{derive_subkey, generate_master, MasterKey, ObjectKey};
