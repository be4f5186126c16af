//! # sealframe
//!
//! Chunked authenticated encryption for arbitrarily large binary objects
//! (videos, blobs, archives). A cleartext stream becomes a sequence of
//! self-describing AES-256-GCM frames; each frame is independently
//! authenticated and bound to its object identifier and position, so
//! reordering, cross-object splicing, and replay all fail tag verification.
//!
//! ## Security Properties
//!
//! - **AES-256-GCM. Not configurable by design.** Authenticated encryption
//!   via the `ring` library
//! - **HKDF-SHA256** per-object subkeys derived from one operator-held
//!   master secret (RFC 5869)
//! - **Index-bound AAD**: every frame authenticates `(object_id, index)`;
//!   a moved or spliced frame cannot verify
//! - **Random 96-bit nonces** per frame, with a hard cap on frames per
//!   object
//! - **Memory safety**: `zeroize` on drop for all key material and
//!   plaintext buffers
//!
//! ## Quick Start
//!
//! ```rust
//! use sealframe::{open_stream, seal_stream, CodecConfig, MasterKey};
//! use std::io::Cursor;
//!
//! let master = MasterKey::generate().unwrap();
//! let config = CodecConfig::default();
//!
//! let mut sealed = Vec::new();
//! seal_stream(Cursor::new(b"movie night".to_vec()), &mut sealed,
//!             &master, "video-1", &config).unwrap();
//!
//! let mut opened = Vec::new();
//! open_stream(Cursor::new(&sealed), &mut opened,
//!             &master, "video-1", &config).unwrap();
//! assert_eq!(opened, b"movie night");
//! ```
//!
//! ## Wire Format
//!
//! Frame body (`32 + N` bytes): 4-byte big-endian index, 12-byte nonce,
//! 16-byte tag, `N` ciphertext bytes. The envelope stream is
//! `uint32_be(body_len) || body`, repeated, with no header or trailer, so
//! it can be appended to and parsed incrementally. Hex and base64 line
//! encodings are available for text transports.

// Error taxonomy
pub mod error;
pub use error::{CodecError, FormatError, SecurityCode};

// Input validation and byte hygiene
pub mod validation;
pub use validation::{
    constant_time_eq, wipe, DEFAULT_FRAME_SIZE, MAX_FRAME_INDEX, MAX_FRAME_SIZE,
    MAX_OBJECT_ID_BYTES, MIN_FRAME_SIZE,
};

// AEAD core: keys, AAD, per-frame codec
pub mod encryption;
pub use encryption::{
    decrypt_frame, derive_subkey, encrypt_frame, frame_aad, generate_master, Frame, MasterKey,
    ObjectKey,
};

// Streaming layer: framers, envelope, transcoding, pipeline
pub mod stream;
pub use stream::{
    encode_record, open_buffer, open_stream, seal_buffer, seal_stream, CodecConfig, Encoding,
    EnvelopeParser, OpenFramer, OpenReport, RejectedFrame, SealFramer, StreamStats,
};
