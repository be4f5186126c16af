//! Error taxonomy for the codec.
//!
//! Six categories cover every failure the crate can produce. Validation and
//! Security errors are raised before any key material is touched. Auth and
//! Order errors abort a session; no plaintext produced after the failing
//! frame is ever released.

use std::fmt;

use thiserror::Error;

/// Policy violation codes carried by [`CodecError::Security`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityCode {
    /// Master secret failed the entropy floor (all-zero, or fewer than 16
    /// distinct byte values).
    WeakMaster,
    /// A session attempted to produce or accept a frame index beyond the
    /// safety ceiling.
    FrameCapExceeded,
    /// A path contained a `..` component or exceeded the length limit.
    PathTraversal,
}

impl fmt::Display for SecurityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SecurityCode::WeakMaster => "weak master secret",
            SecurityCode::FrameCapExceeded => "frame cap exceeded",
            SecurityCode::PathTraversal => "path traversal",
        };
        f.write_str(s)
    }
}

/// Serialized bytes did not match the frame or envelope layout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("frame body too short: {len} bytes")]
    ShortFrame { len: usize },

    #[error("envelope record length {body_len} outside valid range")]
    MalformedEnvelope { body_len: u32 },

    #[error("envelope ended mid-record with {residue} bytes pending")]
    TruncatedEnvelope { residue: usize },

    #[error("input bytes present but no complete frame observed")]
    TruncatedStream,

    #[error("undecodable {encoding} line")]
    BadLine { encoding: &'static str },
}

/// Unified error type for all codec operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A caller-supplied value failed a structural or range check.
    #[error("invalid {field}")]
    Validation { field: &'static str },

    /// A security policy was violated.
    #[error("security violation: {code}")]
    Security { code: SecurityCode },

    /// AEAD tag verification failed for the frame at `index`.
    #[error("authentication failed for frame {index}")]
    Auth { index: u32 },

    /// Serialized bytes did not match the frame or envelope layout.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Frame indices were not monotone starting at zero.
    #[error("frame {found} out of order, expected {expected}")]
    Order { expected: u32, found: u32 },

    /// I/O error from the source or sink, propagated unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CodecError {
    pub(crate) fn validation(field: &'static str) -> Self {
        CodecError::Validation { field }
    }

    pub(crate) fn security(code: SecurityCode) -> Self {
        CodecError::Security { code }
    }
}
