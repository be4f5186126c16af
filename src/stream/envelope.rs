//! Length-prefixed outer framing.
//!
//! The envelope stream is `repeat( uint32_be(body_len) || frame_body )` with
//! no header and no trailer. Records can be appended and parsed in a single
//! pass, input may arrive in reads of any size, and known offsets permit
//! seeking straight to a frame boundary.

use crate::encryption::frame::{Frame, FRAME_HEADER_LEN, MIN_FRAME_BYTES};
use crate::error::{CodecError, FormatError};
use crate::validation;

/// Length-prefix size in bytes.
pub const LEN_PREFIX: usize = 4;

/// Encode one frame as an envelope record.
pub fn encode_record(frame: &Frame) -> Vec<u8> {
    let body_len = frame.serialized_len();
    let mut out = Vec::with_capacity(LEN_PREFIX + body_len);
    out.extend_from_slice(&(body_len as u32).to_be_bytes());
    out.extend_from_slice(&frame.to_bytes());
    out
}

/// Incremental envelope parser over a byte accumulator.
///
/// Feed it input blocks of any size; it yields frames as soon as complete
/// records are available and keeps the remainder buffered.
pub struct EnvelopeParser {
    acc: Vec<u8>,
    max_body: usize,
}

impl EnvelopeParser {
    /// `frame_size` bounds the accepted record length: a prospective body
    /// longer than one full frame (header plus `frame_size` ciphertext
    /// bytes) is malformed, not merely incomplete.
    pub fn new(frame_size: usize) -> Result<Self, CodecError> {
        validation::validate_frame_size(frame_size)?;
        Ok(EnvelopeParser {
            acc: Vec::new(),
            max_body: FRAME_HEADER_LEN + frame_size,
        })
    }

    /// Append an input block and drain every complete record.
    pub fn push(&mut self, input: &[u8]) -> Result<Vec<Frame>, CodecError> {
        self.acc.extend_from_slice(input);

        let mut frames = Vec::new();
        loop {
            if self.acc.len() < LEN_PREFIX {
                break;
            }
            let mut len_bytes = [0u8; LEN_PREFIX];
            len_bytes.copy_from_slice(&self.acc[..LEN_PREFIX]);
            let body_len = u32::from_be_bytes(len_bytes) as usize;

            if body_len < MIN_FRAME_BYTES || body_len > self.max_body {
                return Err(FormatError::MalformedEnvelope {
                    body_len: body_len as u32,
                }
                .into());
            }
            if self.acc.len() < LEN_PREFIX + body_len {
                break;
            }

            let frame = Frame::from_bytes(&self.acc[LEN_PREFIX..LEN_PREFIX + body_len])?;
            self.acc.drain(..LEN_PREFIX + body_len);
            frames.push(frame);
        }
        Ok(frames)
    }

    /// End of input: any buffered residue means the stream was cut
    /// mid-record.
    pub fn finish(self) -> Result<(), CodecError> {
        if !self.acc.is_empty() {
            return Err(FormatError::TruncatedEnvelope {
                residue: self.acc.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Bytes currently buffered awaiting a record boundary.
    pub fn pending(&self) -> usize {
        self.acc.len()
    }
}


// Bounded proof over the record-length acceptance window.
#[cfg(kani)]
mod kani_proofs {
    use super::*;

    #[kani::proof]
    #[kani::unwind(3)]
    fn verify_body_len_window() {
        let frame_size: usize = kani::any();
        kani::assume(
            (crate::validation::MIN_FRAME_SIZE..=crate::validation::MAX_FRAME_SIZE)
                .contains(&frame_size),
        );
        let body_len: usize = kani::any();

        let accepted = body_len >= MIN_FRAME_BYTES && body_len <= FRAME_HEADER_LEN + frame_size;
        if accepted {
            // An accepted body always contains at least one ciphertext byte
            // and never more than one full frame.
            assert!(body_len - FRAME_HEADER_LEN >= 1);
            assert!(body_len - FRAME_HEADER_LEN <= frame_size);
        }
    }
}
