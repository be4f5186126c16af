//! Streaming framer: split a cleartext stream into frames and reassemble a
//! frame stream back into cleartext.
//!
//! Both directions are explicit transducers: `push(...)` yields zero or more
//! outputs, `finish(...)` flushes the tail. Each framer owns its subkey,
//! index counter, and buffers; nothing is shared between sessions, so
//! independent sessions may run on independent threads.

use zeroize::Zeroize;

use crate::encryption::frame::{decrypt_frame, encrypt_frame, Frame};
use crate::encryption::keyring::{derive_subkey, MasterKey, ObjectKey};
use crate::error::{CodecError, FormatError, SecurityCode};
use crate::validation::{self, MAX_FRAME_INDEX};

/// Splits cleartext into fixed-size frames, sealing each one.
///
/// Every frame except the last carries exactly `frame_size` plaintext bytes;
/// the last carries whatever remains (at least one byte). Empty input
/// produces no frames at all.
pub struct SealFramer {
    subkey: ObjectKey,
    object_id: String,
    frame_size: usize,
    buffer: Vec<u8>,
    next_index: u32,
    bytes_in: u64,
}

impl SealFramer {
    pub fn new(
        master: &MasterKey,
        object_id: &str,
        frame_size: usize,
    ) -> Result<Self, CodecError> {
        validation::validate_frame_size(frame_size)?;
        let subkey = derive_subkey(master, object_id)?;
        Ok(SealFramer {
            subkey,
            object_id: object_id.to_string(),
            frame_size,
            buffer: Vec::new(),
            next_index: 0,
            bytes_in: 0,
        })
    }

    /// Feed cleartext; yields every full frame that became available.
    pub fn push(&mut self, input: &[u8]) -> Result<Vec<Frame>, CodecError> {
        self.buffer.extend_from_slice(input);
        self.bytes_in += input.len() as u64;

        let mut frames = Vec::new();
        while self.buffer.len() >= self.frame_size {
            let rest = self.buffer.split_off(self.frame_size);
            let mut chunk = std::mem::replace(&mut self.buffer, rest);
            let frame = self.seal_chunk(&chunk);
            chunk.zeroize();
            frames.push(frame?);
        }
        Ok(frames)
    }

    /// Flush the tail: at most one short frame. Consumes the framer; the
    /// subkey and any buffered plaintext are wiped.
    pub fn finish(mut self) -> Result<Vec<Frame>, CodecError> {
        if self.buffer.is_empty() {
            return Ok(Vec::new());
        }
        let mut tail = std::mem::take(&mut self.buffer);
        let frame = self.seal_chunk(&tail);
        tail.zeroize();
        Ok(vec![frame?])
    }

    fn seal_chunk(&mut self, chunk: &[u8]) -> Result<Frame, CodecError> {
        if self.next_index > MAX_FRAME_INDEX {
            return Err(CodecError::security(SecurityCode::FrameCapExceeded));
        }
        let frame = encrypt_frame(&self.subkey, &self.object_id, self.next_index, chunk)?;
        self.next_index += 1;
        Ok(frame)
    }

    /// Cleartext bytes consumed so far.
    pub fn bytes_consumed(&self) -> u64 {
        self.bytes_in
    }

    /// Frames sealed so far.
    pub fn frames_sealed(&self) -> u32 {
        self.next_index
    }
}

impl Drop for SealFramer {
    fn drop(&mut self) {
        // Abandoned sessions must not leave plaintext in freed memory; the
        // subkey zeroizes itself.
        self.buffer.zeroize();
    }
}

/// Reassembles an in-order frame stream into cleartext.
///
/// Index monotonicity is enforced here as a second line of defense: even if
/// the envelope layer were bypassed, a reordered or replayed frame is
/// rejected before (or regardless of) tag verification.
pub struct OpenFramer {
    subkey: ObjectKey,
    object_id: String,
    next_index: u32,
    frames_seen: u64,
}

impl OpenFramer {
    pub fn new(master: &MasterKey, object_id: &str) -> Result<Self, CodecError> {
        let subkey = derive_subkey(master, object_id)?;
        Ok(OpenFramer {
            subkey,
            object_id: object_id.to_string(),
            next_index: 0,
            frames_seen: 0,
        })
    }

    /// Decrypt the next frame, which must carry exactly the expected index.
    ///
    /// The expected index advances even when tag verification fails, so a
    /// permissive caller can record the failure and continue with the rest
    /// of the stream.
    pub fn push_frame(&mut self, frame: &Frame) -> Result<Vec<u8>, CodecError> {
        if frame.index != self.next_index {
            return Err(CodecError::Order {
                expected: self.next_index,
                found: frame.index,
            });
        }
        validation::validate_frame_index(frame.index)?;

        self.next_index += 1;
        self.frames_seen += 1;

        decrypt_frame(&self.subkey, &self.object_id, frame)
    }

    /// Close the session. `input_bytes` is the raw byte count the caller fed
    /// into the layer above; bytes without a single complete frame mean the
    /// stream was cut before the first record boundary.
    pub fn finish(self, input_bytes: u64) -> Result<(), CodecError> {
        if self.frames_seen == 0 && input_bytes > 0 {
            return Err(FormatError::TruncatedStream.into());
        }
        Ok(())
    }

    /// Frames accepted so far.
    pub fn frames_opened(&self) -> u64 {
        self.frames_seen
    }
}
