//! Line-oriented text transcoding of envelope records.
//!
//! One record per line, `encode(record) || '\n'`, no markers. Lines decode
//! independently; trailing empty lines are ignored. Alphabets: lowercase hex
//! pairs, and RFC 4648 base64 with `+/=` and no internal whitespace.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{CodecError, FormatError};

/// Wire encoding of the envelope stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Raw envelope bytes, no line structure.
    #[default]
    Binary,
    /// Lowercase hex, one record per line.
    Hex,
    /// RFC 4648 base64, one record per line.
    Base64,
}

impl Encoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Binary => "binary",
            Encoding::Hex => "hex",
            Encoding::Base64 => "base64",
        }
    }
}

impl std::str::FromStr for Encoding {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" => Ok(Encoding::Binary),
            "hex" => Ok(Encoding::Hex),
            "base64" => Ok(Encoding::Base64),
            _ => Err(CodecError::validation("encoding")),
        }
    }
}

/// Encode one record as a text line (including the terminating newline).
/// Only meaningful for the text encodings; binary streams carry records
/// back to back.
pub fn encode_line(encoding: Encoding, record: &[u8]) -> Vec<u8> {
    let mut line = match encoding {
        Encoding::Binary => return record.to_vec(),
        Encoding::Hex => hex::encode(record).into_bytes(),
        Encoding::Base64 => BASE64.encode(record).into_bytes(),
    };
    line.push(b'\n');
    line
}

fn decode_line(encoding: Encoding, line: &[u8]) -> Result<Vec<u8>, CodecError> {
    match encoding {
        Encoding::Binary => Ok(line.to_vec()),
        Encoding::Hex => {
            hex::decode(line).map_err(|_| FormatError::BadLine { encoding: "hex" }.into())
        }
        Encoding::Base64 => BASE64.decode(line).map_err(|_| {
            FormatError::BadLine {
                encoding: "base64",
            }
            .into()
        }),
    }
}

/// Incremental line decoder for the text encodings.
///
/// Buffers partial lines across input blocks; each completed line is decoded
/// independently into raw record bytes.
pub struct LineDecoder {
    encoding: Encoding,
    pending: Vec<u8>,
}

impl LineDecoder {
    pub fn new(encoding: Encoding) -> Self {
        LineDecoder {
            encoding,
            pending: Vec::new(),
        }
    }

    /// Append input and decode every completed line. Empty lines are
    /// skipped.
    pub fn push(&mut self, input: &[u8]) -> Result<Vec<Vec<u8>>, CodecError> {
        self.pending.extend_from_slice(input);

        let mut records = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=pos).collect();
            line.pop(); // the newline itself
            if !line.is_empty() {
                records.push(decode_line(self.encoding, &line)?);
            }
        }
        Ok(records)
    }

    /// Decode a final unterminated line, if any.
    pub fn finish(self) -> Result<Option<Vec<u8>>, CodecError> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        decode_line(self.encoding, &self.pending).map(Some)
    }
}
