//! One-call seal/open surfaces over the framer, envelope, and transcoder.
//!
//! These drive `std::io::Read`/`Write` endpoints in fixed-size blocks and
//! report `{frames, bytes}` per call. Each call is one independent session:
//! the subkey is derived on entry, lives only inside the framer, and is
//! wiped when the call returns. The master is borrowed and never retained.

use std::io::{Read, Write};

use zeroize::Zeroize;

use crate::encryption::frame::Frame;
use crate::encryption::keyring::MasterKey;
use crate::error::CodecError;
use crate::stream::envelope::{encode_record, EnvelopeParser};
use crate::stream::framer::{OpenFramer, SealFramer};
use crate::stream::transcode::{encode_line, Encoding, LineDecoder};
use crate::validation::{self, DEFAULT_FRAME_SIZE};

/// Block size for driving `Read` sources.
const READ_BLOCK: usize = 64 * 1024;

/// Session configuration, passed explicitly into every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Target plaintext bytes per frame. Bounded to
    /// `[MIN_FRAME_SIZE, MAX_FRAME_SIZE]`.
    pub frame_size: usize,
    /// Wire encoding of the envelope stream.
    pub encoding: Encoding,
    /// When set, tag failures are recorded per frame and the stream
    /// continues; when clear, the first failure aborts.
    pub permissive_decrypt: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            frame_size: DEFAULT_FRAME_SIZE,
            encoding: Encoding::Binary,
            permissive_decrypt: false,
        }
    }
}

impl CodecConfig {
    pub fn validate(&self) -> Result<(), CodecError> {
        validation::validate_frame_size(self.frame_size)
    }
}

/// Counters returned by every streaming call. `bytes` counts plaintext.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    pub frames: u64,
    pub bytes: u64,
}

/// A frame whose tag failed verification during a permissive open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectedFrame {
    pub index: u32,
}

/// Result of [`open_stream`]: counters plus any frames rejected while
/// running permissively. Strict sessions always return an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenReport {
    pub stats: StreamStats,
    pub rejected: Vec<RejectedFrame>,
}

/// Seal a cleartext source into an envelope stream.
pub fn seal_stream<R: Read, W: Write>(
    mut source: R,
    mut sink: W,
    master: &MasterKey,
    object_id: &str,
    config: &CodecConfig,
) -> Result<StreamStats, CodecError> {
    config.validate()?;
    let mut framer = SealFramer::new(master, object_id, config.frame_size)?;
    let mut stats = StreamStats::default();

    let mut block = vec![0u8; READ_BLOCK];
    loop {
        let n = source.read(&mut block)?;
        if n == 0 {
            break;
        }
        for frame in framer.push(&block[..n])? {
            write_frame(&mut sink, &frame, config.encoding)?;
            stats.frames += 1;
        }
    }
    stats.bytes = framer.bytes_consumed();
    for frame in framer.finish()? {
        write_frame(&mut sink, &frame, config.encoding)?;
        stats.frames += 1;
    }
    block.zeroize();

    sink.flush()?;
    Ok(stats)
}

/// Open an envelope stream back into cleartext.
///
/// Strict mode (the default) aborts on the first failing frame and the sink
/// must be considered tainted up to that point. Permissive mode skips
/// failing frames, keeps their indices in the report, and still enforces
/// ordering and envelope shape.
pub fn open_stream<R: Read, W: Write>(
    mut source: R,
    mut sink: W,
    master: &MasterKey,
    object_id: &str,
    config: &CodecConfig,
) -> Result<OpenReport, CodecError> {
    config.validate()?;
    let mut framer = OpenFramer::new(master, object_id)?;
    let mut parser = EnvelopeParser::new(config.frame_size)?;
    let mut decoder = match config.encoding {
        Encoding::Binary => None,
        text => Some(LineDecoder::new(text)),
    };

    let mut report = OpenReport::default();
    let mut input_bytes: u64 = 0;

    let mut block = vec![0u8; READ_BLOCK];
    loop {
        let n = source.read(&mut block)?;
        if n == 0 {
            break;
        }
        input_bytes += n as u64;

        let frames = match decoder.as_mut() {
            None => parser.push(&block[..n])?,
            Some(decoder) => {
                let mut frames = Vec::new();
                for record in decoder.push(&block[..n])? {
                    frames.extend(parser.push(&record)?);
                }
                frames
            }
        };
        for frame in &frames {
            open_one(&mut framer, frame, &mut sink, config, &mut report)?;
        }
    }

    if let Some(decoder) = decoder {
        if let Some(record) = decoder.finish()? {
            for frame in parser.push(&record)? {
                open_one(&mut framer, &frame, &mut sink, config, &mut report)?;
            }
        }
    }
    parser.finish()?;
    framer.finish(input_bytes)?;

    sink.flush()?;
    Ok(report)
}

fn open_one<W: Write>(
    framer: &mut OpenFramer,
    frame: &Frame,
    sink: &mut W,
    config: &CodecConfig,
    report: &mut OpenReport,
) -> Result<(), CodecError> {
    match framer.push_frame(frame) {
        Ok(mut plaintext) => {
            sink.write_all(&plaintext)?;
            report.stats.frames += 1;
            report.stats.bytes += plaintext.len() as u64;
            plaintext.zeroize();
            Ok(())
        }
        Err(CodecError::Auth { index }) if config.permissive_decrypt => {
            report.stats.frames += 1;
            report.rejected.push(RejectedFrame { index });
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn write_frame<W: Write>(
    sink: &mut W,
    frame: &Frame,
    encoding: Encoding,
) -> Result<(), CodecError> {
    let record = encode_record(frame);
    match encoding {
        Encoding::Binary => sink.write_all(&record)?,
        text => sink.write_all(&encode_line(text, &record))?,
    }
    Ok(())
}

/// One-shot seal: the whole object in memory, out as serialized frame
/// bodies (no envelope prefixes).
pub fn seal_buffer(
    data: &[u8],
    master: &MasterKey,
    object_id: &str,
    config: &CodecConfig,
) -> Result<Vec<Vec<u8>>, CodecError> {
    config.validate()?;
    let mut framer = SealFramer::new(master, object_id, config.frame_size)?;
    let mut frames = framer.push(data)?;
    frames.extend(framer.finish()?);
    Ok(frames.iter().map(Frame::to_bytes).collect())
}

/// One-shot open over serialized frame bodies, in order.
pub fn open_buffer<I>(
    frames: I,
    master: &MasterKey,
    object_id: &str,
) -> Result<Vec<u8>, CodecError>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut framer = OpenFramer::new(master, object_id)?;
    let mut out = Vec::new();
    let mut input_bytes: u64 = 0;

    for body in frames {
        let body = body.as_ref();
        input_bytes += body.len() as u64;
        let frame = Frame::from_bytes(body)?;
        out.extend(framer.push_frame(&frame)?);
    }
    framer.finish(input_bytes)?;
    Ok(out)
}
