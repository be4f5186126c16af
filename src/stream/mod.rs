//! Streaming layer: framer transducers, the length-prefixed envelope, text
//! transcoding, and the one-call pipeline surface.
//!
//! The layer is split in two: the byte layer (envelope records, text lines)
//! and the record layer (frame values). Raw bytes never carry frame values
//! alongside them; the envelope parser is the only crossing point.

pub mod envelope;
pub mod framer;
pub mod pipeline;
pub mod transcode;

pub use envelope::{encode_record, EnvelopeParser, LEN_PREFIX};
pub use framer::{OpenFramer, SealFramer};
pub use pipeline::{
    open_buffer, open_stream, seal_buffer, seal_stream, CodecConfig, OpenReport, RejectedFrame,
    StreamStats,
};
pub use transcode::{Encoding, LineDecoder};
