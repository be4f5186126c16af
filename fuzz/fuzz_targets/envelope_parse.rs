#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sealframe::EnvelopeParser;

#[derive(Arbitrary, Debug)]
struct EnvelopeInput {
    stream: Vec<u8>,
    chunk_size: u8,
    frame_size: u32,
}

fn parse_chunked(stream: &[u8], chunk_size: usize, frame_size: usize) -> Result<usize, ()> {
    let mut parser = EnvelopeParser::new(frame_size).expect("frame size is in range");
    let mut frames = 0usize;
    for part in stream.chunks(chunk_size) {
        frames += parser.push(part).map_err(|_| ())?.len();
    }
    parser.finish().map_err(|_| ())?;
    Ok(frames)
}

fuzz_target!(|input: EnvelopeInput| {
    // Attack: arbitrary byte streams fed to the incremental envelope parser
    // at arbitrary read granularities.
    // Validates: no panics, no unbounded allocation from hostile length
    // prefixes, and chunking-independence of the outcome.

    let EnvelopeInput {
        stream,
        chunk_size,
        frame_size,
    } = input;

    let frame_size = 1024 + (frame_size as usize % (10 * 1024 * 1024 - 1023));
    let chunk_size = chunk_size.max(1) as usize;

    let chunked = parse_chunked(&stream, chunk_size, frame_size);
    let whole = parse_chunked(&stream, stream.len().max(1), frame_size);

    // Fuzz property: the verdict must not depend on read granularity.
    assert_eq!(
        chunked, whole,
        "parse outcome must not depend on read granularity"
    );
});
