//! `ZL` compressed streams
//!
//! Compressed assets start with a 5-byte header: the tag `"ZL"` followed by
//! the decompressed size as a 24-bit little-endian integer. The zlib stream
//! follows immediately.

use byteorder::{ByteOrder, LittleEndian};
use flate2::read::ZlibDecoder;
use std::io::{self, Read};

/// Tag at the start of every compressed stream
pub const STREAM_TAG: [u8; 2] = *b"ZL";

/// Length of the header preceding the zlib data
pub const STREAM_HEADER_SIZE: usize = 5;

/// Check if data starts with a `ZL` header
pub fn is_compressed(data: &[u8]) -> bool {
    data.len() >= STREAM_HEADER_SIZE && data[..STREAM_TAG.len()] == STREAM_TAG
}

/// Split a `ZL` stream into its declared decompressed size and zlib payload
pub fn split_header(data: &[u8]) -> Option<(u32, &[u8])> {
    if !is_compressed(data) {
        return None;
    }

    let size = LittleEndian::read_u24(&data[STREAM_TAG.len()..STREAM_HEADER_SIZE]);
    Some((size, &data[STREAM_HEADER_SIZE..]))
}

/// Inflate a zlib payload, reserving `size_hint` bytes up front
pub fn inflate(payload: &[u8], size_hint: u32) -> io::Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(payload);
    let mut data = Vec::with_capacity(size_hint as usize);
    decoder.read_to_end(&mut data)?;
    Ok(data)
}

/// Build a `ZL` stream around `payload`
#[cfg(test)]
pub(crate) fn compress(payload: &[u8]) -> Vec<u8> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(payload).unwrap();

    let mut stream = STREAM_TAG.to_vec();
    stream.extend_from_slice(&(payload.len() as u32).to_le_bytes()[..3]);
    stream.extend(encoder.finish().unwrap());
    stream
}
