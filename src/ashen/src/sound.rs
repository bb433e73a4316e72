//! Sound bank containers
//!
//! # Format
//! - `0x34`: u32 LE entry count
//! - `0x38`: `count` entries of 12 bytes: offset (u32 LE), size (u32 LE),
//!   padding (4 bytes, ignored)
//!
//! Each entry points at an absolute range of the container holding a `ZL`
//! stream: `"ZL"`, the decompressed size as a u24 LE, then zlib data.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Seek, SeekFrom};

use crate::zlib;

/// Offset of the entry count
pub const COUNT_OFFSET: u64 = 0x34;

/// Size of one table entry
pub const ENTRY_SIZE: usize = 12;

/// Errors that can occur while reading a sound bank
#[derive(Debug, thiserror::Error)]
pub enum SoundError {
    #[error("Container too short: need {needed} bytes, got {actual}")]
    Truncated { needed: u64, actual: usize },

    #[error("Entry at 0x{offset:X} with size {size} exceeds container of {len} bytes")]
    OutOfBounds { offset: u32, size: u32, len: usize },

    #[error("Entry at 0x{offset:X} has tag {found:02X?}, expected \"ZL\"")]
    BadTag { offset: u32, found: Vec<u8> },

    #[error("Failed to inflate entry at 0x{offset:X}: {source}")]
    Inflate {
        offset: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("Entry at 0x{offset:X} inflated to {actual} bytes, header says {expected}")]
    SizeMismatch {
        offset: u32,
        expected: u32,
        actual: usize,
    },
}

/// One row of the sound table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoundEntry {
    pub offset: u32,
    pub size: u32,
}

impl SoundEntry {
    /// Output file name for this entry, `<offset as 3+ hex digits>.dat`
    pub fn file_name(&self) -> String {
        format!("{:03X}.dat", self.offset)
    }
}

/// The table of streams in a sound bank
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoundTable {
    entries: Vec<SoundEntry>,
}

impl SoundTable {
    pub fn parse(container: &[u8]) -> Result<Self, SoundError> {
        let truncated = |needed: u64| SoundError::Truncated {
            needed,
            actual: container.len(),
        };

        let mut cursor = Cursor::new(container);
        cursor
            .seek(SeekFrom::Start(COUNT_OFFSET))
            .map_err(|_| truncated(COUNT_OFFSET + 4))?;
        let count = cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| truncated(COUNT_OFFSET + 4))?;

        let table_end = COUNT_OFFSET + 4 + u64::from(count) * ENTRY_SIZE as u64;
        if table_end > container.len() as u64 {
            return Err(truncated(table_end));
        }

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let offset = cursor
                .read_u32::<LittleEndian>()
                .map_err(|_| truncated(table_end))?;
            let size = cursor
                .read_u32::<LittleEndian>()
                .map_err(|_| truncated(table_end))?;
            cursor
                .seek(SeekFrom::Current(4))
                .map_err(|_| truncated(table_end))?;

            entries.push(SoundEntry { offset, size });
        }

        Ok(SoundTable { entries })
    }

    pub fn entries(&self) -> &[SoundEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decompress the stream an entry points at
    pub fn inflate(container: &[u8], entry: &SoundEntry) -> Result<Vec<u8>, SoundError> {
        let start = entry.offset as usize;
        let end = start.checked_add(entry.size as usize);
        let stream = end
            .and_then(|end| container.get(start..end))
            .ok_or(SoundError::OutOfBounds {
                offset: entry.offset,
                size: entry.size,
                len: container.len(),
            })?;

        let (expected, payload) =
            zlib::split_header(stream).ok_or_else(|| SoundError::BadTag {
                offset: entry.offset,
                found: stream.iter().take(2).copied().collect(),
            })?;

        let data = zlib::inflate(payload, expected).map_err(|source| SoundError::Inflate {
            offset: entry.offset,
            source,
        })?;

        if data.len() != expected as usize {
            return Err(SoundError::SizeMismatch {
                offset: entry.offset,
                expected,
                actual: data.len(),
            });
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zlib::compress as zl_stream;

    /// Build a container holding `streams` back to back after the table
    fn container(streams: &[Vec<u8>]) -> Vec<u8> {
        let table_start = COUNT_OFFSET as usize + 4;
        let mut offset = table_start + streams.len() * ENTRY_SIZE;

        let mut data = vec![0u8; COUNT_OFFSET as usize];
        data.extend((streams.len() as u32).to_le_bytes());
        for stream in streams {
            data.extend((offset as u32).to_le_bytes());
            data.extend((stream.len() as u32).to_le_bytes());
            data.extend([0xEE; 4]);
            offset += stream.len();
        }
        for stream in streams {
            data.extend(stream);
        }
        data
    }

    #[test]
    fn test_empty_table() {
        let table = SoundTable::parse(&container(&[])).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_parse_entries() {
        let streams = vec![zl_stream(b"first"), zl_stream(b"second")];
        let data = container(&streams);
        let table = SoundTable::parse(&data).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[0].offset, 0x38 + 24);
        assert_eq!(table.entries()[0].size, streams[0].len() as u32);
        assert_eq!(
            table.entries()[1].offset,
            table.entries()[0].offset + streams[0].len() as u32
        );
    }

    #[test]
    fn test_inflate_entries() {
        let data = container(&[zl_stream(b"first"), zl_stream(&[7u8; 1000])]);
        let table = SoundTable::parse(&data).unwrap();

        let first = SoundTable::inflate(&data, &table.entries()[0]).unwrap();
        let second = SoundTable::inflate(&data, &table.entries()[1]).unwrap();
        assert_eq!(first, b"first");
        assert_eq!(second, vec![7u8; 1000]);
    }

    #[test]
    fn test_truncated_container() {
        let err = SoundTable::parse(&[0u8; 0x30]).unwrap_err();
        assert!(matches!(err, SoundError::Truncated { needed: 0x38, actual: 0x30 }));

        let mut data = vec![0u8; COUNT_OFFSET as usize];
        data.extend(3u32.to_le_bytes());
        let err = SoundTable::parse(&data).unwrap_err();
        assert!(matches!(err, SoundError::Truncated { needed: 0x5C, .. }));
    }

    #[test]
    fn test_entry_out_of_bounds() {
        let data = container(&[zl_stream(b"x")]);
        let entry = SoundEntry {
            offset: data.len() as u32 - 2,
            size: 10,
        };
        assert!(matches!(
            SoundTable::inflate(&data, &entry),
            Err(SoundError::OutOfBounds { size: 10, .. })
        ));
    }

    #[test]
    fn test_bad_tag() {
        let mut stream = zl_stream(b"payload");
        stream[0] = b'X';
        let data = container(&[stream]);
        let table = SoundTable::parse(&data).unwrap();

        let err = SoundTable::inflate(&data, &table.entries()[0]).unwrap_err();
        assert!(matches!(err, SoundError::BadTag { .. }));
    }

    #[test]
    fn test_size_mismatch() {
        let mut stream = zl_stream(b"hello");
        stream[2..5].copy_from_slice(&[0x64, 0x00, 0x00]);
        let data = container(&[stream]);
        let table = SoundTable::parse(&data).unwrap();

        let err = SoundTable::inflate(&data, &table.entries()[0]).unwrap_err();
        assert!(matches!(
            err,
            SoundError::SizeMismatch { expected: 100, actual: 5, .. }
        ));
    }

    #[test]
    fn test_corrupt_stream() {
        let data = container(&[b"ZL\0\0\0not zlib at all".to_vec()]);
        let table = SoundTable::parse(&data).unwrap();

        let err = SoundTable::inflate(&data, &table.entries()[0]).unwrap_err();
        assert!(matches!(err, SoundError::Inflate { .. }));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(SoundEntry { offset: 0xD4, size: 0 }.file_name(), "0D4.dat");
        assert_eq!(SoundEntry { offset: 0x1234, size: 0 }.file_name(), "1234.dat");
    }
}
