//! The game's pack file
//!
//! # Format
//! - `0x00`: magic `"PMAN"`
//! - `0x04`: u32 LE entry count
//! - `0x08`: 56-byte copyright string, NUL padded
//! - `0x40`: `count` entries of 16 bytes: kind, offset, size, reserved (all
//!   u32 LE)
//!
//! Offsets are absolute. An entry whose data starts with a `ZL` header is
//! compressed; anything else is stored as is.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

use crate::zlib;

/// Magic at the start of a pack file
pub const PACK_FILE_MAGIC: [u8; 4] = *b"PMAN";

/// Length of the copyright field
pub const COPYRIGHT_LENGTH: usize = 56;

/// Offset of the first entry
pub const HEADER_SIZE: usize = PACK_FILE_MAGIC.len() + 4 + COPYRIGHT_LENGTH;

/// Size of one entry
pub const PACK_ENTRY_SIZE: usize = 16;

/// Errors that can occur while reading a pack file
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("Not a pack file (magic {0:02X?})")]
    BadMagic(Vec<u8>),

    #[error("Pack file too short: need {needed} bytes, got {actual}")]
    Truncated { needed: u64, actual: usize },

    #[error("Entry at 0x{offset:X} with size {size} exceeds pack file of {len} bytes")]
    OutOfBounds { offset: u32, size: u32, len: usize },

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

/// One row of the pack file's entry table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackEntry {
    /// Asset kind; zero in every known pack file
    pub kind: u32,
    pub offset: u32,
    pub size: u32,
}

impl PackEntry {
    /// Output file name for this entry, `<offset in hex>.dat`
    pub fn file_name(&self) -> String {
        format!("{:X}.dat", self.offset)
    }
}

/// Parsed pack file header and entry table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackFile {
    copyright: String,
    entries: Vec<PackEntry>,
}

impl PackFile {
    pub fn parse(data: &[u8]) -> Result<Self, PackError> {
        if !data.starts_with(&PACK_FILE_MAGIC) {
            return Err(PackError::BadMagic(
                data.iter().take(PACK_FILE_MAGIC.len()).copied().collect(),
            ));
        }

        let truncated = |needed: u64| PackError::Truncated {
            needed,
            actual: data.len(),
        };

        let mut cursor = Cursor::new(&data[PACK_FILE_MAGIC.len()..]);
        let count = cursor
            .read_u32::<LittleEndian>()
            .map_err(|_| truncated(HEADER_SIZE as u64))?;

        let mut copyright = [0u8; COPYRIGHT_LENGTH];
        cursor
            .read_exact(&mut copyright)
            .map_err(|_| truncated(HEADER_SIZE as u64))?;
        let copyright = String::from_utf8_lossy(&copyright)
            .trim_end_matches('\0')
            .to_string();

        let table_end = HEADER_SIZE as u64 + u64::from(count) * PACK_ENTRY_SIZE as u64;
        if table_end > data.len() as u64 {
            return Err(truncated(table_end));
        }

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let mut read = || {
                cursor
                    .read_u32::<LittleEndian>()
                    .map_err(|_| truncated(table_end))
            };
            let kind = read()?;
            let offset = read()?;
            let size = read()?;
            let _reserved = read()?;

            entries.push(PackEntry { kind, offset, size });
        }

        Ok(PackFile { copyright, entries })
    }

    pub fn copyright(&self) -> &str {
        &self.copyright
    }

    pub fn entries(&self) -> &[PackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored bytes of an entry, compressed or not
    pub fn raw<'a>(data: &'a [u8], entry: &PackEntry) -> Result<&'a [u8], PackError> {
        let start = entry.offset as usize;
        start
            .checked_add(entry.size as usize)
            .and_then(|end| data.get(start..end))
            .ok_or(PackError::OutOfBounds {
                offset: entry.offset,
                size: entry.size,
                len: data.len(),
            })
    }

    /// Contents of an entry, inflated if it is a `ZL` stream
    pub fn extract(data: &[u8], entry: &PackEntry) -> Result<Vec<u8>, PackError> {
        let raw = Self::raw(data, entry)?;

        let Some((expected, payload)) = zlib::split_header(raw) else {
            return Ok(raw.to_vec());
        };

        let inflated = zlib::inflate(payload, expected).map_err(|source| PackError::Inflate {
            offset: entry.offset,
            source,
        })?;

        if inflated.len() != expected as usize {
            return Err(PackError::SizeMismatch {
                offset: entry.offset,
                expected,
                actual: inflated.len(),
            });
        }

        Ok(inflated)
    }
}
