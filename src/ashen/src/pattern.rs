//! Byte pattern analysis for record-oriented binary streams
//!
//! A captured stream is cut into 256-byte records. For each record we report
//! which values of the reference range never occur and which occur more than
//! once, which makes permutation tables and substitution layouts stand out.

use std::fmt;
use std::io::{self, Read};

/// Length of one record
pub const RECORD_SIZE: usize = 256;

/// Placeholder printed for an empty value set
const NOTHING: &str = "NOTHING";

/// The byte values every record is expected to contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceRange {
    /// `0x00..=0xFE`; `0xFF` is never reported as missing
    #[default]
    ExcludeFf,
    /// `0x00..=0xFF`
    Full,
}

impl ReferenceRange {
    pub fn from_include_ff(include_ff: bool) -> Self {
        if include_ff {
            ReferenceRange::Full
        } else {
            ReferenceRange::ExcludeFf
        }
    }

    pub fn values(self) -> impl Iterator<Item = u8> {
        let upper = match self {
            ReferenceRange::ExcludeFf => 0xFE,
            ReferenceRange::Full => 0xFF,
        };
        0..=upper
    }
}

/// Analysis of one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternRecord {
    pub index: usize,
    /// Reference values absent from the record, ascending
    pub missing: Vec<u8>,
    /// Values present more than once, ascending
    pub repeated: Vec<u8>,
}

impl PatternRecord {
    pub fn analyze(index: usize, data: &[u8], range: ReferenceRange) -> Self {
        let mut counts = [0usize; 256];
        for &byte in data {
            counts[byte as usize] += 1;
        }

        let missing = range.values().filter(|&v| counts[v as usize] == 0).collect();
        let repeated = (0..=u8::MAX).filter(|&v| counts[v as usize] > 1).collect();

        PatternRecord {
            index,
            missing,
            repeated,
        }
    }
}

impl fmt::Display for PatternRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(f, "    - Removed: {}", format_hex(&self.missing))?;
        writeln!(f, "    - Repeated: {}", format_hex(&self.repeated))
    }
}

/// Format values as space separated two-digit uppercase hex
pub fn format_hex(values: &[u8]) -> String {
    if values.is_empty() {
        return NOTHING.to_string();
    }

    values
        .iter()
        .map(|v| format!("{v:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lazy record reader over any byte source
pub struct Records<R> {
    reader: R,
    range: ReferenceRange,
    index: usize,
    done: bool,
}

/// Read `reader` one record at a time until it is exhausted
///
/// The final record may be shorter than [`RECORD_SIZE`]. An I/O error ends
/// the sequence after it is yielded.
pub fn records<R: Read>(reader: R, range: ReferenceRange) -> Records<R> {
    Records {
        reader,
        range,
        index: 0,
        done: false,
    }
}

impl<R: Read> Iterator for Records<R> {
    type Item = io::Result<PatternRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut chunk = Vec::with_capacity(RECORD_SIZE);
        match (&mut self.reader)
            .take(RECORD_SIZE as u64)
            .read_to_end(&mut chunk)
        {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(n) => {
                if n < RECORD_SIZE {
                    self.done = true;
                }
                let record = PatternRecord::analyze(self.index, &chunk, self.range);
                self.index += 1;
                Some(Ok(record))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
