//! Text banks
//!
//! # Format
//! - Bytes 0-3: magic `9B 01 00 00`
//! - Bytes 4+: UTF-16LE text, strings separated by NUL
//!
//! Inside a string a single carriage return is a line break and a doubled
//! one starts a new screen of dialogue. Runs of two spaces also show up in
//! the text; their meaning is unknown and they are left untouched.

/// Text bank magic bytes
pub const TEXT_BANK_MAGIC: [u8; 4] = [0x9B, 0x01, 0x00, 0x00];

/// Line printed between strings
pub const CHUNK_SEPARATOR: &str = "=====";

/// Line inserted where a new screen starts
pub const SCREEN_SEPARATOR: &str = "---";

/// Errors from text bank decoding
#[derive(Debug, thiserror::Error)]
pub enum TextBankError {
    #[error("Not a text bank: expected magic 9B 01 00 00, got {0:02X?}")]
    NotATextBank(Vec<u8>),

    #[error("Text length {0} is not a whole number of UTF-16 code units")]
    OddLength(usize),

    #[error("Invalid UTF-16 at byte 0x{offset:X}: unpaired surrogate 0x{unit:04X}")]
    InvalidUtf16 { offset: usize, unit: u16 },
}

/// A decoded text bank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBank {
    strings: Vec<String>,
}

impl TextBank {
    /// Check the magic, decode the text and normalize every string
    pub fn parse(data: &[u8]) -> Result<Self, TextBankError> {
        if !is_text_bank(data) {
            let found = data.iter().take(TEXT_BANK_MAGIC.len()).copied().collect();
            return Err(TextBankError::NotATextBank(found));
        }

        let text = decode_utf16le(&data[TEXT_BANK_MAGIC.len()..])?;
        let strings = text.split('\0').map(normalize).collect();

        Ok(TextBank { strings })
    }

    /// Normalized strings in bank order, empty strings included
    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// The bank as printed by the CLI: each string, then a separator line
    pub fn render(&self) -> String {
        let mut out = String::new();
        for string in &self.strings {
            out.push_str(string);
            out.push('\n');
            out.push_str(CHUNK_SEPARATOR);
            out.push('\n');
        }
        out
    }
}

/// Check if data starts with the text bank magic
pub fn is_text_bank(data: &[u8]) -> bool {
    data.len() >= TEXT_BANK_MAGIC.len() && data[..TEXT_BANK_MAGIC.len()] == TEXT_BANK_MAGIC
}

/// Replace screen breaks, then remaining line breaks
pub fn normalize(raw: &str) -> String {
    raw.replace("\r\r", &format!("\n{SCREEN_SEPARATOR}\n"))
        .replace('\r', "\n")
}

fn decode_utf16le(bytes: &[u8]) -> Result<String, TextBankError> {
    if bytes.len() % 2 != 0 {
        return Err(TextBankError::OddLength(bytes.len()));
    }

    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));

    let mut text = String::with_capacity(bytes.len() / 2);
    let mut offset = 0;
    for decoded in char::decode_utf16(units) {
        match decoded {
            Ok(c) => {
                text.push(c);
                offset += c.len_utf16() * 2;
            }
            Err(e) => {
                return Err(TextBankError::InvalidUtf16 {
                    offset: offset + TEXT_BANK_MAGIC.len(),
                    unit: e.unpaired_surrogate(),
                })
            }
        }
    }

    Ok(text)
}
