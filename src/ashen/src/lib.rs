//! # ashen
//!
//! Decoders for the packed assets of Ashen, working on blobs that have
//! already been deflated out of the game's pack file.
//!
//! This library provides functionality to:
//! - Unpack the game's pack file into individual, inflated blobs
//! - Report missing and repeated byte values in 256-byte records
//! - Expand 12-bit packed colors and render color tables to images
//! - Inflate the zlib sound streams referenced by a sound bank
//! - Decode UTF-16 text banks into normalized strings
//! - Render raw indexed-color bytes against a palette
//!
//! ## Example
//!
//! ```no_run
//! use std::fs;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bank = fs::read("D9924C.dat")?;
//! let bank = ashen::TextBank::parse(&bank)?;
//!
//! for string in bank.strings() {
//!     println!("{string}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod detect;
pub mod pack_file;
pub mod palette;
pub mod pattern;
pub mod policy;
pub mod sound;
pub mod text_bank;
pub mod texture;
pub mod zlib;

// Re-export commonly used items
#[doc(inline)]
pub use color::Color;
#[doc(inline)]
pub use detect::{ManifestDetector, PaletteDetector, SizeDetector, COLOR_MAP_SIZE};
#[doc(inline)]
pub use pack_file::{PackEntry, PackError, PackFile};
#[doc(inline)]
pub use palette::{EntrySize, Palette, PaletteError, PALETTE_ROW, PALETTE_WIDTH};
#[doc(inline)]
pub use pattern::{format_hex, records, PatternRecord, Records, ReferenceRange, RECORD_SIZE};
#[doc(inline)]
pub use policy::{FailureMode, IndexPolicy, Remainder};
#[doc(inline)]
pub use sound::{SoundEntry, SoundError, SoundTable};
#[doc(inline)]
pub use text_bank::{TextBank, TextBankError};
#[doc(inline)]
pub use texture::{render as render_texture, RenderOptions, TextureError, CANDIDATE_WIDTHS};
