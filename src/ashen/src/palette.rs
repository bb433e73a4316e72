//! Color palettes
//!
//! A raw palette file is a flat array of little-endian integers, each
//! holding one 12-bit color. The game's color maps are 256 colors wide and
//! 32 shades tall, so they render naturally as a 256-pixel-wide sheet. Row
//! 15 of such a sheet holds the ramp that textures are colored with.

use byteorder::{ByteOrder, LittleEndian};
use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::policy::Remainder;

/// Width of a rendered palette sheet
pub const PALETTE_WIDTH: u32 = 256;

/// Row of a palette sheet that holds the texture ramp
pub const PALETTE_ROW: u32 = 15;

/// Errors that can occur while decoding or rendering a palette
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("Palette data size {size} is not a multiple of {entry} bytes")]
    PartialEntry { size: usize, entry: usize },

    #[error("Palette of {count} colors does not fill rows of {width} pixels")]
    PartialRow { count: usize, width: u32 },

    #[error("Palette width must be non-zero")]
    ZeroWidth,

    #[error("Palette is empty")]
    Empty,

    #[error("Row {row} is outside a palette image {height} pixels tall")]
    RowOutOfRange { row: u32, height: u32 },
}

/// Size of one packed color in a raw palette file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySize {
    U16,
    #[default]
    U32,
}

impl EntrySize {
    pub fn bytes(self) -> usize {
        match self {
            EntrySize::U16 => 2,
            EntrySize::U32 => 4,
        }
    }

    fn read(self, chunk: &[u8]) -> u32 {
        match self {
            EntrySize::U16 => u32::from(LittleEndian::read_u16(chunk)),
            EntrySize::U32 => LittleEndian::read_u32(chunk),
        }
    }
}

/// An ordered table of colors
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Self {
        Palette { colors }
    }

    /// Decode a raw palette file
    ///
    /// With [`Remainder::Pad`] trailing bytes that do not make up a whole
    /// entry are ignored; with [`Remainder::Reject`] they are an error.
    pub fn from_bytes(
        data: &[u8],
        entry: EntrySize,
        remainder: Remainder,
    ) -> Result<Self, PaletteError> {
        let entry_len = entry.bytes();

        if remainder == Remainder::Reject && data.len() % entry_len != 0 {
            return Err(PaletteError::PartialEntry {
                size: data.len(),
                entry: entry_len,
            });
        }

        let colors = data
            .chunks_exact(entry_len)
            .map(|chunk| Color::from_12_bit(entry.read(chunk)))
            .collect();

        Ok(Palette { colors })
    }

    /// Read one pixel row of a rendered palette sheet, left to right
    pub fn from_image_row(image: &RgbImage, row: u32) -> Result<Self, PaletteError> {
        if row >= image.height() {
            return Err(PaletteError::RowOutOfRange {
                row,
                height: image.height(),
            });
        }

        let colors = (0..image.width())
            .map(|x| Color::from(*image.get_pixel(x, row)))
            .collect();

        Ok(Palette { colors })
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Render the palette row-major into an image `width` pixels wide
    ///
    /// Color `i` lands at `(i % width, i / width)`. An incomplete last row is
    /// padded with `fill`, or rejected with [`Remainder::Reject`].
    pub fn to_image(
        &self,
        width: u32,
        fill: Color,
        remainder: Remainder,
    ) -> Result<RgbImage, PaletteError> {
        if width == 0 {
            return Err(PaletteError::ZeroWidth);
        }
        if self.colors.is_empty() {
            return Err(PaletteError::Empty);
        }

        let count = self.colors.len();
        let row_len = width as usize;
        if remainder == Remainder::Reject && count % row_len != 0 {
            return Err(PaletteError::PartialRow { count, width });
        }

        let height = count.div_ceil(row_len) as u32;
        let mut image = RgbImage::from_pixel(width, height, fill.into());

        for (i, color) in self.colors.iter().enumerate() {
            let x = (i % row_len) as u32;
            let y = (i / row_len) as u32;
            image.put_pixel(x, y, (*color).into());
        }

        Ok(image)
    }
}

impl From<Vec<Color>> for Palette {
    fn from(colors: Vec<Color>) -> Self {
        Palette { colors }
    }
}
