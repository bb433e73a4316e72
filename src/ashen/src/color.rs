//! 12-bit packed colors
//!
//! Ashen stores colors as `0x0RGB` in the low 12 bits of a little-endian
//! integer. Each 4-bit channel is widened to 8 bits by repeating the nibble,
//! so `0xF` becomes `0xFF` and `0x8` becomes `0x88`.

use image::Rgb;

/// Mask of the bits that carry color information
pub const COLOR_MASK: u32 = 0xFFF;

/// An 8-bit-per-channel RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Expand a packed 12-bit color. Bits above `0xFFF` are ignored.
    pub fn from_12_bit(packed: u32) -> Self {
        let packed = packed & COLOR_MASK;

        Color {
            r: widen_nibble(packed >> 8),
            g: widen_nibble(packed >> 4),
            b: widen_nibble(packed),
        }
    }
}

fn widen_nibble(value: u32) -> u8 {
    let nibble = (value & 0xF) as u8;
    nibble << 4 | nibble
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Rgb([color.r, color.g, color.b])
    }
}

impl From<Rgb<u8>> for Color {
    fn from(pixel: Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Color { r, g, b }
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color { r, g, b }
    }
}
