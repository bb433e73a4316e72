//! Indexed-color texture rendering
//!
//! Texture blobs have no header: every byte is an index into a palette and
//! the pixel width is not stored anywhere. Rendering the same bytes at a
//! handful of widths and eyeballing the results is how widths get found.

use image::RgbImage;

use crate::color::Color;
use crate::palette::Palette;
use crate::policy::{IndexPolicy, Remainder};

/// Widths tried when the real width of a texture is unknown
pub const CANDIDATE_WIDTHS: [u32; 7] = [8, 16, 32, 64, 128, 256, 512];

/// Errors from texture rendering
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("Texture width must be non-zero")]
    ZeroWidth,

    #[error("Texture data is empty")]
    Empty,

    #[error("Palette is empty")]
    EmptyPalette,

    #[error("Texture of {len} bytes does not fill rows of {width} pixels")]
    PartialRow { len: usize, width: u32 },

    #[error("Byte 0x{value:02X} at offset 0x{offset:X} is outside a palette of {len} colors")]
    IndexOutOfRange { offset: usize, value: u8, len: usize },

    #[error("Texture of {len} bytes at width {width} is too tall to render")]
    TooTall { len: usize, width: u32 },
}

/// How to treat data that does not line up with the palette or the width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Color of pixels past the end of the data
    pub fill: Color,
    pub remainder: Remainder,
    pub index: IndexPolicy,
}

/// Render `data` as palette indices into an image `width` pixels wide
///
/// Byte `i` becomes pixel `(i % width, i / width)`, and the height is
/// `ceil(data.len() / width)`.
pub fn render(
    data: &[u8],
    palette: &Palette,
    width: u32,
    options: &RenderOptions,
) -> Result<RgbImage, TextureError> {
    if width == 0 {
        return Err(TextureError::ZeroWidth);
    }
    if data.is_empty() {
        return Err(TextureError::Empty);
    }
    if palette.is_empty() {
        return Err(TextureError::EmptyPalette);
    }

    let row_len = width as usize;
    if options.remainder == Remainder::Reject && data.len() % row_len != 0 {
        return Err(TextureError::PartialRow {
            len: data.len(),
            width,
        });
    }

    let height = u32::try_from(data.len().div_ceil(row_len)).map_err(|_| TextureError::TooTall {
        len: data.len(),
        width,
    })?;

    let mut image = RgbImage::from_pixel(width, height, options.fill.into());
    for (i, &value) in data.iter().enumerate() {
        let color = lookup(palette, i, value, options.index)?;
        image.put_pixel((i % row_len) as u32, (i / row_len) as u32, color.into());
    }

    Ok(image)
}

fn lookup(
    palette: &Palette,
    offset: usize,
    value: u8,
    policy: IndexPolicy,
) -> Result<Color, TextureError> {
    if let Some(color) = palette.get(value as usize) {
        return Ok(color);
    }

    match policy {
        IndexPolicy::Fail => Err(TextureError::IndexOutOfRange {
            offset,
            value,
            len: palette.len(),
        }),
        IndexPolicy::Clamp => Ok(palette.colors()[palette.len() - 1]),
    }
}
