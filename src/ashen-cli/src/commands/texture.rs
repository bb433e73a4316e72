//! Texture rendering command handler
//!
//! Renders every input file with every palette at every candidate width, so
//! one run over the deflated directory yields a grid of guesses per file.

use anyhow::{bail, Context, Result};
use ashen::{Color, IndexPolicy, Palette, Remainder, RenderOptions};
use std::path::{Path, PathBuf};

use crate::config::{Config, TextureConfig};
use crate::file_io::{read_input, save_png};
use crate::file_utils::{collect_files, file_stem};

/// A palette loaded from a rendered palette sheet
struct NamedPalette {
    name: String,
    palette: Palette,
}

/// Command-line arguments for the texture command
#[derive(Debug, Default)]
pub struct TextureArgs<'a> {
    pub input: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub widths: &'a [u32],
    pub palettes: &'a [PathBuf],
    pub strict: bool,
    pub clamp: bool,
}

/// Render textures, returning the number of images written
pub fn render(config: &Config, args: &TextureArgs) -> Result<usize> {
    let input = args.input.unwrap_or(&config.input_dir);
    let output_dir = args
        .output
        .map_or_else(|| config.texture_dir(), Path::to_path_buf);

    let widths = if args.widths.is_empty() {
        config.texture.widths.as_slice()
    } else {
        args.widths
    };
    if widths.is_empty() {
        bail!("No texture widths configured");
    }

    let palette_paths = if args.palettes.is_empty() {
        config
            .texture
            .palettes
            .iter()
            .map(|name| config.palette_dir().join(name))
            .collect()
    } else {
        args.palettes.to_vec()
    };
    let palettes = load_palettes(&palette_paths, config.texture.palette_row)?;

    let options = render_options(&config.texture, args.strict, args.clamp);

    let files = if input.is_file() {
        vec![input.to_path_buf()]
    } else {
        collect_files(input)?
    };

    let mut written = 0;
    for file in &files {
        written += render_file(file, &output_dir, &palettes, widths, &options)?;
    }

    tracing::info!(
        "Rendered {} textures from {} files to {}",
        written,
        files.len(),
        output_dir.display()
    );

    Ok(written)
}

fn render_options(config: &TextureConfig, strict: bool, clamp: bool) -> RenderOptions {
    RenderOptions {
        fill: Color::from(config.fill),
        remainder: if strict {
            Remainder::Reject
        } else {
            config.remainder
        },
        index: if clamp {
            IndexPolicy::Clamp
        } else {
            config.index
        },
    }
}

fn load_palettes(paths: &[PathBuf], row: u32) -> Result<Vec<NamedPalette>> {
    if paths.is_empty() {
        bail!("No texture palettes configured");
    }

    paths
        .iter()
        .map(|path| {
            if !path.is_file() {
                bail!(
                    "Palette {} does not exist, render the color palettes first",
                    path.display()
                );
            }

            let sheet = image::open(path)
                .with_context(|| format!("Failed to open palette {}", path.display()))?
                .to_rgb8();
            let palette = Palette::from_image_row(&sheet, row)
                .with_context(|| format!("Failed to read row {} of {}", row, path.display()))?;

            tracing::debug!("Loaded {} colors from {}", palette.len(), path.display());

            Ok(NamedPalette {
                name: file_stem(path)?,
                palette,
            })
        })
        .collect()
}

fn render_file(
    path: &Path,
    output_dir: &Path,
    palettes: &[NamedPalette],
    widths: &[u32],
    options: &RenderOptions,
) -> Result<usize> {
    let data = read_input(path)?;
    if data.is_empty() {
        tracing::warn!("Skipping {}: empty file", path.display());
        return Ok(0);
    }

    let stem = file_stem(path)?;
    let mut written = 0;

    for named in palettes {
        for &width in widths {
            let image = ashen::render_texture(&data, &named.palette, width, options)
                .with_context(|| {
                    format!(
                        "Failed to render {} at width {} with {}",
                        path.display(),
                        width,
                        named.name
                    )
                })?;

            let output = output_dir.join(format!("{}_{}_{}.png", stem, width, named.name));
            save_png(&image, &output)?;
            written += 1;
        }
    }

    tracing::debug!("{}: {} images", path.display(), written);

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::fs;

    /// Write a palette sheet whose row 15 maps index i to (i, 0, 255 - i)
    fn write_sheet(path: &Path, width: u32) {
        let mut sheet = RgbImage::new(width, 32);
        for x in 0..width {
            sheet.put_pixel(x, 15, Rgb([x as u8, 0, 255 - x as u8]));
        }
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        sheet.save(path).unwrap();
    }

    fn test_config(root: &Path) -> Config {
        Config {
            input_dir: root.join("deflated"),
            output_dir: root.join("parsed"),
            ..Config::default()
        }
    }

    #[test]
    fn test_render_grid_from_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = test_config(temp_dir.path());
        config.texture.widths = vec![4, 8];
        config.texture.palettes = vec!["1EF20.png".to_string(), "6F20.png".to_string()];
        write_sheet(&config.palette_dir().join("1EF20.png"), 256);
        write_sheet(&config.palette_dir().join("6F20.png"), 256);

        fs::create_dir_all(&config.input_dir).unwrap();
        fs::write(config.input_dir.join("A.dat"), (0u8..10).collect::<Vec<_>>()).unwrap();
        fs::write(config.input_dir.join("empty.dat"), b"").unwrap();

        let written = render(&config, &TextureArgs::default()).unwrap();
        assert_eq!(written, 4);

        let image = image::open(config.texture_dir().join("A_4_1EF20.png"))
            .unwrap()
            .to_rgb8();
        assert_eq!(image.dimensions(), (4, 3));
        assert_eq!(*image.get_pixel(1, 2), Rgb([9, 0, 246]));
        assert_eq!(*image.get_pixel(3, 2), Rgb([0, 0, 0]));

        assert!(config.texture_dir().join("A_8_6F20.png").is_file());
        assert!(!config.texture_dir().join("empty_4_1EF20.png").exists());
    }

    #[test]
    fn test_explicit_arguments() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = test_config(temp_dir.path());
        let sheet = temp_dir.path().join("sheets").join("small.png");
        write_sheet(&sheet, 4);

        let input = temp_dir.path().join("tex.dat");
        fs::write(&input, [0u8, 1, 2, 9]).unwrap();
        let out = temp_dir.path().join("out");
        let palettes = [sheet];

        let mut args = TextureArgs {
            input: Some(input.as_path()),
            output: Some(out.as_path()),
            widths: &[2],
            palettes: &palettes,
            ..TextureArgs::default()
        };
        assert!(render(&config, &args).is_err());

        args.clamp = true;
        assert_eq!(render(&config, &args).unwrap(), 1);

        let image = image::open(out.join("tex_2_small.png")).unwrap().to_rgb8();
        assert_eq!(*image.get_pixel(1, 1), Rgb([3, 0, 252]));
    }

    #[test]
    fn test_missing_palette() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = test_config(temp_dir.path());
        fs::create_dir_all(&config.input_dir).unwrap();

        assert!(render(&config, &TextureArgs::default()).is_err());
    }

    #[test]
    fn test_strict_rejects_partial_row() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = test_config(temp_dir.path());
        let sheet = temp_dir.path().join("p.png");
        write_sheet(&sheet, 256);
        let input = temp_dir.path().join("t.dat");
        fs::write(&input, [1u8; 10]).unwrap();
        let out = temp_dir.path().join("out");
        let palettes = [sheet];

        let args = TextureArgs {
            input: Some(input.as_path()),
            output: Some(out.as_path()),
            widths: &[4],
            palettes: &palettes,
            strict: true,
            ..TextureArgs::default()
        };
        assert!(render(&config, &args).is_err());
    }
}
