//! Palette rendering command handlers

use anyhow::{Context, Result};
use ashen::{
    Color, EntrySize, ManifestDetector, Palette, PaletteDetector, Remainder, SizeDetector,
};
use std::path::{Path, PathBuf};

use crate::config::{Config, PaletteConfig};
use crate::file_io::{read_input, save_png};
use crate::file_utils::{file_stem, walk_files};

/// Settings after applying command-line overrides to the config
struct Settings {
    width: u32,
    entry: EntrySize,
    remainder: Remainder,
}

impl Settings {
    fn new(config: &PaletteConfig, u16: bool, strict: bool) -> Self {
        Settings {
            width: config.width,
            entry: if u16 { EntrySize::U16 } else { config.entry },
            remainder: if strict {
                Remainder::Reject
            } else {
                config.remainder
            },
        }
    }
}

/// Render one palette file, or every detected palette in a directory
///
/// Returns the number of images written.
pub fn render(
    config: &Config,
    input: Option<&Path>,
    output: Option<&Path>,
    u16: bool,
    strict: bool,
) -> Result<usize> {
    let input = input.unwrap_or(&config.input_dir);
    let settings = Settings::new(&config.palette, u16, strict);

    if input.is_file() {
        let output = match output {
            Some(path) => path.to_path_buf(),
            None => config.palette_dir().join(format!("{}.png", file_stem(input)?)),
        };
        convert(input, &output, &settings)?;
        return Ok(1);
    }

    let detector = detector(&config.palette);
    let output_dir = output.map_or_else(|| config.palette_dir(), Path::to_path_buf);
    render_directory(input, &output_dir, detector.as_ref(), &settings)
}

fn detector(config: &PaletteConfig) -> Box<dyn PaletteDetector> {
    if config.files.is_empty() {
        Box::new(SizeDetector::new(config.detect_size))
    } else {
        Box::new(ManifestDetector::new(config.files.iter().cloned()))
    }
}

fn render_directory(
    input: &Path,
    output_dir: &Path,
    detector: &dyn PaletteDetector,
    settings: &Settings,
) -> Result<usize> {
    let mut written = 0;

    walk_files(input, |path, size| {
        if !detector.is_palette(path, size) {
            tracing::debug!("Skipping {}: not a palette", path.display());
            return Ok(());
        }

        let output: PathBuf = output_dir.join(format!("{}.png", file_stem(path)?));
        convert(path, &output, settings)?;
        written += 1;
        Ok(())
    })?;

    tracing::info!(
        "Rendered {} palettes from {} to {}",
        written,
        input.display(),
        output_dir.display()
    );

    Ok(written)
}

fn convert(input: &Path, output: &Path, settings: &Settings) -> Result<()> {
    let data = read_input(input)?;

    let palette = Palette::from_bytes(&data, settings.entry, settings.remainder)
        .with_context(|| format!("Failed to decode palette {}", input.display()))?;
    let image = palette
        .to_image(settings.width, Color::BLACK, settings.remainder)
        .with_context(|| format!("Failed to render palette {}", input.display()))?;

    save_png(&image, output)?;

    tracing::info!(
        "{} -> {} ({} colors, {}x{})",
        input.display(),
        output.display(),
        palette.len(),
        image.width(),
        image.height()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn color_map() -> Vec<u8> {
        (0..256u32 * 32).flat_map(|i| (i & 0xFFF).to_le_bytes()).collect()
    }

    fn test_config(root: &Path) -> Config {
        Config {
            input_dir: root.join("deflated"),
            output_dir: root.join("parsed"),
            ..Config::default()
        }
    }

    #[test]
    fn test_single_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("7F5464.dat");
        fs::write(&input, color_map()).unwrap();
        let config = test_config(temp_dir.path());

        let written = render(&config, Some(input.as_path()), None, false, false).unwrap();
        assert_eq!(written, 1);

        let image = image::open(config.palette_dir().join("7F5464.png"))
            .unwrap()
            .to_rgb8();
        assert_eq!(image.dimensions(), (256, 32));
        assert_eq!(
            Color::from(*image.get_pixel(0x23, 1)),
            Color::from_12_bit(0x123)
        );
    }

    #[test]
    fn test_directory_uses_size_detection() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = test_config(temp_dir.path());
        fs::create_dir_all(&config.input_dir).unwrap();
        fs::write(config.input_dir.join("1EF20.dat"), color_map()).unwrap();
        fs::write(config.input_dir.join("BBC974.dat"), [0u8; 64]).unwrap();

        let written = render(&config, None, None, false, false).unwrap();
        assert_eq!(written, 1);
        assert!(config.palette_dir().join("1EF20.png").is_file());
        assert!(!config.palette_dir().join("BBC974.png").exists());
    }

    #[test]
    fn test_directory_uses_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = test_config(temp_dir.path());
        config.palette.files = vec!["small.dat".to_string()];
        fs::create_dir_all(&config.input_dir).unwrap();
        fs::write(config.input_dir.join("small.dat"), [0xFFu8; 1024]).unwrap();
        fs::write(config.input_dir.join("1EF20.dat"), color_map()).unwrap();

        let out = temp_dir.path().join("sheets");
        let written = render(&config, None, Some(out.as_path()), false, false).unwrap();
        assert_eq!(written, 1);

        let image = image::open(out.join("small.png")).unwrap().to_rgb8();
        assert_eq!(image.dimensions(), (256, 1));
        assert!(!out.join("1EF20.png").exists());
    }

    #[test]
    fn test_strict_rejects_partial_row() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("odd.dat");
        fs::write(&input, [0u8; 40]).unwrap();
        let config = test_config(temp_dir.path());
        let output = temp_dir.path().join("odd.png");

        let (input, output) = (input.as_path(), output.as_path());
        assert!(render(&config, Some(input), Some(output), false, true).is_err());
        assert!(!output.exists());

        render(&config, Some(input), Some(output), false, false).unwrap();
        assert!(output.is_file());
    }
}
