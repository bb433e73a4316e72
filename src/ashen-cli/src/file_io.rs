//! I/O helpers for consistent file/stdout handling

use anyhow::{bail, Context, Result};
use image::RgbImage;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Read a whole input file, failing with a readable message if it is missing
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if !path.is_file() {
        bail!("Input file {} does not exist", path.display());
    }
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write bytes to a file path or stdout if path is None
pub fn write_output(path: Option<&Path>, data: &[u8]) -> Result<()> {
    match path {
        Some(p) => {
            ensure_parent(p)?;
            fs::write(p, data).with_context(|| format!("Failed to write {}", p.display()))
        }
        None => io::stdout()
            .write_all(data)
            .context("Failed to write to stdout"),
    }
}

/// Save an image as PNG, creating parent directories as needed
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to save {}", path.display()))
}

/// Create the directory a file is about to be written into
pub fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display())),
        _ => Ok(()),
    }
}
