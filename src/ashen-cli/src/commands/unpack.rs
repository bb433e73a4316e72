//! Pack file unpacking command handler
//!
//! Writes every entry of the pack file to `<output>/<OFFSET>.dat`, inflated
//! when stored as a `ZL` stream. The output directory defaults to the input
//! directory of the other converters.

use anyhow::{Context, Result};
use ashen::{FailureMode, PackFile};
use std::fs;
use std::path::Path;

use super::Summary;
use crate::config::Config;
use crate::file_io::read_input;

/// Unpack a pack file
pub fn unpack(
    config: &Config,
    input: Option<&Path>,
    output: Option<&Path>,
    skip_errors: bool,
) -> Result<Summary> {
    let input = input.unwrap_or(&config.unpack.input);
    let output_dir = output.unwrap_or(&config.input_dir);
    let failure = if skip_errors {
        FailureMode::Skip
    } else {
        config.unpack.failure
    };

    let data = read_input(input)?;
    let pack_file = PackFile::parse(&data)
        .with_context(|| format!("Failed to parse pack file {}", input.display()))?;

    tracing::info!(
        "{}: {} entries, \"{}\"",
        input.display(),
        pack_file.len(),
        pack_file.copyright()
    );

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut summary = Summary::default();

    for entry in pack_file.entries() {
        let contents = match PackFile::extract(&data, entry) {
            Ok(contents) => contents,
            Err(e) if failure == FailureMode::Skip => {
                tracing::warn!("Skipping entry at 0x{:X}: {}", entry.offset, e);
                summary.skipped += 1;
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to unpack entry from {}", input.display())
                })
            }
        };

        let path = output_dir.join(entry.file_name());
        fs::write(&path, &contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("{} ({} bytes)", path.display(), contents.len());
        summary.written += 1;
    }

    summary.report("entries", output_dir);

    Ok(summary)
}
