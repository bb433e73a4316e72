//! Sound bank extraction command handler

use anyhow::{Context, Result};
use ashen::{FailureMode, SoundTable};
use std::fs;
use std::path::Path;

use super::Summary;
use crate::config::Config;
use crate::file_io::read_input;

/// Inflate every entry of a sound bank into `<output>/<OFFSET>.dat`
pub fn extract(
    config: &Config,
    input: Option<&Path>,
    output: Option<&Path>,
    skip_errors: bool,
) -> Result<Summary> {
    let input = input.unwrap_or(&config.sound.input);
    let output_dir = output.map_or_else(|| config.sound_dir(), Path::to_path_buf);
    let failure = if skip_errors {
        FailureMode::Skip
    } else {
        config.sound.failure
    };

    let container = read_input(input)?;
    let table = SoundTable::parse(&container)
        .with_context(|| format!("Failed to parse sound table in {}", input.display()))?;

    tracing::debug!("{} sound entries in {}", table.len(), input.display());

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut summary = Summary::default();

    for entry in table.entries() {
        let data = match SoundTable::inflate(&container, entry) {
            Ok(data) => data,
            Err(e) if failure == FailureMode::Skip => {
                tracing::warn!("Skipping entry at 0x{:X}: {}", entry.offset, e);
                summary.skipped += 1;
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to extract sound entry from {}", input.display())
                })
            }
        };

        let path = output_dir.join(entry.file_name());
        fs::write(&path, &data)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!("{} ({} bytes)", path.display(), data.len());
        summary.written += 1;
    }

    summary.report("sounds", &output_dir);

    Ok(summary)
}
