//! Text bank decoding command handler

use anyhow::{Context, Result};
use ashen::TextBank;
use std::path::Path;

use crate::config::Config;
use crate::file_io::{read_input, write_output};

/// Decode a text bank and write its strings, one chunk per string
///
/// Returns the number of strings.
pub fn decode(config: &Config, input: Option<&Path>, output: Option<&Path>) -> Result<usize> {
    let input = input.unwrap_or(&config.text_bank.input);
    let data = read_input(input)?;

    let bank = TextBank::parse(&data)
        .with_context(|| format!("Failed to decode text bank {}", input.display()))?;

    write_output(output, bank.render().as_bytes())?;

    if let Some(path) = output {
        tracing::info!("Wrote {} strings to {}", bank.len(), path.display());
    }

    Ok(bank.len())
}
