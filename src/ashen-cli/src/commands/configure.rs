//! Configuration command handlers
//!
//! Handles the `configure` subcommand: show the effective configuration or
//! write the defaults out as a starting point.

use crate::config::Config;
use anyhow::{bail, Result};
use std::path::Path;

/// Handle the configure command
///
/// Runs before any configuration is loaded, so `--init --force` can replace
/// a file that no longer parses.
///
/// # Arguments
/// * `explicit` - Config file given on the command line, if any
/// * `init` - Write the default configuration instead of showing it
/// * `force` - Allow `init` to replace an existing file
pub fn handle(explicit: Option<&Path>, init: bool, force: bool) -> Result<()> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => Config::config_path()?,
    };

    if init {
        return init_config(&path, force);
    }

    println!("# Config file: {}", path.display());
    let config = if path.exists() {
        Config::load_from(&path)?
    } else {
        println!("# (not present, showing defaults)");
        Config::default()
    };
    print!("{}", config.to_toml()?);

    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file {} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save(path)?;
    println!("Config saved to: {}", path.display());

    Ok(())
}
