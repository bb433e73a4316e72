//! Command dispatch
//!
//! Maps parsed subcommands onto their handlers.

use anyhow::Result;
use std::path::Path;

use crate::cli::Commands;
use crate::commands;
use crate::commands::texture::TextureArgs;
use crate::config::Config;

/// Run one subcommand
///
/// `configure` runs without loading the configuration. Every other command
/// loads it from `config_path` first.
pub fn dispatch(command: Commands, config_path: Option<&Path>) -> Result<()> {
    let config = match command {
        Commands::Configure { init, force } => {
            return commands::configure::handle(config_path, init, force);
        }
        _ => Config::load(config_path)?,
    };
    let config = &config;

    match command {
        Commands::Unpack {
            input,
            output,
            skip_errors,
        } => {
            commands::unpack::unpack(config, input.as_deref(), output.as_deref(), skip_errors)?;
        }

        Commands::Pattern {
            input,
            output,
            include_ff,
        } => {
            commands::pattern::analyze(config, input.as_deref(), output.as_deref(), include_ff)?;
        }

        Commands::Palette {
            input,
            output,
            u16,
            strict,
        } => {
            commands::palette::render(config, input.as_deref(), output.as_deref(), u16, strict)?;
        }

        Commands::Sound {
            input,
            output,
            skip_errors,
        } => {
            commands::sound::extract(config, input.as_deref(), output.as_deref(), skip_errors)?;
        }

        Commands::TextBank { input, output } => {
            commands::text_bank::decode(config, input.as_deref(), output.as_deref())?;
        }

        Commands::Texture {
            input,
            output,
            width,
            palette,
            strict,
            clamp,
        } => {
            let args = TextureArgs {
                input: input.as_deref(),
                output: output.as_deref(),
                widths: &width,
                palettes: &palette,
                strict,
                clamp,
            };
            commands::texture::render(config, &args)?;
        }

        // Handled before loading
        Commands::Configure { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn init(force: bool) -> Commands {
        Commands::Configure { init: true, force }
    }

    #[test]
    fn test_init_missing_explicit_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("new.toml");

        dispatch(init(false), Some(path.as_path())).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_force_replaces_broken_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "output_dir = [").unwrap();

        assert!(dispatch(init(false), Some(path.as_path())).is_err());
        dispatch(init(true), Some(path.as_path())).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_other_commands_need_the_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("absent.toml");
        let command = Commands::TextBank {
            input: Some(temp_dir.path().join("D9924C.dat")),
            output: None,
        };

        let err = dispatch(command, Some(path.as_path())).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_unpack_with_config_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = Config {
            input_dir: temp_dir.path().join("deflated"),
            ..Config::default()
        };
        let config_path = temp_dir.path().join("config.toml");
        config.save(&config_path).unwrap();

        let mut pack_file = b"PMAN".to_vec();
        pack_file.extend(1u32.to_le_bytes());
        pack_file.extend([0u8; 56]);
        for field in [0u32, 0x50, 5, 0] {
            pack_file.extend(field.to_le_bytes());
        }
        pack_file.extend(b"Ashen");
        let input = temp_dir.path().join("packfile.dat");
        fs::write(&input, pack_file).unwrap();

        let command = Commands::Unpack {
            input: Some(input),
            output: None,
            skip_errors: false,
        };
        dispatch(command, Some(config_path.as_path())).unwrap();
        assert_eq!(fs::read(config.input_dir.join("50.dat")).unwrap(), b"Ashen");
    }
}
