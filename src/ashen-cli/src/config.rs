//! Configuration management for the ashen CLI
//!
//! Every path and tuning constant the converters use lives here. Defaults
//! follow the layout of a checkout that has already run the deflate step:
//! inputs under `output/deflated`, results under `output/parsed`.

use anyhow::{bail, Context, Result};
use ashen::{EntrySize, FailureMode, IndexPolicy, Remainder, COLOR_MAP_SIZE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory of deflated asset blobs
    pub input_dir: PathBuf,
    /// Root of all generated output
    pub output_dir: PathBuf,
    pub unpack: UnpackConfig,
    pub pattern: PatternConfig,
    pub palette: PaletteConfig,
    pub sound: SoundConfig,
    pub text_bank: TextBankConfig,
    pub texture: TextureConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnpackConfig {
    /// The game's pack file
    pub input: PathBuf,
    pub failure: FailureMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub input: PathBuf,
    pub report: PathBuf,
    /// Expect 0xFF in every record too
    pub include_ff: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    pub width: u32,
    pub entry: EntrySize,
    pub remainder: Remainder,
    /// File size that marks a blob as a palette during batch conversion
    pub detect_size: u64,
    /// Explicit palette file names; replaces size detection when non-empty
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub input: PathBuf,
    pub failure: FailureMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBankConfig {
    pub input: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureConfig {
    pub widths: Vec<u32>,
    /// Rendered palette sheets, relative to the color palette output directory
    pub palettes: Vec<String>,
    pub palette_row: u32,
    pub remainder: Remainder,
    pub index: IndexPolicy,
    pub fill: [u8; 3],
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_dir: PathBuf::from("output/deflated"),
            output_dir: PathBuf::from("output/parsed"),
            unpack: UnpackConfig::default(),
            pattern: PatternConfig::default(),
            palette: PaletteConfig::default(),
            sound: SoundConfig::default(),
            text_bank: TextBankConfig::default(),
            texture: TextureConfig::default(),
        }
    }
}

impl Default for UnpackConfig {
    fn default() -> Self {
        UnpackConfig {
            input: PathBuf::from("rom/packfile.dat"),
            failure: FailureMode::Halt,
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        PatternConfig {
            input: PathBuf::from("output/A20.dat"),
            report: PathBuf::from("output/A20_pattern.txt"),
            include_ff: false,
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        PaletteConfig {
            width: ashen::PALETTE_WIDTH,
            entry: EntrySize::U32,
            remainder: Remainder::Pad,
            detect_size: COLOR_MAP_SIZE,
            files: Vec::new(),
        }
    }
}

impl Default for SoundConfig {
    fn default() -> Self {
        SoundConfig {
            input: PathBuf::from("output/deflated/BBC974.dat"),
            failure: FailureMode::Halt,
        }
    }
}

impl Default for TextBankConfig {
    fn default() -> Self {
        TextBankConfig {
            input: PathBuf::from("output/deflated/D9924C.dat"),
        }
    }
}

impl Default for TextureConfig {
    fn default() -> Self {
        TextureConfig {
            widths: ashen::CANDIDATE_WIDTHS.to_vec(),
            palettes: ["1EF20.png", "2A89A4.png", "2EF20.png", "3EF20.png", "6F20.png"]
                .map(String::from)
                .to_vec(),
            palette_row: ashen::PALETTE_ROW,
            remainder: Remainder::Pad,
            index: IndexPolicy::Fail,
            fill: [0, 0, 0],
        }
    }
}

impl Config {
    /// Get the path to the default config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("ashen");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration
    ///
    /// An explicit path must exist. Without one the default config file is
    /// used if present, otherwise built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                bail!("Config file {} does not exist", path.display());
            }
            return Self::load_from(path);
        }

        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save configuration to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = self.to_toml()?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Where extracted sound streams go
    pub fn sound_dir(&self) -> PathBuf {
        self.output_dir.join("sound")
    }

    /// Where rendered textures go
    pub fn texture_dir(&self) -> PathBuf {
        self.output_dir.join("textures")
    }

    /// Where rendered palette sheets go, and where textures look for them
    pub fn palette_dir(&self) -> PathBuf {
        self.output_dir.join("color-palettes")
    }
}
