//! Core CLI definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ashen")]
#[command(about = "Ashen asset extraction tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/ashen/config.toml)
    #[arg(short, long, global = true, env = "ASHEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Unpack the game's pack file into individual blobs
    #[command(visible_alias = "u")]
    Unpack {
        /// Pack file (default from config)
        #[arg(env = "ASHEN_PACKFILE")]
        input: Option<PathBuf>,

        /// Output directory (default: input dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Warn about broken entries and keep going instead of stopping
        #[arg(long)]
        skip_errors: bool,
    },

    /// Report missing and repeated byte values in each 256-byte record
    #[command(visible_alias = "a")]
    Pattern {
        /// Captured binary stream (default from config)
        input: Option<PathBuf>,

        /// Report file (default from config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Expect 0xFF in every record as well
        #[arg(long)]
        include_ff: bool,
    },

    /// Render raw color palettes to PNG
    #[command(visible_alias = "p")]
    Palette {
        /// Palette file, or a directory to scan for palettes (default: input dir)
        input: Option<PathBuf>,

        /// Output PNG for a single file, or output directory for a scan
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Read 16-bit entries instead of 32-bit ones
        #[arg(long)]
        u16: bool,

        /// Fail on partial entries or rows instead of padding
        #[arg(long)]
        strict: bool,
    },

    /// Inflate the zlib streams of a sound bank
    #[command(visible_alias = "s")]
    Sound {
        /// Sound bank container (default from config)
        input: Option<PathBuf>,

        /// Output directory (default: <output dir>/sound)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Warn about broken entries and keep going instead of stopping
        #[arg(long)]
        skip_errors: bool,
    },

    /// Decode a UTF-16 text bank
    #[command(visible_alias = "t")]
    TextBank {
        /// Text bank file (default from config)
        input: Option<PathBuf>,

        /// Write the strings to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render raw bytes as indexed-color textures
    #[command(visible_alias = "x")]
    Texture {
        /// Texture file, or a directory of files (default: input dir)
        input: Option<PathBuf>,

        /// Output directory (default: <output dir>/textures)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Width to render at (can specify multiple, default from config)
        #[arg(short, long)]
        width: Vec<u32>,

        /// Rendered palette sheet to color with (can specify multiple, default from config)
        #[arg(short, long)]
        palette: Vec<PathBuf>,

        /// Fail on an incomplete last row instead of padding
        #[arg(long)]
        strict: bool,

        /// Use the last palette color for out-of-range bytes instead of failing
        #[arg(long)]
        clamp: bool,
    },

    /// Show or initialize the configuration file
    #[command(visible_alias = "c")]
    Configure {
        /// Write the default configuration to the config path
        #[arg(long)]
        init: bool,

        /// Overwrite an existing configuration file with --init
        #[arg(long)]
        force: bool,
    },
}
