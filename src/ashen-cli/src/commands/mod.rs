//! Command handlers for the ashen CLI

use std::path::Path;

pub mod configure;
pub mod palette;
pub mod pattern;
pub mod sound;
pub mod text_bank;
pub mod texture;
pub mod unpack;

/// Counts from one batch extraction run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    pub skipped: usize,
}

impl Summary {
    /// Log the outcome, as a warning when entries were skipped
    pub fn report(&self, what: &str, output_dir: &Path) {
        if self.skipped > 0 {
            tracing::warn!(
                "Extracted {} {} to {}, skipped {} broken entries",
                self.written,
                what,
                output_dir.display(),
                self.skipped
            );
        } else {
            tracing::info!("Extracted {} {} to {}", self.written, what, output_dir.display());
        }
    }
}
