//! File system utilities for batch conversion

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Walk the regular files directly inside a directory, in name order
///
/// Hidden files (names starting with a dot) are skipped. Calls the handler
/// for each file with its size in bytes.
pub fn walk_files<F>(path: &Path, mut handler: F) -> Result<()>
where
    F: FnMut(&Path, u64) -> Result<()>,
{
    for entry in walkdir::WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry =
            entry.with_context(|| format!("Failed to read directory {}", path.display()))?;

        if !entry.file_type().is_file() || is_hidden(entry.path()) {
            continue;
        }

        let size = entry
            .metadata()
            .with_context(|| format!("Failed to stat {}", entry.path().display()))?
            .len();

        handler(entry.path(), size)?;
    }

    Ok(())
}

/// Collect the regular files directly inside a directory, in name order
pub fn collect_files(path: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    walk_files(path, |file_path, _| {
        files.push(file_path.to_path_buf());
        Ok(())
    })?;

    Ok(files)
}

/// File name without its extension, for naming outputs
pub fn file_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .with_context(|| format!("Failed to get file stem of {}", path.display()))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
