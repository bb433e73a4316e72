//! Palette file detection for batch conversion
//!
//! Deflated assets carry no type information, so batch palette conversion
//! has to guess which blobs are color tables. The default guess is the size
//! of a full color map; a manifest of known file names can be used instead.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::Path;

/// Size in bytes of a 256-color by 32-shade map of 32-bit entries
pub const COLOR_MAP_SIZE: u64 = 256 * 32 * 4;

/// Decides whether a file should be treated as a raw palette
pub trait PaletteDetector {
    fn is_palette(&self, path: &Path, size: u64) -> bool;
}

/// Accepts files of one exact size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeDetector {
    size: u64,
}

impl SizeDetector {
    pub fn new(size: u64) -> Self {
        SizeDetector { size }
    }
}

impl Default for SizeDetector {
    fn default() -> Self {
        SizeDetector::new(COLOR_MAP_SIZE)
    }
}

impl PaletteDetector for SizeDetector {
    fn is_palette(&self, _path: &Path, size: u64) -> bool {
        size == self.size
    }
}

/// Accepts files whose name is listed, regardless of size
#[derive(Debug, Clone, Default)]
pub struct ManifestDetector {
    names: HashSet<OsString>,
}

impl ManifestDetector {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        ManifestDetector {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl PaletteDetector for ManifestDetector {
    fn is_palette(&self, path: &Path, _size: u64) -> bool {
        path.file_name()
            .is_some_and(|name| self.names.contains(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_detector_default() {
        let detector = SizeDetector::default();
        assert!(detector.is_palette(Path::new("7F5464.dat"), 32768));
        assert!(!detector.is_palette(Path::new("7F5464.dat"), 32764));
        assert!(!detector.is_palette(Path::new("7F5464.dat"), 0));
    }

    #[test]
    fn test_manifest_detector() {
        let detector = ManifestDetector::new(["7F5464.dat", "1EF20.dat"]);
        assert!(detector.is_palette(Path::new("deflated/7F5464.dat"), 12));
        assert!(detector.is_palette(Path::new("1EF20.dat"), COLOR_MAP_SIZE));
        assert!(!detector.is_palette(Path::new("deflated/BBC974.dat"), COLOR_MAP_SIZE));
    }

    #[test]
    fn test_detectors_as_trait_objects() {
        let detectors: Vec<Box<dyn PaletteDetector>> = vec![
            Box::new(SizeDetector::new(8)),
            Box::new(ManifestDetector::new(["a.dat"])),
        ];
        let hits = detectors
            .iter()
            .filter(|d| d.is_palette(Path::new("a.dat"), 8))
            .count();
        assert_eq!(hits, 2);
    }
}
