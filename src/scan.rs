//! Source tree discovery and output path mapping.
//!
//! ## Layout
//!
//! The output tree mirrors the source tree. Every file keeps its relative
//! directory and stem; the extension is planned as `.jpg` and switched to
//! `.png` later for images that carry an alpha channel:
//!
//! ```text
//! photos/                         web/
//! ├── 2024/                       ├── 2024/
//! │   ├── beach.JPG        →      │   ├── beach.jpg
//! │   └── logo.png  (alpha) →     │   └── logo.png
//! └── scan.tiff            →      └── scan.jpg
//! ```
//!
//! Only regular files with a supported extension (case-insensitive) are
//! picked up. Symlinks are not followed.

use crate::imaging::supported_input_extensions;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Source directory does not exist: {0}")]
    SourceNotFound(PathBuf),
    #[error("Source is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Failed to read source tree: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Whether `path` has one of the extensions we can decode.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            supported_input_extensions()
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

/// Recursively collect supported images under `root`, sorted by path.
pub fn discover_images(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::SourceNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() && is_supported_image(entry.path()) {
            images.push(entry.into_path());
        }
    }
    images.sort();
    Ok(images)
}

/// Mirror `source` (which lives under `source_root`) into `output_root`,
/// planning a `.jpg` extension.
///
/// Falls back to the bare file name if `source` is not under `source_root`.
pub fn output_path(source: &Path, source_root: &Path, output_root: &Path) -> PathBuf {
    let relative = source
        .strip_prefix(source_root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| source.file_name().map(PathBuf::from).unwrap_or_default());
    output_root.join(relative).with_extension("jpg")
}
