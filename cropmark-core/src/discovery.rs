//! Discovery of video files eligible for processing.
//!
//! A file path is used as-is; a directory is scanned recursively for .mkv
//! files (case-insensitive). Results are sorted so batch runs visit files in
//! a stable order.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{CoreError, CoreResult};

/// Finds video files eligible for processing under the given path.
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - paths of the discovered .mkv files
/// * `Err(CoreError::Io)` - the path does not exist or is unreadable
/// * `Err(CoreError::NoFilesFound)` - a directory scan matched nothing
pub fn find_processable_files(input_path: &Path) -> CoreResult<Vec<PathBuf>> {
    // Surfaces a proper NotFound error for missing paths before any scan.
    let metadata = std::fs::metadata(input_path)?;

    if metadata.is_file() {
        return Ok(vec![input_path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(input_path) {
        let entry = entry.map_err(|e| {
            CoreError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::other(format!("walk failed under {}", input_path.display()))
            }))
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let is_mkv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("mkv"));
        if is_mkv {
            files.push(path.to_path_buf());
        }
    }

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }

    files.sort();
    Ok(files)
}
