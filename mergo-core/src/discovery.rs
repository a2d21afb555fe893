//! File discovery module for finding media files to merge.
//!
//! Scans the top level of the input directory for regular files. It does not
//! recurse; classification into audio and video happens later and is not a
//! concern of discovery.

use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult};

/// Finds media file candidates in the specified directory.
///
/// Returns the paths of all regular files directly inside `input_dir`, in
/// directory-iteration order. Subdirectories are not searched.
///
/// # Errors
///
/// * `CoreError::Io` - if the directory cannot be read
/// * `CoreError::NoFilesFound` - if the directory contains no regular files
pub fn find_media_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if path.is_file() { Some(path) } else { None }
        })
        .collect();

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}
