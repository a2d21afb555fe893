//! Temporary file management utilities.
//!
//! Scratch files (ffmpeg concat list files) live in a per-run temporary
//! directory created with the tempfile crate, which cleans up via Drop even
//! on error paths.

use std::path::{Path, PathBuf};

use tempfile::{Builder as TempFileBuilder, TempDir};

use crate::error::CoreResult;

/// Creates a temporary directory with prefix. Auto-cleaned when dropped.
pub fn create_temp_dir(base_dir: &Path, prefix: &str) -> CoreResult<TempDir> {
    std::fs::create_dir_all(base_dir)?;

    Ok(TempFileBuilder::new()
        .prefix(prefix)
        .tempdir_in(base_dir)?)
}

/// Returns a temporary file path with random suffix. Does not create the file.
pub fn create_temp_file_path(dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    use rand::distributions::Alphanumeric;
    use rand::{thread_rng, Rng};

    let random_suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(6)
        .map(char::from)
        .collect();

    let filename = format!("{prefix}_{random_suffix}.{extension}");
    dir.join(filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_file_paths_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let a = create_temp_file_path(dir.path(), "concat", "txt");
        let b = create_temp_file_path(dir.path(), "concat", "txt");
        assert_ne!(a, b);
        assert_eq!(a.extension().unwrap(), "txt");
    }
}
