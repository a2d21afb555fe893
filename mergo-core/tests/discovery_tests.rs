// mergo-core/tests/discovery_tests.rs

use mergo_core::discovery::find_media_files;
use mergo_core::error::CoreError;
use std::fs::{self, File};
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_find_media_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let input_dir = dir.path();

    File::create(input_dir.join("music1.mp3"))?;
    File::create(input_dir.join("video1.mp4"))?;
    File::create(input_dir.join("notes.txt"))?;
    fs::create_dir(input_dir.join("subdir"))?;
    File::create(input_dir.join("subdir").join("nested.mp3"))?; // not found, no recursion

    let result = find_media_files(input_dir);
    assert!(result.is_ok());
    let mut files = result.unwrap();

    // Sort for consistent comparison
    files.sort();

    assert_eq!(files.len(), 3);
    assert_eq!(files[0].file_name().unwrap(), "music1.mp3");
    assert_eq!(files[1].file_name().unwrap(), "notes.txt");
    assert_eq!(files[2].file_name().unwrap(), "video1.mp4");

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_media_files_empty() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("subdir"))?;

    let result = find_media_files(dir.path());
    assert!(result.is_err());
    match result.err().unwrap() {
        CoreError::NoFilesFound => {}
        e => panic!("Unexpected error type: {e:?}"),
    }

    dir.close()?;
    Ok(())
}

#[test]
fn test_find_media_files_nonexistent_dir() {
    let non_existent_path = PathBuf::from("surely_this_does_not_exist_42_integration");
    let result = find_media_files(&non_existent_path);
    assert!(result.is_err());
    match result.err().unwrap() {
        CoreError::Io(_) => {}
        e => panic!("Unexpected error type: {e:?}"),
    }
}
