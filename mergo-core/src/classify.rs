//! Media classification: partitioning a file set into audio and video.
//!
//! Classification is a pure function over a sequence of paths. Every input
//! path lands in exactly one of the two output sequences, and relative order
//! within each sequence matches the input order. Files whose extension is not
//! in the recognized audio set (including files with no extension at all) are
//! treated as video.

use std::path::PathBuf;

/// The kind of a classified media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

/// A file path together with its classification.
///
/// Immutable once created; a read-only view over a pre-existing file on
/// disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub path: PathBuf,
    pub kind: MediaKind,
    /// Lowercased extension, empty when the path has none.
    pub extension: String,
}

impl MediaFile {
    /// Classifies a single path against the recognized audio extensions.
    pub fn classify<S: AsRef<str>>(path: PathBuf, audio_extensions: &[S]) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let kind = if audio_extensions
            .iter()
            .any(|e| e.as_ref().eq_ignore_ascii_case(&extension))
        {
            MediaKind::Audio
        } else {
            MediaKind::Video
        };

        Self {
            path,
            kind,
            extension,
        }
    }

    /// True when the file is an mp3; tag copying applies only to these.
    #[must_use]
    pub fn is_mp3(&self) -> bool {
        self.extension == "mp3"
    }
}

/// Result of classifying a file set, preserving input order per kind.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedFiles {
    pub audio: Vec<MediaFile>,
    pub video: Vec<MediaFile>,
}

impl ClassifiedFiles {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.audio.is_empty() && self.video.is_empty()
    }
}

/// Partitions `paths` into audio and video files.
///
/// An empty input yields two empty sequences; there are no error cases.
pub fn classify_files<I, S>(paths: I, audio_extensions: &[S]) -> ClassifiedFiles
where
    I: IntoIterator<Item = PathBuf>,
    S: AsRef<str>,
{
    let mut classified = ClassifiedFiles::default();
    for path in paths {
        let file = MediaFile::classify(path, audio_extensions);
        match file.kind {
            MediaKind::Audio => classified.audio.push(file),
            MediaKind::Video => classified.video.push(file),
        }
    }
    classified
}
