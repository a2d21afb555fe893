//! Merge strategy selection.
//!
//! Given the classified file sets and the user's declared intent, resolve
//! which sets get merged and under what output stem. The stem policy is
//! fixed: both kinds -> "united_video", audio only -> "album", video only ->
//! "video". When both kinds survive selection the two merges remain
//! independent artifacts that happen to share a stem; the audio is never
//! muxed into the video track.

use crate::classify::ClassifiedFiles;
use crate::classify::MediaFile;

/// Output stem used when both audio and video files are merged.
pub const STEM_UNITED: &str = "united_video";
/// Output stem used when only audio files are merged.
pub const STEM_ALBUM: &str = "album";
/// Output stem used when only video files are merged.
pub const STEM_VIDEO: &str = "video";

/// The user's declared merge preference when both kinds are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePreference {
    /// Merge only the audio files, dropping the video files.
    Audio,
    /// Merge only the video files, dropping the audio files.
    Video,
    /// Merge both kinds, as two independent outputs.
    Both,
    /// No declared preference; treated the same as [`MergePreference::Both`].
    #[default]
    Unspecified,
}

/// The resolved decision of which file sets to merge and under what name.
#[derive(Debug, Clone)]
pub struct MergePlan {
    /// Audio files to merge, in input order. May be empty.
    pub audio: Vec<MediaFile>,
    /// Video files to merge, in input order. May be empty.
    pub video: Vec<MediaFile>,
    /// Fixed artifact stem ("album", "video", or "united_video").
    pub output_stem: String,
    /// Whether to attempt cover-video synthesis after the audio merge.
    pub synthesize_video: bool,
}

impl MergePlan {
    #[must_use]
    pub fn has_audio(&self) -> bool {
        !self.audio.is_empty()
    }

    #[must_use]
    pub fn has_video(&self) -> bool {
        !self.video.is_empty()
    }
}

/// Resolves the merge plan for a run.
///
/// Every input combination maps to exactly one plan. Returns `None` when
/// neither audio nor video files exist: the run is a no-op, not an error.
/// The synthesis request is only carried into the plan when the run is
/// audio-only: a synthesized still-image video shares its stem with the
/// video-merge artifact, so it would be overwritten whenever video files are
/// merged in the same run.
pub fn select_plan(
    classified: ClassifiedFiles,
    preference: MergePreference,
    synthesize_video: bool,
) -> Option<MergePlan> {
    if classified.is_empty() {
        return None;
    }

    let both_present = !classified.audio.is_empty() && !classified.video.is_empty();

    let (audio, video) = if both_present {
        match preference {
            MergePreference::Audio => (classified.audio, Vec::new()),
            MergePreference::Video => (Vec::new(), classified.video),
            MergePreference::Both | MergePreference::Unspecified => {
                (classified.audio, classified.video)
            }
        }
    } else {
        (classified.audio, classified.video)
    };

    let output_stem = match (!audio.is_empty(), !video.is_empty()) {
        (true, true) => STEM_UNITED,
        (true, false) => STEM_ALBUM,
        (false, true) => STEM_VIDEO,
        // Unreachable: classified was non-empty and selection never drops
        // both sets.
        (false, false) => return None,
    };

    Some(MergePlan {
        synthesize_video: synthesize_video && !audio.is_empty() && video.is_empty(),
        audio,
        video,
        output_stem: output_stem.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_files;
    use crate::config::DEFAULT_AUDIO_EXTENSIONS;
    use std::path::PathBuf;

    fn classified(names: &[&str]) -> ClassifiedFiles {
        classify_files(
            names.iter().map(PathBuf::from).collect::<Vec<_>>(),
            DEFAULT_AUDIO_EXTENSIONS,
        )
    }

    #[test]
    fn audio_preference_drops_video() {
        let plan = select_plan(
            classified(&["a.mp3", "v.mp4"]),
            MergePreference::Audio,
            false,
        )
        .unwrap();
        assert_eq!(plan.audio.len(), 1);
        assert!(plan.video.is_empty());
        assert_eq!(plan.output_stem, STEM_ALBUM);
    }

    #[test]
    fn video_preference_drops_audio() {
        let plan = select_plan(
            classified(&["a.mp3", "v.mp4"]),
            MergePreference::Video,
            false,
        )
        .unwrap();
        assert!(plan.audio.is_empty());
        assert_eq!(plan.video.len(), 1);
        assert_eq!(plan.output_stem, STEM_VIDEO);
    }

    #[test]
    fn both_and_unspecified_keep_both_with_united_stem() {
        for pref in [MergePreference::Both, MergePreference::Unspecified] {
            let plan = select_plan(classified(&["a.mp3", "b.mp3", "v.mp4"]), pref, false).unwrap();
            assert_eq!(plan.audio.len(), 2);
            assert_eq!(plan.video.len(), 1);
            assert_eq!(plan.output_stem, STEM_UNITED);
        }
    }

    #[test]
    fn single_kind_ignores_preference() {
        let plan = select_plan(
            classified(&["a.mp3", "b.mp3"]),
            MergePreference::Video,
            false,
        )
        .unwrap();
        assert_eq!(plan.audio.len(), 2);
        assert_eq!(plan.output_stem, STEM_ALBUM);

        let plan = select_plan(
            classified(&["v1.mp4", "v2.mp4"]),
            MergePreference::Audio,
            false,
        )
        .unwrap();
        assert_eq!(plan.video.len(), 2);
        assert_eq!(plan.output_stem, STEM_VIDEO);
    }

    #[test]
    fn empty_input_is_a_no_op() {
        assert!(select_plan(classified(&[]), MergePreference::Unspecified, true).is_none());
    }

    #[test]
    fn synthesis_requires_an_audio_only_run() {
        let plan = select_plan(classified(&["a.mp3", "v.mp4"]), MergePreference::Video, true)
            .unwrap();
        assert!(!plan.synthesize_video);

        // Both kinds merged: the video artifact owns the shared stem.
        let plan = select_plan(classified(&["a.mp3", "v.mp4"]), MergePreference::Both, true)
            .unwrap();
        assert!(!plan.synthesize_video);

        let plan = select_plan(classified(&["a.mp3", "v.mp4"]), MergePreference::Audio, true)
            .unwrap();
        assert!(plan.synthesize_video);

        let plan = select_plan(classified(&["a.mp3"]), MergePreference::Unspecified, true)
            .unwrap();
        assert!(plan.synthesize_video);
    }

    #[test]
    fn selection_preserves_input_order() {
        let plan = select_plan(
            classified(&["z.mp3", "a.mp3", "m.mp3"]),
            MergePreference::Unspecified,
            false,
        )
        .unwrap();
        let names: Vec<_> = plan
            .audio
            .iter()
            .map(|f| f.path.to_str().unwrap())
            .collect();
        assert_eq!(names, ["z.mp3", "a.mp3", "m.mp3"]);
    }
}
