//! Audio merging: concatenate the audio set into a single mp3 and preserve
//! the first file's metadata tags.

use std::path::{Path, PathBuf};

use crate::classify::MediaFile;
use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg::{audio_concat_command, write_concat_list};
use crate::external::{run_to_completion, FfmpegSpawner};
use crate::tags;
use crate::temp_files;
use crate::terminal;

/// Merges `files` into `<run_dir>/<output_stem>.mp3`, in input order.
///
/// Tags are copied from the first source file onto the merged output, but
/// only when that first file is an mp3; other formats carry no ID3 tag to
/// copy.
pub fn merge_audio_files<S: FfmpegSpawner>(
    spawner: &S,
    run_dir: &Path,
    files: &[MediaFile],
    output_stem: &str,
) -> CoreResult<PathBuf> {
    if files.is_empty() {
        return Err(CoreError::OperationFailed(
            "No audio files to merge".to_string(),
        ));
    }

    let output_path = run_dir.join(format!("{output_stem}.mp3"));
    terminal::print_processing(&format!("Merging {} audio file(s)", files.len()));

    let scratch = temp_files::create_temp_dir(run_dir, "mergo_scratch")?;
    let list_path = write_concat_list(scratch.path(), files)?;

    terminal::start_spinner("Exporting merged audio");
    let result = run_to_completion(
        spawner,
        "ffmpeg (audio concat)",
        audio_concat_command(&list_path, &output_path),
    );
    terminal::finish_spinner();
    result?;
    super::verify_output(&output_path)?;

    let first = &files[0];
    if first.is_mp3() {
        tags::copy_tags(&first.path, &output_path)?;
    } else {
        log::debug!(
            "First audio file '{}' is not an mp3; skipping tag copy",
            first.path.display()
        );
    }

    terminal::print_success(&format!("Audio merged to {}", output_path.display()));
    Ok(output_path)
}
