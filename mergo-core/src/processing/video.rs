//! Video merging: concatenate the video set into a single mp4.

use std::path::{Path, PathBuf};

use crate::classify::MediaFile;
use crate::error::{CoreError, CoreResult};
use crate::external::ffmpeg::{video_concat_command, write_concat_list};
use crate::external::{run_to_completion, FfmpegSpawner};
use crate::temp_files;
use crate::terminal;

/// Merges `files` into `<run_dir>/<output_stem>.mp4`, preserving input order.
pub fn merge_video_files<S: FfmpegSpawner>(
    spawner: &S,
    run_dir: &Path,
    files: &[MediaFile],
    output_stem: &str,
) -> CoreResult<PathBuf> {
    if files.is_empty() {
        return Err(CoreError::OperationFailed(
            "No video files to merge".to_string(),
        ));
    }

    let output_path = run_dir.join(format!("{output_stem}.mp4"));
    terminal::print_processing(&format!("Merging {} video file(s)", files.len()));

    let scratch = temp_files::create_temp_dir(run_dir, "mergo_scratch")?;
    let list_path = write_concat_list(scratch.path(), files)?;

    terminal::start_spinner("Exporting merged video");
    let result = run_to_completion(
        spawner,
        "ffmpeg (video concat)",
        video_concat_command(&list_path, &output_path),
    );
    terminal::finish_spinner();
    result?;
    super::verify_output(&output_path)?;

    terminal::print_success(&format!("Video merged to {}", output_path.display()));
    Ok(output_path)
}
