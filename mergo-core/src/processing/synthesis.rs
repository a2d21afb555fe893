//! Cover extraction and bounded still-image video synthesis.
//!
//! The synthesis step is the one long-running operation that runs under the
//! bounded task runner: a hung encoder is killed at the deadline and the run
//! continues without the artifact.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CoreResult;
use crate::external::ffmpeg::still_video_command;
use crate::external::{get_media_info, run_cancellable, FfmpegSpawner};
use crate::runner::{run_with_timeout, TaskOutcome};
use crate::tags;
use crate::terminal;
use crate::utils::format_duration;

/// File name of the extracted cover inside the run directory.
pub const COVER_FILE_NAME: &str = "cover.jpg";

/// Extracts the embedded cover of `audio_path` into `<run_dir>/cover.jpg`.
///
/// Returns `Ok(None)` when the file carries no embedded picture; that is an
/// informational skip, not an error.
pub fn extract_cover_image(audio_path: &Path, run_dir: &Path) -> CoreResult<Option<PathBuf>> {
    match tags::find_cover(audio_path)? {
        Some(cover) => {
            let cover_path = run_dir.join(COVER_FILE_NAME);
            tags::save_cover(&cover, &cover_path)?;
            terminal::print_status("Cover image", &cover_path.display().to_string(), false);
            Ok(Some(cover_path))
        }
        None => {
            log::info!(
                "No embedded cover image found in '{}'; skipping video synthesis",
                audio_path.display()
            );
            Ok(None)
        }
    }
}

/// Synthesizes a video whose visual track is `cover_path` held for the full
/// duration of `audio_path`, bounded by `timeout`.
///
/// On timeout the encoder process is terminated, any partial output file is
/// removed, and `TaskOutcome::TimedOut` is returned. Encoder errors are
/// re-raised to the caller.
pub fn synthesize_cover_video<S>(
    spawner: S,
    timeout: Duration,
    audio_path: &Path,
    cover_path: &Path,
    output_path: &Path,
) -> CoreResult<TaskOutcome<PathBuf>>
where
    S: FfmpegSpawner + Send + 'static,
{
    if let Ok(info) = get_media_info(audio_path) {
        if let Some(duration) = info.duration {
            terminal::print_status("Video duration", &format_duration(duration), false);
        }
    }

    terminal::print_processing("Synthesizing cover video");
    let cmd = still_video_command(cover_path, audio_path, output_path);
    let label = "ffmpeg (cover video)";
    let produced = output_path.to_path_buf();

    terminal::start_spinner("Rendering cover video");
    let outcome = run_with_timeout(label, timeout, move |token| {
        run_cancellable(&spawner, label, cmd, &token)?;
        Ok(produced)
    });
    terminal::finish_spinner();

    match outcome? {
        TaskOutcome::Completed(path) => {
            super::verify_output(&path)?;
            terminal::print_success(&format!("Cover video written to {}", path.display()));
            Ok(TaskOutcome::Completed(path))
        }
        TaskOutcome::TimedOut => {
            // A half-written mp4 is not a usable artifact.
            if output_path.exists() {
                if let Err(e) = std::fs::remove_file(output_path) {
                    log::warn!(
                        "Could not remove partial output '{}': {e}",
                        output_path.display()
                    );
                }
            }
            Ok(TaskOutcome::TimedOut)
        }
    }
}
