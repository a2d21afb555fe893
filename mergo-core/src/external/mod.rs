//! Interactions with external command-line tools.
//!
//! This module encapsulates everything that touches ffmpeg and ffprobe: the
//! process-spawning seam (traits plus the ffmpeg-sidecar implementation),
//! the concrete argument builders for the merge and synthesis commands, and
//! dependency presence checks. Consumers inject an [`FfmpegSpawner`] so the
//! pipeline can be exercised in tests without a real encoder.

use std::io;
use std::process::{Command, Stdio};

use crate::error::{command_start_error, CoreError, CoreResult};

/// FFmpeg argument builders for the merge and synthesis commands.
pub mod ffmpeg;

/// Traits and implementations for executing ffmpeg commands.
pub mod ffmpeg_executor;

/// ffprobe-backed media information lookup.
pub mod ffprobe_executor;

// Re-exports so consumers (and test mocks) can name the seam types without
// importing from submodules.
pub use ffmpeg_executor::{
    run_cancellable, run_to_completion, FfmpegProcess, FfmpegSpawner, SidecarProcess,
    SidecarSpawner,
};
pub use ffprobe_executor::{get_media_info, MediaInfo};

// Re-exported sidecar types that appear in the seam's signatures.
pub use ffmpeg_sidecar::command::FfmpegCommand;
pub use ffmpeg_sidecar::event::FfmpegEvent;

/// Checks that a required external command is available and executable.
///
/// Runs `<cmd_name> -version` with output discarded. Used at startup for
/// ffmpeg and ffprobe so a missing tool surfaces as one clear error instead
/// of a mid-run spawn failure.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(command_start_error(cmd_name, e))
        }
    }
}
