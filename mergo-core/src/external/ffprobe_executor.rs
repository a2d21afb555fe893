//! ffprobe integration for media information lookup.
//!
//! Used after a merge to report artifact durations, and by the synthesis
//! step to log the audio duration the cover video will span.

use std::path::Path;

use ffprobe::{ffprobe, FfProbeError};

use crate::error::{command_failed_error, command_start_error, CoreError, CoreResult};

/// Struct containing media information.
#[derive(Debug, Default, Clone)]
pub struct MediaInfo {
    /// Duration of the media in seconds.
    pub duration: Option<f64>,
    /// Width of the video stream, if any.
    pub width: Option<i64>,
    /// Height of the video stream, if any.
    pub height: Option<i64>,
}

/// Gets media information for a given input file.
pub fn get_media_info(input_path: &Path) -> CoreResult<MediaInfo> {
    log::debug!("Running ffprobe on: {}", input_path.display());
    match ffprobe(input_path) {
        Ok(metadata) => {
            let duration = metadata
                .format
                .duration
                .as_deref()
                .and_then(|d| d.parse::<f64>().ok());

            let mut info = MediaInfo {
                duration,
                ..Default::default()
            };

            if let Some(video_stream) = metadata
                .streams
                .iter()
                .find(|s| s.codec_type.as_deref() == Some("video"))
            {
                info.width = video_stream.width;
                info.height = video_stream.height;
            }

            Ok(info)
        }
        Err(err) => {
            log::warn!("ffprobe failed for {}: {err:?}", input_path.display());
            Err(map_ffprobe_error(err))
        }
    }
}

fn map_ffprobe_error(err: FfProbeError) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error("ffprobe", io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error("ffprobe", output.status, stderr)
        }
        FfProbeError::Deserialize(err) => {
            CoreError::FfprobeParse(format!("output deserialization: {err}"))
        }
        _ => CoreError::FfprobeParse(format!("unknown ffprobe error: {err:?}")),
    }
}
