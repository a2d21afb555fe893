//! FFmpeg argument building for the merge and synthesis commands.
//!
//! Concatenation goes through ffmpeg's concat demuxer: the input paths are
//! written to a scratch list file which a single ffmpeg invocation consumes.
//! Outputs are re-encoded (libmp3lame for audio, libx264/aac for video) so
//! heterogeneous inputs concatenate cleanly; stream-copy would fail on the
//! first parameter mismatch between source files.

use std::io::Write;
use std::path::{Path, PathBuf};

use ffmpeg_sidecar::command::FfmpegCommand;

use crate::classify::MediaFile;
use crate::error::{CoreError, CoreResult};
use crate::temp_files;

/// Writes an ffmpeg concat-demuxer list file for `files` into `dir`.
///
/// Each line has the form `file '<path>'`. Single quotes inside paths are
/// escaped the way the concat demuxer expects (`'\''`).
pub fn write_concat_list(dir: &Path, files: &[MediaFile]) -> CoreResult<PathBuf> {
    let list_path = temp_files::create_temp_file_path(dir, "concat", "txt");
    let mut list = std::fs::File::create(&list_path)?;

    for file in files {
        let path = file.path.canonicalize().map_err(|e| {
            CoreError::PathError(format!(
                "Cannot resolve input file '{}': {e}",
                file.path.display()
            ))
        })?;
        writeln!(list, "file '{}'", escape_concat_path(&path))?;
    }

    Ok(list_path)
}

fn escape_concat_path(path: &Path) -> String {
    path.to_string_lossy().replace('\'', "'\\''")
}

/// Builds the command that concatenates audio files into a single mp3.
///
/// `-vn` drops attached pictures some mp3s carry as a video stream; tags are
/// copied onto the output in a separate explicit step.
pub fn audio_concat_command(list_path: &Path, output_path: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner();
    cmd.overwrite();
    cmd.args(["-f", "concat", "-safe", "0"]);
    cmd.input(list_path.to_string_lossy().as_ref());
    cmd.arg("-vn");
    cmd.args(["-c:a", "libmp3lame", "-q:a", "2"]);
    cmd.output(output_path.to_string_lossy().as_ref());
    cmd
}

/// Builds the command that concatenates video files into a single mp4.
pub fn video_concat_command(list_path: &Path, output_path: &Path) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner();
    cmd.overwrite();
    cmd.args(["-f", "concat", "-safe", "0"]);
    cmd.input(list_path.to_string_lossy().as_ref());
    cmd.args(["-c:v", "libx264", "-pix_fmt", "yuv420p"]);
    cmd.args(["-c:a", "aac"]);
    cmd.output(output_path.to_string_lossy().as_ref());
    cmd
}

/// Builds the cover-video synthesis command: a static image looped for the
/// full duration of the audio track.
///
/// Built quiet (`-v error -nostats`) because it runs under the cancellable
/// executor, which does not drain ffmpeg's output pipes.
pub fn still_video_command(
    image_path: &Path,
    audio_path: &Path,
    output_path: &Path,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.hide_banner();
    cmd.overwrite();
    cmd.args(["-v", "error", "-nostats"]);
    cmd.args(["-loop", "1"]);
    cmd.input(image_path.to_string_lossy().as_ref());
    cmd.input(audio_path.to_string_lossy().as_ref());
    cmd.args(["-c:v", "libx264", "-tune", "stillimage", "-pix_fmt", "yuv420p"]);
    cmd.args(["-c:a", "aac", "-b:a", "192k"]);
    cmd.arg("-shortest");
    cmd.output(output_path.to_string_lossy().as_ref());
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_files;
    use crate::config::DEFAULT_AUDIO_EXTENSIONS;

    fn args_of(cmd: &FfmpegCommand) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn position(args: &[String], needle: &str) -> usize {
        args.iter()
            .position(|a| a == needle)
            .unwrap_or_else(|| panic!("'{needle}' missing from {args:?}"))
    }

    #[test]
    fn concat_list_preserves_order_and_escapes_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("b side.mp3");
        let second = dir.path().join("it's a.mp3");
        std::fs::write(&first, b"x").unwrap();
        std::fs::write(&second, b"x").unwrap();

        let files = classify_files(vec![first, second], DEFAULT_AUDIO_EXTENSIONS).audio;
        let list_path = write_concat_list(dir.path(), &files).unwrap();
        let contents = std::fs::read_to_string(&list_path).unwrap();

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("b side.mp3"));
        assert!(lines[1].contains("it'\\''s a.mp3"));
        assert!(lines.iter().all(|l| l.starts_with("file '")));
    }

    #[test]
    fn audio_concat_args_are_ordered() {
        let cmd = audio_concat_command(Path::new("/tmp/list.txt"), Path::new("/tmp/album.mp3"));
        let args = args_of(&cmd);

        // The concat demuxer options must precede the input they describe.
        assert!(position(&args, "concat") < position(&args, "-i"));
        assert!(position(&args, "-i") < position(&args, "libmp3lame"));
        assert_eq!(args.last().unwrap(), "/tmp/album.mp3");
        assert!(args.contains(&"-vn".to_string()));
    }

    #[test]
    fn still_video_args_loop_the_image_before_the_audio() {
        let cmd = still_video_command(
            Path::new("/tmp/cover.jpg"),
            Path::new("/tmp/album.mp3"),
            Path::new("/tmp/album.mp4"),
        );
        let args = args_of(&cmd);

        let image_pos = position(&args, "/tmp/cover.jpg");
        let audio_pos = position(&args, "/tmp/album.mp3");
        assert!(position(&args, "-loop") < image_pos);
        assert!(image_pos < audio_pos);
        assert!(args.contains(&"stillimage".to_string()));
        assert!(args.contains(&"-shortest".to_string()));
        assert!(args.contains(&"-nostats".to_string()));
        assert_eq!(args.last().unwrap(), "/tmp/album.mp4");
    }
}
