// mergo-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use mergo_core::MergePreference;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Mergo: Media merging tool",
    long_about = "Merges audio and video files into single artifacts using ffmpeg via the mergo-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merges the media files found in a directory
    Merge(MergeArgs),
}

#[derive(Parser, Debug)]
pub struct MergeArgs {
    /// Directory containing the media files to merge
    #[arg(short = 'i', long = "input", required = true, value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Root directory for run outputs (defaults to INPUT_DIR)
    #[arg(short = 'o', long = "output", value_name = "OUTPUT_ROOT")]
    pub output_root: Option<PathBuf>,

    /// Name for the run output directory (skips the interactive prompt)
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Which kinds to merge when both are present (skips the prompt)
    #[arg(long, value_enum, value_name = "KIND")]
    pub prefer: Option<PreferArg>,

    /// Synthesize a cover video from the merged audio (skips the prompt)
    #[arg(long, conflicts_with = "no_synthesize")]
    pub synthesize: bool,

    /// Never synthesize a cover video (skips the prompt)
    #[arg(long)]
    pub no_synthesize: bool,

    /// Never prompt; unanswered choices fall back to their defaults
    #[arg(long, default_value_t = false)]
    pub non_interactive: bool,

    /// Comma-separated extensions classified as audio (default: mp3,wav,flac)
    #[arg(long = "audio-ext", value_delimiter = ',', value_name = "EXTS")]
    pub audio_extensions: Option<Vec<String>>,

    /// Override the cover-video synthesis timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    pub synthesis_timeout: Option<u64>,
}

/// Merge preference as a CLI flag value.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferArg {
    Audio,
    Video,
    Both,
}

impl From<PreferArg> for MergePreference {
    fn from(arg: PreferArg) -> Self {
        match arg {
            PreferArg::Audio => MergePreference::Audio,
            PreferArg::Video => MergePreference::Video,
            PreferArg::Both => MergePreference::Both,
        }
    }
}
