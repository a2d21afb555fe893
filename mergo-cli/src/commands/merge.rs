//! Implementation of the 'merge' subcommand.
//!
//! Sequences the interactive flow: discover and classify the input files,
//! resolve the run name and merge preference (flags first, prompts second,
//! defaults last), then hand the resolved plan to mergo-core and report the
//! produced artifacts.

use crate::cli::MergeArgs;
use crate::error::CliResult;
use crate::prompt::{parse_preference, parse_yes_no, Prompter};

use mergo_core::terminal;
use mergo_core::{
    check_dependency, classify_files, find_media_files, format_bytes, format_duration,
    get_media_info, run_merge, select_plan, timestamp_run_name, CoreConfig, CoreError,
    MergeOutcome, MergePlan, MergePreference, SidecarSpawner, SynthesisStatus,
    DEFAULT_PROMPT_TIMEOUT,
};

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

/// Discovers media files in the input directory. An empty directory is a
/// no-op, not an error.
fn discover_files(input_dir: &Path) -> CliResult<Vec<PathBuf>> {
    match find_media_files(input_dir) {
        Ok(files) => Ok(files),
        Err(CoreError::NoFilesFound) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Resolves the run name: flag, then timed prompt, then timestamp default.
fn resolve_run_name(args: &MergeArgs, prompter: Option<&Prompter>) -> String {
    if let Some(name) = &args.name {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    if let Some(prompter) = prompter {
        let answer = prompter.ask_with_deadline(
            "Enter a name for the merged output (or wait 5 seconds for default): ",
            DEFAULT_PROMPT_TIMEOUT,
        );
        if let Some(answer) = answer {
            let trimmed = answer.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }

    timestamp_run_name()
}

/// Resolves the merge preference: flag, then prompt (only when both kinds
/// are present), then unspecified.
fn resolve_preference(
    args: &MergeArgs,
    both_present: bool,
    prompter: Option<&Prompter>,
) -> MergePreference {
    if let Some(prefer) = args.prefer {
        return prefer.into();
    }

    if both_present {
        if let Some(prompter) = prompter {
            return prompter.ask_choice(
                "Both audio and video files are present. Merge audio, video, or both? (audio/video/both): ",
                parse_preference,
                MergePreference::Unspecified,
            );
        }
    }

    MergePreference::Unspecified
}

/// Resolves the synthesis choice: flags, then prompt (only when audio files
/// are present), then no.
fn resolve_synthesize(
    args: &MergeArgs,
    audio_present: bool,
    prompter: Option<&Prompter>,
) -> bool {
    if args.synthesize {
        return true;
    }
    if args.no_synthesize {
        return false;
    }

    if audio_present {
        if let Some(prompter) = prompter {
            return prompter.ask_choice(
                "Create a video from the merged audio using its cover image? (yes/no): ",
                parse_yes_no,
                false,
            );
        }
    }

    false
}

fn display_plan(config: &CoreConfig, plan: &MergePlan) {
    terminal::print_section("Merge");
    terminal::print_status("Output dir", &config.run_dir().display().to_string(), false);
    if plan.has_audio() {
        terminal::print_status("Audio files", &plan.audio.len().to_string(), false);
    }
    if plan.has_video() {
        terminal::print_status("Video files", &plan.video.len().to_string(), false);
    }
    if plan.synthesize_video {
        terminal::print_status("Cover video", "requested", false);
    }
}

fn display_results(outcome: &MergeOutcome, total_start_time: Instant) {
    terminal::print_section("Merge complete");

    if outcome.artifacts.is_empty() {
        warn!("No artifacts were produced.");
    }

    for artifact in &outcome.artifacts {
        let name = artifact
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| artifact.display().to_string());

        let mut details = Vec::new();
        if let Ok(metadata) = std::fs::metadata(artifact) {
            details.push(format_bytes(metadata.len()));
        }
        if let Some(duration) = get_media_info(artifact).ok().and_then(|i| i.duration) {
            details.push(format_duration(duration));
        }

        terminal::print_status(&name, &details.join(", "), false);
    }

    match &outcome.synthesis {
        Some(SynthesisStatus::TimedOut) => {
            terminal::print_status("Cover video", "timed out, skipped", true);
        }
        Some(SynthesisStatus::Failed(reason)) => {
            terminal::print_status("Cover video", &format!("failed, skipped ({reason})"), true);
        }
        Some(SynthesisStatus::NoCover) => {
            terminal::print_status("Cover video", "no embedded cover image, skipped", false);
        }
        Some(SynthesisStatus::Completed(_)) | None => {}
    }

    let total_elapsed = total_start_time.elapsed();
    terminal::print_status(
        "Total time",
        &format_duration(total_elapsed.as_secs_f64()),
        true,
    );
}

/// Runs the merge flow end to end and reports the results.
pub fn run_merge_command(args: MergeArgs) -> CliResult<()> {
    let total_start_time = Instant::now();

    let input_dir = args.input_dir.canonicalize().map_err(|e| {
        CoreError::PathError(format!(
            "Invalid input directory '{}': {e}",
            args.input_dir.display()
        ))
    })?;
    let output_root = args.output_root.clone().unwrap_or_else(|| input_dir.clone());

    let interactive = !args.non_interactive && std::io::stdin().is_terminal();

    let audio_extensions: Vec<String> = args
        .audio_extensions
        .clone()
        .unwrap_or_else(|| {
            mergo_core::DEFAULT_AUDIO_EXTENSIONS
                .iter()
                .map(|e| (*e).to_string())
                .collect()
        })
        .iter()
        .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
        .collect();

    let files = discover_files(&input_dir)?;
    let classified = classify_files(files, &audio_extensions);

    terminal::print_section("Scan");
    terminal::print_status("Input dir", &input_dir.display().to_string(), false);
    terminal::print_status("Audio files", &classified.audio.len().to_string(), false);
    terminal::print_status("Video files", &classified.video.len().to_string(), false);

    if classified.is_empty() {
        info!("No media files found in '{}'; nothing to merge.", input_dir.display());
        return Ok(());
    }

    let prompter = if interactive {
        Some(Prompter::new())
    } else {
        None
    };

    let both_present = !classified.audio.is_empty() && !classified.video.is_empty();
    let audio_present = !classified.audio.is_empty();

    let run_name = resolve_run_name(&args, prompter.as_ref());
    let preference = resolve_preference(&args, both_present, prompter.as_ref());
    let synthesize = resolve_synthesize(&args, audio_present, prompter.as_ref());

    let Some(plan) = select_plan(classified, preference, synthesize) else {
        info!("Nothing to merge.");
        return Ok(());
    };

    let mut config = CoreConfig::new(input_dir, output_root, run_name);
    config.audio_extensions = audio_extensions;
    if let Some(secs) = args.synthesis_timeout {
        config.synthesis_timeout = Duration::from_secs(secs);
    }
    config.validate()?;

    check_dependency("ffmpeg")?;
    if let Err(e) = check_dependency("ffprobe") {
        warn!("ffprobe not found; duration reporting disabled ({e})");
    }

    debug!("Run started: {}", chrono::Local::now());
    display_plan(&config, &plan);

    match run_merge(&SidecarSpawner, &config, &plan) {
        Ok(outcome) => {
            display_results(&outcome, total_start_time);
            Ok(())
        }
        Err(e) => {
            terminal::print_error("Fatal error during merge", &e.to_string(), None);
            Err(e)
        }
    }
}
