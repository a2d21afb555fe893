//! Merge orchestration for a single run.
//!
//! The pipeline is strictly sequential: audio merge (if any audio files),
//! then the optional bounded cover-video synthesis, then video merge (if any
//! video files). A failure in either merge aborts the run; only the bounded
//! synthesis branch is isolated, so its failure or timeout degrades the run
//! instead of ending it.

use std::path::PathBuf;

use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::external::FfmpegSpawner;
use crate::processing::{audio, synthesis, video};
use crate::runner::TaskOutcome;
use crate::strategy::MergePlan;
use crate::terminal;

/// How the optional synthesis branch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisStatus {
    /// The cover video was produced at the contained path.
    Completed(PathBuf),
    /// The deadline elapsed; the encoder was terminated.
    TimedOut,
    /// The branch failed; the run continued without the artifact.
    Failed(String),
    /// The merged audio carried no embedded cover image.
    NoCover,
}

/// Result of one merge run.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Every artifact written into the run directory, in creation order.
    pub artifacts: Vec<PathBuf>,
    /// Outcome of the synthesis branch; `None` when it was never requested.
    pub synthesis: Option<SynthesisStatus>,
}

/// Executes `plan` under `config`, producing the run's artifacts.
///
/// The run directory `<output_root>/<run_name>` is created once up front.
/// Two runs over the same inputs with different run names are fully
/// independent; nothing is cached between runs.
pub fn run_merge<S>(spawner: &S, config: &CoreConfig, plan: &MergePlan) -> CoreResult<MergeOutcome>
where
    S: FfmpegSpawner + Clone + Send + 'static,
{
    config.validate()?;

    let run_dir = config.run_dir();
    std::fs::create_dir_all(&run_dir)?;
    log::debug!("Run directory: {}", run_dir.display());

    let mut outcome = MergeOutcome {
        artifacts: Vec::new(),
        synthesis: None,
    };

    if plan.has_audio() {
        let merged_audio =
            audio::merge_audio_files(spawner, &run_dir, &plan.audio, &plan.output_stem)?;
        outcome.artifacts.push(merged_audio.clone());

        if plan.synthesize_video {
            outcome.synthesis = Some(run_synthesis_branch(
                spawner,
                config,
                &run_dir,
                &merged_audio,
                &plan.output_stem,
                &mut outcome.artifacts,
            ));
        }
    }

    if plan.has_video() {
        let merged_video =
            video::merge_video_files(spawner, &run_dir, &plan.video, &plan.output_stem)?;
        outcome.artifacts.push(merged_video);
    }

    Ok(outcome)
}

/// The isolated synthesis branch: cover extraction plus the bounded encoder
/// run. Every failure mode here is caught and reported through the returned
/// status so the run can continue.
fn run_synthesis_branch<S>(
    spawner: &S,
    config: &CoreConfig,
    run_dir: &std::path::Path,
    merged_audio: &std::path::Path,
    output_stem: &str,
    artifacts: &mut Vec<PathBuf>,
) -> SynthesisStatus
where
    S: FfmpegSpawner + Clone + Send + 'static,
{
    let cover_path = match synthesis::extract_cover_image(merged_audio, run_dir) {
        Ok(Some(path)) => {
            artifacts.push(path.clone());
            path
        }
        Ok(None) => return SynthesisStatus::NoCover,
        Err(e) => {
            log::warn!("Cover extraction failed: {e}; continuing without cover video");
            return SynthesisStatus::Failed(e.to_string());
        }
    };

    let output_path = run_dir.join(format!("{output_stem}.mp4"));
    match synthesis::synthesize_cover_video(
        spawner.clone(),
        config.synthesis_timeout,
        merged_audio,
        &cover_path,
        &output_path,
    ) {
        Ok(TaskOutcome::Completed(path)) => {
            artifacts.push(path.clone());
            SynthesisStatus::Completed(path)
        }
        Ok(TaskOutcome::TimedOut) => {
            terminal::print_error(
                "Cover video synthesis timed out",
                &format!(
                    "Gave up after {}s; continuing without the cover video",
                    config.synthesis_timeout.as_secs()
                ),
                None,
            );
            SynthesisStatus::TimedOut
        }
        Err(e) => {
            log::warn!("Cover video synthesis failed: {e}; continuing without it");
            SynthesisStatus::Failed(e.to_string())
        }
    }
}
