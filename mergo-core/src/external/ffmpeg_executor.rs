//! FFmpeg process management and abstraction.
//!
//! Defines the trait seam between the merge pipeline and ffmpeg itself:
//! [`FfmpegSpawner`] creates an [`FfmpegProcess`], and the two run helpers
//! drive a process to completion either by draining its event stream
//! ([`run_to_completion`]) or by polling its exit status under a
//! [`CancelToken`] ([`run_cancellable`]). The concrete implementation wraps
//! ffmpeg-sidecar; tests substitute mocks through the same traits.

use std::process::ExitStatus;
use std::thread;

use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};

use crate::error::{
    command_failed_error, command_start_error, command_wait_error, CoreError, CoreResult,
};
use crate::runner::{CancelToken, CANCEL_POLL_INTERVAL};

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler
    /// closure. Returns once the event stream ends (process exit).
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Non-blocking exit-status check.
    fn try_status(&mut self) -> CoreResult<Option<ExitStatus>>;

    /// Forcibly terminates the process.
    fn kill(&mut self) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an [`FfmpegProcess`].
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;

    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing
/// [`FfmpegProcess`].
pub struct SidecarProcess(SidecarChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e| {
            log::error!("Failed to get ffmpeg event iterator: {e}");
            command_failed_error(
                "ffmpeg (event iterator)",
                ExitStatus::default(),
                e.to_string(),
            )
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn try_status(&mut self) -> CoreResult<Option<ExitStatus>> {
        self.0
            .as_inner_mut()
            .try_wait()
            .map_err(|e| command_wait_error("ffmpeg", e))
    }

    fn kill(&mut self) -> CoreResult<()> {
        self.0
            .kill()
            .map_err(|e| command_wait_error("ffmpeg (kill)", e))
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0.wait().map_err(|e| command_wait_error("ffmpeg", e))
    }
}

/// Concrete implementation of [`FfmpegSpawner`] using ffmpeg-sidecar.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg", e))
    }
}

/// Spawns `cmd` and drives it to completion, collecting error output.
///
/// Error-level log lines are gathered so a non-zero exit carries the
/// encoder's own diagnostics in the returned [`CoreError::CommandFailed`].
pub fn run_to_completion<S: FfmpegSpawner>(
    spawner: &S,
    label: &str,
    cmd: FfmpegCommand,
) -> CoreResult<()> {
    log::debug!("Running {label}: {cmd:?}");
    let mut process = spawner.spawn(cmd)?;

    let mut error_lines: Vec<String> = Vec::new();
    process.handle_events(|event| {
        match event {
            FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, line) => {
                log::debug!("[{label}] {line}");
                error_lines.push(line);
            }
            FfmpegEvent::Error(line) => {
                log::debug!("[{label}] {line}");
                error_lines.push(line);
            }
            _ => {}
        }
        Ok(())
    })?;

    let status = process.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(command_failed_error(label, status, error_lines.join("\n")))
    }
}

/// Spawns `cmd` and polls it to completion, honoring the cancel token.
///
/// When the token trips, the process is forcibly killed and then reaped
/// before this function returns, so a cancelled run leaves no zombie behind.
/// Commands run through here must be built quiet (`-v error -nostats`): the
/// event pipes are not drained, and a chatty process would fill them and
/// stall itself.
pub fn run_cancellable<S: FfmpegSpawner>(
    spawner: &S,
    label: &str,
    cmd: FfmpegCommand,
    token: &CancelToken,
) -> CoreResult<()> {
    log::debug!("Running {label} (cancellable): {cmd:?}");
    let mut process = spawner.spawn(cmd)?;

    loop {
        if token.is_cancelled() {
            log::debug!("Cancel requested for {label}, killing process");
            if let Err(e) = process.kill() {
                log::warn!("Failed to kill {label}: {e}");
            }
            let _ = process.wait();
            return Err(CoreError::Cancelled(label.to_string()));
        }

        match process.try_status()? {
            Some(status) if status.success() => return Ok(()),
            Some(status) => {
                return Err(command_failed_error(
                    label,
                    status,
                    "process exited with failure",
                ));
            }
            None => thread::sleep(CANCEL_POLL_INTERVAL),
        }
    }
}
