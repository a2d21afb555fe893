//! Configuration structures and constants for the mergo-core library.
//!
//! Instances of [`CoreConfig`] are created by consumers of the library (like
//! mergo-cli) and passed to the merge pipeline. The struct replaces the
//! ambient per-run state a script would keep in globals: directories, the
//! recognized audio extensions, and the synthesis deadline all live here.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CoreError, CoreResult};

/// Extensions treated as audio during classification (case-insensitive).
/// Everything else found in the input directory is treated as video.
pub const DEFAULT_AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "flac"];

/// Default wall-clock limit for the cover-video synthesis step.
pub const DEFAULT_SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(300);

/// Default deadline for the interactive run-name prompt.
pub const DEFAULT_PROMPT_TIMEOUT: Duration = Duration::from_secs(5);

/// Main configuration structure for the mergo-core library.
///
/// # Examples
///
/// ```rust,no_run
/// use mergo_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let mut config = CoreConfig::new(
///     PathBuf::from("/path/to/media"),
///     PathBuf::from("/path/to/results"),
///     "run_20240601_123045".to_string(),
/// );
/// config.synthesis_timeout = std::time::Duration::from_secs(120);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Directory containing the media files to merge.
    pub input_dir: PathBuf,

    /// Root directory under which the per-run output directory is created.
    pub output_root: PathBuf,

    /// Name of the per-run output directory. Never empty; callers default it
    /// to a timestamp-derived name when the user does not supply one.
    pub run_name: String,

    /// Extensions classified as audio (lowercase, without the dot).
    pub audio_extensions: Vec<String>,

    /// Wall-clock limit for the bounded cover-video synthesis step.
    pub synthesis_timeout: Duration,
}

impl CoreConfig {
    /// Creates a configuration with the default extension set and timeouts.
    pub fn new(input_dir: PathBuf, output_root: PathBuf, run_name: String) -> Self {
        Self {
            input_dir,
            output_root,
            run_name,
            audio_extensions: DEFAULT_AUDIO_EXTENSIONS
                .iter()
                .map(|e| (*e).to_string())
                .collect(),
            synthesis_timeout: DEFAULT_SYNTHESIS_TIMEOUT,
        }
    }

    /// The per-run output directory (`<output_root>/<run_name>`).
    #[must_use]
    pub fn run_dir(&self) -> PathBuf {
        self.output_root.join(&self.run_name)
    }

    /// Validates the configuration before a run starts.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.input_dir.is_dir() {
            return Err(CoreError::Config(format!(
                "input directory '{}' does not exist or is not a directory",
                self.input_dir.display()
            )));
        }
        if self.run_name.is_empty() {
            return Err(CoreError::Config("run name must not be empty".to_string()));
        }
        if self.synthesis_timeout.is_zero() {
            return Err(CoreError::Config(
                "synthesis timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_empty_run_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CoreConfig::new(
            dir.path().to_path_buf(),
            dir.path().to_path_buf(),
            String::new(),
        );
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        config.run_name = "album_run".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_input_dir() {
        let config = CoreConfig::new(
            PathBuf::from("surely/this/does/not/exist"),
            PathBuf::from("."),
            "run".to_string(),
        );
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }
}
