//! Core library for merging media files using ffmpeg and ffprobe.
//!
//! This crate provides media file discovery and classification, merge
//! strategy selection, a bounded task runner for deadline-limited encoder
//! runs, and the orchestration that turns a directory of audio/video files
//! into merged artifacts (plus an optional cover-image video).
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use mergo_core::{classify_files, select_plan, run_merge};
//! use mergo_core::{CoreConfig, MergePreference, SidecarSpawner};
//! use std::path::PathBuf;
//!
//! let config = CoreConfig::new(
//!     PathBuf::from("/path/to/media"),
//!     PathBuf::from("/path/to/results"),
//!     "my_run".to_string(),
//! );
//!
//! let files = mergo_core::find_media_files(&config.input_dir).unwrap();
//! let classified = classify_files(files, &config.audio_extensions);
//!
//! if let Some(plan) = select_plan(classified, MergePreference::Unspecified, true) {
//!     let outcome = run_merge(&SidecarSpawner, &config, &plan).unwrap();
//!     for artifact in &outcome.artifacts {
//!         println!("wrote {}", artifact.display());
//!     }
//! }
//! ```

pub mod classify;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod processing;
pub mod runner;
pub mod strategy;
pub mod tags;
pub mod temp_files;
pub mod terminal;
pub mod utils;

// Re-exports for public API
pub use classify::{classify_files, ClassifiedFiles, MediaFile, MediaKind};
pub use config::{CoreConfig, DEFAULT_AUDIO_EXTENSIONS, DEFAULT_PROMPT_TIMEOUT};
pub use discovery::find_media_files;
pub use error::{CoreError, CoreResult};
pub use external::{check_dependency, get_media_info, MediaInfo, SidecarSpawner};
pub use processing::{run_merge, MergeOutcome, SynthesisStatus};
pub use runner::{run_with_timeout, run_with_timeout_or, CancelToken, TaskOutcome};
pub use strategy::{select_plan, MergePlan, MergePreference};
pub use utils::{format_bytes, format_duration, timestamp_run_name};
