//! Core merge pipeline logic and orchestration.
//!
//! This module organizes the individual merge steps into submodules and
//! exposes the primary entry point, [`run_merge`], which sequences them for
//! a single run.

/// Audio concatenation and tag preservation.
pub mod audio;

/// Run orchestration: classification through final artifacts.
pub mod merge;

/// Cover extraction and bounded still-image video synthesis.
pub mod synthesis;

/// Video concatenation.
pub mod video;

pub use merge::{run_merge, MergeOutcome, SynthesisStatus};

use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// Confirms an artifact the encoder claims to have produced actually exists
/// and is non-empty before it is reported or consumed downstream.
pub(crate) fn verify_output(output_path: &Path) -> CoreResult<()> {
    let len = std::fs::metadata(output_path).map(|m| m.len()).unwrap_or(0);
    if len == 0 {
        return Err(CoreError::OperationFailed(format!(
            "Merged output '{}' is missing or empty",
            output_path.display()
        )));
    }
    Ok(())
}
