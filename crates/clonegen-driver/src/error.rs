//! Error types for clonegen-driver.

use std::path::PathBuf;
use thiserror::Error;

/// A per-class processing failure.
///
/// These are isolated: one class failing does not stop the run, and every
/// failure is reported against its class name.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The frontend could not be used at all.
    #[error("Frontend error: {0}")]
    Frontend(String),

    /// The class's header could not be parsed into a translation unit.
    #[error("Failed to parse {}: {}", .path.display(), .message)]
    Parse { path: PathBuf, message: String },

    /// Extraction failed (unsupported field shape, ambiguous class name).
    #[error(transparent)]
    Extract(#[from] clonegen_extract::ExtractError),
}
