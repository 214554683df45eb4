//! Error types shared across the cropmark-core library.

use thiserror::Error;

use crate::analysis::Axis;

/// Custom error types for cropmark.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no .mkv files found under the input path")]
    NoFilesFound,

    #[error("required external tool '{0}' not found")]
    DependencyNotFound(String),

    #[error("failed to start {0}: {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("{tool} execution failed: {reason}")]
    ExecutionFailed { tool: String, reason: String },

    #[error("{tool} returned malformed data: {detail}")]
    GarbageReturned { tool: String, detail: String },

    #[error("no crop samples available: {0}")]
    MissingSamples(String),

    #[error("axis mismatch: expected {expected:?}, got {actual:?}")]
    WrongAxis { expected: Axis, actual: Axis },

    #[error("guard store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// True for failures a single file is allowed to absorb without taking
    /// the rest of the batch down with it.
    pub fn is_per_file(&self) -> bool {
        !matches!(self, CoreError::Internal(_))
    }
}

/// Result type for cropmark operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a `CommandStart` error for a tool that could not be spawned.
pub(crate) fn command_start_error(tool: &str, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(tool.to_string(), err)
}

/// Builds an `ExecutionFailed` error for a tool that ran but did not succeed.
pub(crate) fn command_failed_error(tool: &str, reason: impl Into<String>) -> CoreError {
    CoreError::ExecutionFailed {
        tool: tool.to_string(),
        reason: reason.into(),
    }
}
