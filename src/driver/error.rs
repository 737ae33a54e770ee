//! Driver error types.
//!
//! Only problems that make the whole run meaningless end up here. A test
//! that fails or times out is an outcome, not an error.

use std::path::PathBuf;

/// Result type for driver operations.
pub type Result<T> = std::result::Result<T, DriverError>;

/// Fatal test-driver errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DriverError {
    /// The test runner could not be started.
    #[error("failed to execute '{}': {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on a running test runner failed.
    #[error("failed to wait for '{}': {source}", .program.display())]
    Wait {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Progress or summary output could not be written.
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),
}

impl DriverError {
    /// Create a spawn error.
    pub fn spawn(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// Create a wait error.
    pub fn wait(program: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Wait {
            program: program.into(),
            source,
        }
    }
}
