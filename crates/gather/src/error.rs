//! # Pass Error Types
//!
//! All errors that can occur while configuring or running a pass.

use gather_core::CoreError;
use thiserror::Error;

/// Errors that can occur in a gather pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatherError {
    /// Invalid configuration (unparsable TOML or out-of-range values).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(String),

    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker {worker}: {reason}")]
    Spawn {
        /// Index of the worker that could not be started.
        worker: usize,
        /// OS error message.
        reason: String,
    },

    /// A worker panicked inside the extraction callback.
    #[error("worker {worker} panicked")]
    WorkerPanicked {
        /// Index of the worker that panicked.
        worker: usize,
    },

    /// The shared sink could not grow.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for pass operations.
pub type GatherResult<T> = Result<T, GatherError>;
