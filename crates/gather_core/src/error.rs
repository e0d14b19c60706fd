//! # Collector Error Types
//!
//! The facades themselves never fail. The only reportable condition is
//! running out of memory on the fallible `try_*` append paths.

use thiserror::Error;

/// Errors that can occur while growing a shared sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The sequence could not reserve room for the new elements.
    ///
    /// The sequence is left exactly as it was before the call.
    #[error("capacity exhausted: could not reserve {additional} more elements (length {len})")]
    CapacityExhausted {
        /// Number of elements the append tried to add.
        additional: usize,
        /// Length of the sequence when the reservation failed.
        len: usize,
    },
}

/// Result type for collector operations.
pub type CoreResult<T> = Result<T, CoreError>;
