//! # Pass Configuration
//!
//! Loaded once from TOML before a pass starts:
//!
//! ```toml
//! workers = 8            # 0 = one per available core
//! batch_capacity = 128   # outputs buffered per worker before a bulk flush
//! thread_name = "scan"
//! ```
//!
//! Every key is optional; missing keys take the [`Default`] values.

use std::num::NonZeroUsize;
use std::path::Path;
use std::thread;

use serde::Deserialize;

use crate::error::{GatherError, GatherResult};

/// Configuration for [`run_pass`](crate::run_pass).
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PassConfig {
    /// Worker thread count. `0` means one per available core.
    pub workers: usize,
    /// Outputs a worker buffers locally before flushing them with one bulk
    /// append. Must be greater than zero.
    pub batch_capacity: usize,
    /// Prefix for worker thread names; worker `n` is named `{prefix}-{n}`.
    pub thread_name: String,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            batch_capacity: 64,
            thread_name: String::from("gather-worker"),
        }
    }
}

impl PassConfig {
    /// Parses and validates a config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError::InvalidConfig`] on malformed TOML, unknown
    /// keys, or values rejected by [`validate`](Self::validate).
    pub fn from_toml_str(source: &str) -> GatherResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| GatherError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError::Io`] if the file cannot be read, otherwise
    /// the same errors as [`from_toml_str`](Self::from_toml_str).
    pub fn from_toml_file(path: impl AsRef<Path>) -> GatherResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| GatherError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError::InvalidConfig`] if `batch_capacity` is zero,
    /// or if `thread_name` is empty or contains a NUL byte (the OS cannot
    /// name a thread with one).
    pub fn validate(&self) -> GatherResult<()> {
        if self.batch_capacity == 0 {
            return Err(GatherError::InvalidConfig(
                "batch_capacity must be greater than zero".into(),
            ));
        }
        if self.thread_name.is_empty() {
            return Err(GatherError::InvalidConfig(
                "thread_name must not be empty".into(),
            ));
        }
        if self.thread_name.contains('\0') {
            return Err(GatherError::InvalidConfig(
                "thread_name must not contain NUL bytes".into(),
            ));
        }
        Ok(())
    }

    /// Number of workers to start for `inputs` inputs.
    ///
    /// Resolves `0` to the available parallelism, then clamps to
    /// `1..=inputs` so no worker starts with nothing to claim.
    #[must_use]
    pub fn resolved_workers(&self, inputs: usize) -> usize {
        let wanted = if self.workers == 0 {
            thread::available_parallelism().map_or(1, NonZeroUsize::get)
        } else {
            self.workers
        };
        wanted.min(inputs).max(1)
    }
}
