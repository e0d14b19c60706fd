//! # Gather
//!
//! Parallel extraction pass built on the [`gather_core`] collector facades.
//!
//! A pass takes a slice of inputs (file names, chunks, records), hands each
//! one to exactly one worker thread, and collects everything the workers
//! produce into a single caller-owned `Vec`. After the pass returns, the
//! output can be consumed lazily through a [`SyncReader`].
//!
//! ## Example
//!
//! ```rust
//! use gather::{run_pass, PassConfig, SyncReader};
//!
//! let sources = vec!["fn a() {}", "fn b() {} fn c() {}"];
//! let mut functions = Vec::new();
//!
//! let config = PassConfig::from_toml_str("workers = 2\nbatch_capacity = 4").unwrap();
//! let stats = run_pass(&config, &sources, &mut functions, |source, out| {
//!     out.extend(source.matches("fn ").map(|_| source.len()));
//! })
//! .unwrap();
//! assert_eq!(stats.outputs, 3);
//!
//! let reader = SyncReader::new(&functions);
//! assert_eq!(reader.claims().count(), 3);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod pass;

pub use config::PassConfig;
pub use error::{GatherError, GatherResult};
pub use gather_core::{Claims, CoreError, CoreResult, CursorState, SyncReader, SyncWriter};
pub use pass::{run_pass, PassStats, WorkerReport};
