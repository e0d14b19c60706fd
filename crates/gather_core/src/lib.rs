//! # Gather Core
//!
//! Two thin facades over one caller-owned `Vec<T>`:
//!
//! - [`SyncWriter`]: any number of threads append, one mutex serializes them
//! - [`SyncReader`]: any number of threads pull, one atomic cursor hands out
//!   each element exactly once
//!
//! ## Phase Separation
//!
//! ```text
//! Write phase:  workers ──append/append_bulk──> SyncWriter<'a, T>   (&mut Vec<T>)
//!                                  │
//!                       writer dropped / scope joined
//!                                  ▼
//! Read phase:   consumers ──next/next_ref──> SyncReader<'a, T>      (&[T])
//! ```
//!
//! The writer borrows the sequence mutably and the reader borrows it shared,
//! so the borrow checker keeps the two phases apart. Inside the read phase
//! the cursor step is the only coordinated operation; `len` and the element
//! read after a claim take no lock.
//!
//! ## Example
//!
//! ```rust
//! use gather_core::{SyncReader, SyncWriter};
//!
//! let mut results = Vec::new();
//! {
//!     let writer = SyncWriter::new(&mut results);
//!     std::thread::scope(|s| {
//!         for worker in 0..4u32 {
//!             let writer = &writer;
//!             s.spawn(move || writer.append_bulk(vec![worker; 3]));
//!         }
//!     });
//! }
//!
//! let reader = SyncReader::new(&results);
//! assert_eq!(reader.len(), 12);
//! assert_eq!(reader.claims().count(), 12);
//! assert_eq!(reader.next(), None);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{CoreError, CoreResult};
pub use reader::{Claims, CursorState, SyncReader};
pub use writer::SyncWriter;
