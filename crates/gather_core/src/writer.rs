//! # Synchronized Writer
//!
//! Mutex-guarded append access to a borrowed `Vec`.
//!
//! ## Architecture
//!
//! ```text
//!   Worker 1 ──┐
//!   Worker 2 ──┼──> SyncWriter ──[ Mutex ]──> &mut Vec<T>
//!   Worker N ──┘   (shared by &)   (one lock per call)
//! ```
//!
//! Appends from different threads land in lock acquisition order. A bulk
//! append holds the lock for the whole batch, so no other append can land
//! in the middle of it.

use parking_lot::Mutex;

use crate::error::{CoreError, CoreResult};

/// Write facade over a shared sequence.
///
/// The writer borrows the sequence mutably for `'a`, so nothing else can
/// touch it while the writer is alive. Share the writer itself by reference
/// (e.g. across `std::thread::scope` workers); it is neither `Clone` nor
/// `Copy`.
///
/// ## Usage
///
/// ```rust
/// use gather_core::SyncWriter;
///
/// let mut found = Vec::new();
/// {
///     let writer = SyncWriter::new(&mut found);
///     std::thread::scope(|s| {
///         for id in 0..4 {
///             let writer = &writer;
///             s.spawn(move || writer.append(id));
///         }
///     });
/// }
/// assert_eq!(found.len(), 4);
/// ```
pub struct SyncWriter<'a, T> {
    sequence: Mutex<&'a mut Vec<T>>,
}

impl<'a, T> SyncWriter<'a, T> {
    /// Binds a writer to `sequence`.
    #[inline]
    #[must_use]
    pub fn new(sequence: &'a mut Vec<T>) -> Self {
        Self {
            sequence: Mutex::new(sequence),
        }
    }

    /// Appends `value` as the new last element.
    pub fn append(&self, value: T) {
        self.sequence.lock().push(value);
    }

    /// Appends a clone of `value` as the new last element.
    pub fn append_cloned(&self, value: &T)
    where
        T: Clone,
    {
        self.sequence.lock().push(value.clone());
    }

    /// Appends every element of `values`, in order, under one lock.
    ///
    /// When the shared sequence is still empty the batch's storage is taken
    /// over as-is instead of being moved element by element.
    pub fn append_bulk(&self, values: Vec<T>) {
        let mut sequence = self.sequence.lock();
        if sequence.is_empty() {
            **sequence = values;
        } else {
            sequence.extend(values);
        }
    }

    /// Fallible [`append`](Self::append).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CapacityExhausted`] if the sequence cannot grow.
    /// The sequence is unchanged in that case.
    pub fn try_append(&self, value: T) -> CoreResult<()> {
        let mut sequence = self.sequence.lock();
        reserve(&mut sequence, 1)?;
        sequence.push(value);
        Ok(())
    }

    /// Fallible [`append_bulk`](Self::append_bulk).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CapacityExhausted`] if the sequence cannot grow
    /// by `values.len()`. The sequence is unchanged in that case.
    pub fn try_append_bulk(&self, values: Vec<T>) -> CoreResult<()> {
        let mut sequence = self.sequence.lock();
        if sequence.is_empty() {
            **sequence = values;
            return Ok(());
        }
        reserve(&mut sequence, values.len())?;
        sequence.extend(values);
        Ok(())
    }

    /// Current number of elements. Takes the lock.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.lock().len()
    }

    /// Returns true if nothing has been appended yet. Takes the lock.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.lock().is_empty()
    }
}

fn reserve<T>(sequence: &mut Vec<T>, additional: usize) -> CoreResult<()> {
    let len = sequence.len();
    sequence
        .try_reserve(additional)
        .map_err(|_| CoreError::CapacityExhausted { additional, len })
}

// Compile-time assertion: SyncWriter can be shared across threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SyncWriter<'static, String>>();
};
