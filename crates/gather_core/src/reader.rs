//! # Synchronized Reader
//!
//! Lock-free, single-pass traversal over a sequence that is no longer being
//! written.
//!
//! ## Cursor
//!
//! ```text
//!   BeforeStart ──next──> InProgress(0) ──next──> ... ──next──> Exhausted
//!        ^                                                         │
//!        └──────────────────────── reset ──────────────────────────┘
//! ```
//!
//! The cursor is a single `AtomicUsize` counting claimed slots. Every call
//! to `next` claims exactly one slot with `fetch_add`, so concurrent callers
//! on one reader never receive the same element and never skip one. Once
//! the cursor is past the end it stops moving. The
//! element read after the claim is not synchronized further: the reader
//! holds a shared borrow of the sequence, so no writer can exist alongside it.

use std::iter::FusedIterator;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Where a reader's cursor currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CursorState {
    /// No element has been claimed since construction or the last reset.
    BeforeStart,
    /// The element at this index was the last one handed out.
    InProgress(usize),
    /// Every element has been handed out; `next` returns `None` until reset.
    Exhausted,
}

/// Read facade over a shared sequence with an atomic traversal cursor.
///
/// Share it by reference. Any number of threads may call [`next`] or
/// [`next_ref`] at once; each element is delivered to exactly one of them.
///
/// [`next`]: Self::next
/// [`next_ref`]: Self::next_ref
///
/// ## Usage
///
/// ```rust
/// use gather_core::SyncReader;
///
/// let files = vec!["a.rs", "b.rs", "c.rs"];
/// let reader = SyncReader::new(&files);
///
/// let mut seen = Vec::new();
/// while let Some(file) = reader.next() {
///     seen.push(file);
/// }
/// assert_eq!(seen, files);
/// assert_eq!(reader.next(), None);
/// ```
pub struct SyncReader<'a, T> {
    sequence: &'a [T],
    /// Number of slots claimed so far. The cursor index is `claimed - 1`.
    claimed: AtomicUsize,
}

impl<'a, T> SyncReader<'a, T> {
    /// Binds a reader to `sequence` with the cursor before the first element.
    #[inline]
    #[must_use]
    pub fn new(sequence: &'a [T]) -> Self {
        Self {
            sequence,
            claimed: AtomicUsize::new(0),
        }
    }

    /// Number of elements in the bound sequence.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns true if the bound sequence has no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Rebinds the reader to `sequence` and moves the cursor back to
    /// [`CursorState::BeforeStart`].
    pub fn reset(&mut self, sequence: &'a [T]) {
        self.sequence = sequence;
        *self.claimed.get_mut() = 0;
    }

    /// Claims the next element and returns a reference to it.
    ///
    /// Returns `None` once the sequence is exhausted, and keeps returning
    /// `None` until [`reset`](Self::reset).
    #[inline]
    #[must_use = "a claimed element is gone from the traversal once discarded"]
    pub fn next_ref(&self) -> Option<&'a T> {
        // Past the end the cursor stops moving, so it can never wrap back
        // into range. Racing callers overshoot by at most one slot each.
        if self.claimed.load(Ordering::Relaxed) > self.sequence.len() {
            return None;
        }
        let slot = self.claimed.fetch_add(1, Ordering::Acquire);
        self.sequence.get(slot)
    }

    /// Claims the next element and returns a clone of it.
    #[inline]
    #[must_use = "a claimed element is gone from the traversal once discarded"]
    pub fn next(&self) -> Option<T>
    where
        T: Clone,
    {
        self.next_ref().cloned()
    }

    /// Current cursor state.
    #[must_use]
    pub fn cursor(&self) -> CursorState {
        match self.claimed.load(Ordering::Acquire) {
            0 => CursorState::BeforeStart,
            claimed if claimed <= self.sequence.len() => CursorState::InProgress(claimed - 1),
            _ => CursorState::Exhausted,
        }
    }

    /// Iterator that keeps claiming elements from this reader's cursor.
    ///
    /// Several `Claims` over the same reader share the cursor, so together
    /// they still see every element once.
    #[inline]
    #[must_use]
    pub fn claims(&self) -> Claims<'_, 'a, T> {
        Claims { reader: self }
    }
}

/// Iterator returned by [`SyncReader::claims`].
pub struct Claims<'r, 'a, T> {
    reader: &'r SyncReader<'a, T>,
}

impl<'a, T> Iterator for Claims<'_, 'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next_ref()
    }
}

impl<T> FusedIterator for Claims<'_, '_, T> {}

// Compile-time assertion: SyncReader can be shared across threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SyncReader<'static, String>>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_without_traversal() {
        let items = vec![1, 2, 3, 4];
        let reader = SyncReader::new(&items);
        assert_eq!(reader.len(), 4);
        assert!(!reader.is_empty());
        assert_eq!(reader.cursor(), CursorState::BeforeStart);
    }

    #[test]
    fn test_cursor_states() {
        let items = vec!['a', 'b'];
        let reader = SyncReader::new(&items);

        assert_eq!(reader.next(), Some('a'));
        assert_eq!(reader.cursor(), CursorState::InProgress(0));
        assert_eq!(reader.next(), Some('b'));
        assert_eq!(reader.cursor(), CursorState::InProgress(1));
        assert_eq!(reader.next(), None);
        assert_eq!(reader.cursor(), CursorState::Exhausted);
    }

    #[test]
    fn test_exhausted_stays_exhausted() {
        let items = vec![10];
        let reader = SyncReader::new(&items);
        assert_eq!(reader.next(), Some(10));
        for _ in 0..5 {
            assert_eq!(reader.next(), None);
        }
        assert_eq!(reader.cursor(), CursorState::Exhausted);
    }

    #[test]
    fn test_cursor_stops_after_exhaustion() {
        let items = vec![1u8, 2, 3];
        let reader = SyncReader::new(&items);
        assert_eq!(reader.claims().count(), 3);

        for _ in 0..10_000 {
            assert_eq!(reader.next_ref(), None);
        }
        assert_eq!(reader.claimed.load(Ordering::Relaxed), items.len() + 1);
        assert_eq!(reader.cursor(), CursorState::Exhausted);
    }

    #[test]
    fn test_cursor_near_counter_limit_stays_exhausted() {
        let items = vec![1u8];
        let reader = SyncReader::new(&items);
        reader.claimed.store(usize::MAX, Ordering::Relaxed);

        assert_eq!(reader.next_ref(), None);
        assert_eq!(reader.next_ref(), None);
        assert_eq!(reader.claimed.load(Ordering::Relaxed), usize::MAX);
        assert_eq!(reader.cursor(), CursorState::Exhausted);
    }

    #[test]
    fn test_empty_sequence() {
        let items: Vec<u8> = Vec::new();
        let reader = SyncReader::new(&items);
        assert!(reader.is_empty());
        assert_eq!(reader.next_ref(), None);
        assert_eq!(reader.cursor(), CursorState::Exhausted);
    }

    #[test]
    fn test_reset_rebinds_and_restarts() {
        let first = vec![1, 2];
        let second = vec![7, 8, 9];
        let mut reader = SyncReader::new(&first);
        while reader.next().is_some() {}

        reader.reset(&second);
        assert_eq!(reader.cursor(), CursorState::BeforeStart);
        assert_eq!(reader.len(), 3);
        assert_eq!(reader.next(), Some(7));
    }

    #[test]
    fn test_reset_mid_traversal() {
        let items = vec!["x", "y", "z"];
        let mut reader = SyncReader::new(&items);
        assert_eq!(reader.next(), Some("x"));

        reader.reset(&items);
        let all: Vec<_> = reader.claims().copied().collect();
        assert_eq!(all, items);
    }

    #[test]
    fn test_claims_share_cursor() {
        let items: Vec<u32> = (0..6).collect();
        let reader = SyncReader::new(&items);
        let mut left = reader.claims();
        let mut right = reader.claims();

        assert_eq!(left.next(), Some(&0));
        assert_eq!(right.next(), Some(&1));
        assert_eq!(left.next(), Some(&2));
        assert_eq!(right.count(), 3);
        assert_eq!(left.next(), None);
    }

    #[test]
    fn test_next_ref_does_not_clone() {
        let items = vec![String::from("owned")];
        let reader = SyncReader::new(&items);
        let first = reader.next_ref().unwrap();
        assert!(std::ptr::eq(first, &items[0]));
    }
}
