//! Lock-free monotonic event counter.
//!
//! A [`Counter`] is a single 64-bit cell with an add-only interface. All
//! updates are relaxed atomic read-modify-writes, so any number of threads
//! may increment the same counter without coordination. There is no reset
//! and no decrement: the value is monotonically non-decreasing for the life
//! of the cell.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// An atomic, monotonically non-decreasing 64-bit counter.
///
/// Counters are cheap enough to leave enabled in production: an increment
/// compiles to a single atomic add on the counter's address. Each counter
/// is an independent cell; no ordering is established between updates to
/// different counters.
///
/// Overflow wraps. With 64 bits of headroom that is treated as a defect in
/// the program being measured, not a condition this type reports.
#[derive(Debug)]
#[repr(transparent)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    /// Create a new counter with value zero.
    pub const fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    /// Create a new counter with an explicit starting value.
    pub const fn with_value(value: u64) -> Self {
        Self {
            value: AtomicU64::new(value),
        }
    }

    /// Read the current value.
    #[inline]
    pub fn value(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }

    /// Increment the counter by one.
    #[inline]
    pub fn increment(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    /// Add `n` to the counter.
    #[inline]
    pub fn add(&self, n: u64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    /// Add `n` to the counter and return the value it held before the add.
    #[inline]
    pub fn fetch_add(&self, n: u64) -> u64 {
        self.value.fetch_add(n, Ordering::Relaxed)
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Counter {
    /// Snapshot the current value into a new, independent counter.
    fn clone(&self) -> Self {
        Self::with_value(self.value())
    }

    /// Overwrite this counter with a snapshot of `source`.
    fn clone_from(&mut self, source: &Self) {
        *self.value.get_mut() = source.value();
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
