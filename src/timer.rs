//! Nanosecond-denominated view over a [`Counter`].
//!
//! A [`Timer`] shares its storage layout with [`Counter`]; the cell value is
//! an integer nanosecond count. The same underlying cell can be used through
//! either interface: resolving a name as a counter and as a timer yields the
//! same storage, read as a raw tally or as an accumulated [`Duration`].

use std::fmt;
use std::time::Duration;

use crate::counter::Counter;

/// An atomic accumulator of elapsed time, stored as whole nanoseconds.
///
/// All reads and writes flow through the underlying [`Counter`] atomics, so
/// a `Timer` inherits the counter's properties: lock-free, monotonically
/// non-decreasing, safe to update from any thread.
#[derive(Debug)]
#[repr(transparent)]
pub struct Timer {
    counter: Counter,
}

/// Convert a duration to whole nanoseconds, truncating sub-nanosecond
/// precision and saturating above `u64::MAX` nanoseconds (~584 years).
const fn duration_to_nanos(d: Duration) -> u64 {
    let nanos = d.as_nanos();
    if nanos > u64::MAX as u128 {
        u64::MAX
    } else {
        nanos as u64
    }
}

impl Timer {
    /// Create a new timer with zero accumulated time.
    pub const fn new() -> Self {
        Self {
            counter: Counter::new(),
        }
    }

    /// Create a new timer holding `elapsed` as its starting total.
    pub const fn with_elapsed(elapsed: Duration) -> Self {
        Self {
            counter: Counter::with_value(duration_to_nanos(elapsed)),
        }
    }

    /// Read the accumulated time.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        Duration::from_nanos(self.nanos())
    }

    /// Read the accumulated time as a raw nanosecond count.
    #[inline]
    pub fn nanos(&self) -> u64 {
        self.counter.value()
    }

    /// Add an elapsed interval to the accumulated total.
    ///
    /// The duration is converted to whole nanoseconds by truncation toward
    /// zero. Adding `Duration::ZERO` is permitted and leaves the value
    /// unchanged; scope timers retire sub-tick scopes as zero.
    #[inline]
    pub fn add(&self, d: Duration) {
        self.counter.add(duration_to_nanos(d));
    }

    /// View a counter as a timer over the same cell.
    #[inline]
    pub fn from_counter(counter: &Counter) -> &Timer {
        // SAFETY: Timer is repr(transparent) over Counter, so the pointer
        // cast reinterprets the same cell without changing layout.
        unsafe { &*(counter as *const Counter as *const Timer) }
    }

    /// View this timer as its underlying counter.
    #[inline]
    pub fn as_counter(&self) -> &Counter {
        &self.counter
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Timer {
    /// Snapshot the accumulated time into a new, independent timer.
    fn clone(&self) -> Self {
        Self {
            counter: self.counter.clone(),
        }
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.nanos())
    }
}
