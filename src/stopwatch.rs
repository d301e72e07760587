//! Manually driven interval measurement.
//!
//! A [`Stopwatch`] samples the process monotonic clock and retires measured
//! intervals into a borrowed [`Timer`]. It has two states:
//!
//! - **Idle**: no start instant is held. `split()` and `stop()` are
//!   contract violations in this state.
//! - **Running**: a start instant is held; `split()` retires the interval
//!   since that instant and re-arms, `stop()` retires it and returns to
//!   Idle.
//!
//! A stopwatch is driven from one thread at a time (the methods take
//! `&mut self`). To measure the same activity from several threads, give
//! each thread its own stopwatch retiring into the same shared timer.

use std::time::{Duration, Instant};

use crate::timer::Timer;

/// A start/split/stop interval timer backed by a [`Timer`].
#[derive(Debug)]
pub struct Stopwatch<'a> {
    timer: &'a Timer,
    start: Option<Instant>,
}

impl<'a> Stopwatch<'a> {
    /// Create an idle stopwatch retiring into `timer`.
    pub fn new(timer: &'a Timer) -> Self {
        Self { timer, start: None }
    }

    /// Whether the stopwatch currently holds a start instant.
    pub fn is_running(&self) -> bool {
        self.start.is_some()
    }

    /// Start (or restart) the stopwatch.
    ///
    /// Samples the monotonic clock and enters the Running state. Any prior
    /// start instant is discarded without retiring an interval.
    pub fn start(&mut self) {
        self.start = Some(Instant::now());
    }

    /// Retire the interval since the last start/split and re-arm.
    ///
    /// Adds the elapsed interval to the backing timer, makes the sampled
    /// instant the new start point, and returns the interval. Calling this
    /// on an idle stopwatch is a contract violation: it panics under debug
    /// assertions and returns `Duration::ZERO` without touching the timer
    /// otherwise.
    pub fn split(&mut self) -> Duration {
        debug_assert!(self.start.is_some(), "split() on an idle stopwatch");
        match self.start {
            Some(started) => {
                let now = Instant::now();
                let elapsed = now.duration_since(started);
                self.timer.add(elapsed);
                self.start = Some(now);
                elapsed
            }
            None => Duration::ZERO,
        }
    }

    /// Retire the interval since the last start/split and go idle.
    ///
    /// Behaves as [`split()`](Self::split) followed by clearing the start
    /// instant. The same idle-state contract applies.
    pub fn stop(&mut self) -> Duration {
        debug_assert!(self.start.is_some(), "stop() on an idle stopwatch");
        match self.start.take() {
            Some(started) => {
                let elapsed = started.elapsed();
                self.timer.add(elapsed);
                elapsed
            }
            None => Duration::ZERO,
        }
    }
}
