//! Scope-based measurement guards.
//!
//! [`ScopeTimer`] measures the lifetime of a lexical scope: it starts a
//! [`Stopwatch`] when created and stops it when dropped. Because `Drop`
//! runs exactly once on every exit path, including early returns, `?`
//! propagation, and panics, the backing [`Timer`] receives exactly one
//! retired interval per guard.
//!
//! [`Section`] combines the timer guard with an entry count: constructing
//! one increments a companion [`Counter`] and then times the scope. The
//! [`section!`](crate::section) macro wires the two cells to `<name>|C`
//! and `<name>|T`.

use crate::counter::Counter;
use crate::stopwatch::Stopwatch;
use crate::timer::Timer;

/// A guard that times the scope it lives in.
///
/// The measurement runs from construction to drop. The guard may be moved;
/// the interval is retired once, when the final owner drops it.
#[derive(Debug)]
pub struct ScopeTimer<'a> {
    watch: Stopwatch<'a>,
}

impl<'a> ScopeTimer<'a> {
    /// Start timing into `timer`, until the returned guard is dropped.
    pub fn new(timer: &'a Timer) -> Self {
        let mut watch = Stopwatch::new(timer);
        watch.start();
        Self { watch }
    }
}

impl Drop for ScopeTimer<'_> {
    fn drop(&mut self) {
        self.watch.stop();
    }
}

/// A guard that counts scope entry and times the scope.
///
/// Construction increments `counter` by one and starts timing into
/// `timer`; drop retires the elapsed interval.
#[derive(Debug)]
pub struct Section<'a> {
    _timer: ScopeTimer<'a>,
}

impl<'a> Section<'a> {
    /// Count one entry on `counter` and time the scope into `timer`.
    pub fn new(counter: &'a Counter, timer: &'a Timer) -> Self {
        counter.increment();
        Self {
            _timer: ScopeTimer::new(timer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_scope_timer_retires_on_drop() {
        let timer = Timer::new();
        {
            let _guard = ScopeTimer::new(&timer);
            sleep(Duration::from_millis(1));
        }
        assert!(timer.elapsed() >= Duration::from_millis(1));
    }

    #[test]
    fn test_scope_timer_retires_exactly_once() {
        let timer = Timer::new();
        let guard = ScopeTimer::new(&timer);
        sleep(Duration::from_millis(1));
        drop(guard);

        let after_drop = timer.nanos();
        sleep(Duration::from_millis(1));
        assert_eq!(timer.nanos(), after_drop);
    }

    #[test]
    fn test_scope_timer_retires_on_panic() {
        let timer = Timer::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _guard = ScopeTimer::new(&timer);
            sleep(Duration::from_millis(1));
            panic!("boom");
        }));

        assert!(result.is_err());
        assert!(timer.elapsed() >= Duration::from_millis(1));
    }

    #[test]
    fn test_moved_guard_still_stops_once() {
        fn timed_guard(timer: &Timer) -> ScopeTimer<'_> {
            ScopeTimer::new(timer)
        }

        let timer = Timer::new();
        {
            let guard = timed_guard(&timer);
            sleep(Duration::from_millis(1));
            drop(guard);
        }

        let after_drop = timer.nanos();
        assert!(after_drop >= 1_000_000);
        sleep(Duration::from_millis(1));
        assert_eq!(timer.nanos(), after_drop);
    }

    #[test]
    fn test_section_counts_and_times() {
        let counter = Counter::new();
        let timer = Timer::new();
        {
            let _section = Section::new(&counter, &timer);
            sleep(Duration::from_millis(1));
        }

        assert_eq!(counter.value(), 1);
        assert!(timer.elapsed() >= Duration::from_millis(1));
    }

    #[test]
    fn test_section_counts_each_entry() {
        let counter = Counter::new();
        let timer = Timer::new();
        for _ in 0..3 {
            let _section = Section::new(&counter, &timer);
        }

        assert_eq!(counter.value(), 3);
    }

    #[test]
    fn test_section_counts_and_times_on_panic() {
        let counter = Counter::new();
        let timer = Timer::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            let _section = Section::new(&counter, &timer);
            sleep(Duration::from_millis(1));
            panic!("boom");
        }));

        assert!(result.is_err());
        assert_eq!(counter.value(), 1);
        assert!(timer.elapsed() >= Duration::from_millis(1));
    }
}
