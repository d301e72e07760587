//! Name-keyed facade macros.
//!
//! Each macro expansion is a counter call site: it emits a private static
//! cell, registers it in the link table, and resolves to the canonical
//! cell for its name (see [`registry()`](crate::registry())). Names must
//! be usable in constant context, which in practice means string literals
//! or `concat!` of literals; a runtime string fails to compile.

/// Resolve the canonical [`Counter`](crate::Counter) for a name.
///
/// Every use of the same name, anywhere in the program, resolves to the
/// same cell. The steady-state cost is one relaxed pointer load.
///
/// # Example
///
/// ```
/// let c = minprof::counter!("frames");
/// c.add(3);
/// assert_eq!(minprof::counter!("frames").value(), 3);
/// ```
#[macro_export]
macro_rules! counter {
    ($name:expr) => {{
        static __MINPROF_CELL: $crate::Counter = $crate::Counter::new();

        #[$crate::__private::linkme::distributed_slice($crate::__private::COUNTERS)]
        #[linkme(crate = $crate::__private::linkme)]
        static __MINPROF_ENTRY: $crate::__private::CounterEntry =
            $crate::__private::CounterEntry::new($name, &__MINPROF_CELL);

        static __MINPROF_CANON: $crate::__private::AtomicPtr<$crate::Counter> =
            $crate::__private::AtomicPtr::new(::std::ptr::null_mut());

        $crate::__private::resolve($name, &__MINPROF_CELL, &__MINPROF_CANON)
    }};
}

/// Resolve the canonical cell for a name, viewed as a
/// [`Timer`](crate::Timer).
///
/// The timer shares its cell with [`counter!`] of the same name.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// minprof::timer!("io").add(Duration::from_micros(250));
/// assert_eq!(minprof::counter!("io").value(), 250_000);
/// ```
#[macro_export]
macro_rules! timer {
    ($name:expr) => {
        $crate::Timer::from_counter($crate::counter!($name))
    };
}

/// Increment the named counter by one.
///
/// # Example
///
/// ```
/// minprof::event!("cache-miss");
/// minprof::event!("cache-miss");
/// assert_eq!(minprof::counter!("cache-miss").value(), 2);
/// ```
#[macro_export]
macro_rules! event {
    ($name:expr) => {
        $crate::counter!($name).increment()
    };
}

/// Time a block into the named timer.
///
/// The name is used exactly as given. The block runs inside a single
/// lexical scope owned by the macro and its elapsed time is retired into
/// the timer on every exit path: normal completion, early `return`, `?`,
/// or panic. The expansion is a block expression, so it cannot capture a
/// trailing `else` and it yields the block's value.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// let answer = minprof::timed!("compute", {
///     std::thread::sleep(Duration::from_millis(1));
///     6 * 7
/// });
/// assert_eq!(answer, 42);
/// assert!(minprof::timer!("compute").elapsed() >= Duration::from_millis(1));
/// ```
#[macro_export]
macro_rules! timed {
    ($name:expr, $body:block) => {{
        let __minprof_guard = $crate::ScopeTimer::new($crate::timer!($name));
        $body
    }};
}

/// Count and time a block as a named section.
///
/// Entering the block increments `<name>|C` and its elapsed time is
/// retired into `<name>|T`; the suffixes are appended here, callers pass
/// the bare label. The name must be a string literal. Like [`timed!`],
/// the expansion is a block expression yielding the block's value, with
/// the guard released on every exit path.
///
/// # Example
///
/// ```
/// for _ in 0..3 {
///     minprof::section!("tick", {
///         std::hint::black_box(());
///     });
/// }
/// assert_eq!(minprof::counter!("tick|C").value(), 3);
/// ```
#[macro_export]
macro_rules! section {
    ($name:literal, $body:block) => {{
        let __minprof_guard = $crate::Section::new(
            $crate::counter!(concat!($name, "|C")),
            $crate::timer!(concat!($name, "|T")),
        );
        $body
    }};
}
