//! Counter registration and the process-wide registry.
//!
//! Registration is a link-time protocol:
//!
//! - Every counter call site (each `counter!`/`timer!`/`event!`/`timed!`/
//!   `section!` expansion) emits a const-initialized static [`Counter`]
//!   cell plus a [`CounterEntry`] element of the [`COUNTERS`] distributed
//!   slice. The linker collects the elements, so every name referenced
//!   anywhere in the program is discoverable before `main` runs, whether
//!   or not the call site ever executes.
//! - The [`Registry`] is frozen once, on first access, by scanning the
//!   slice in order and keeping the first cell seen for each distinct name.
//!   Repeated spellings of one literal at different call sites collapse
//!   onto that canonical cell; the shadowed cells stay zero and are never
//!   listed. Names compare by byte equality.
//! - After the freeze the registry is immutable. Enumeration, lookup, and
//!   dump take no lock; the only mutable state is the atomic counter cells
//!   the entries point at.
//!
//! Call sites cache the canonical cell address in a per-site atomic
//! pointer, so the steady-state cost of a named-counter access is one
//! relaxed pointer load and the atomic add itself.

use std::io::{self, Write};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicPtr, Ordering};

use linkme::distributed_slice;

use crate::counter::Counter;
use crate::timer::Timer;

/// One counter call site: the name it was keyed with and its static cell.
///
/// Produced by the facade macros; not constructed by user code.
#[doc(hidden)]
#[derive(Debug)]
pub struct CounterEntry {
    name: &'static str,
    cell: &'static Counter,
}

impl CounterEntry {
    /// Create an entry binding `name` to a call site's static cell.
    #[doc(hidden)]
    pub const fn new(name: &'static str, cell: &'static Counter) -> Self {
        Self { name, cell }
    }
}

/// Every counter call site in the linked program, collected by the linker.
#[doc(hidden)]
#[distributed_slice]
pub static COUNTERS: [CounterEntry];

/// The process-wide catalog of named counters.
///
/// Entries appear in discovery order: the order the linker laid out the
/// call-site registrations. The order is stable within a build but
/// unspecified across builds; consumers comparing dumps across builds
/// should sort first.
#[derive(Debug)]
pub struct Registry {
    entries: Vec<(&'static str, &'static Counter)>,
}

impl Registry {
    /// Scan the link table once and freeze the deduplicated registry.
    fn freeze() -> Self {
        let registry = Self::from_entries(COUNTERS.iter());
        tracing::debug!(counters = registry.count(), "Counter registry frozen");
        registry
    }

    /// Deduplicate raw call-site entries, first cell per name winning.
    fn from_entries<'e>(entries: impl Iterator<Item = &'e CounterEntry>) -> Self {
        let mut unique: Vec<(&'static str, &'static Counter)> = Vec::new();
        for entry in entries {
            if !unique.iter().any(|(name, _)| *name == entry.name) {
                unique.push((entry.name, entry.cell));
            }
        }
        Self { entries: unique }
    }

    /// Number of registered names.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Find a registered name by linear byte-equality scan.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| *n == name)
    }

    /// Name at `index`, or `None` past the end.
    pub fn name_of(&self, index: usize) -> Option<&'static str> {
        self.entries.get(index).map(|(name, _)| *name)
    }

    /// Counter at `index`, or `None` past the end.
    pub fn counter_of(&self, index: usize) -> Option<&'static Counter> {
        self.entries.get(index).map(|(_, cell)| *cell)
    }

    /// Counter at `index` viewed as a timer, or `None` past the end.
    ///
    /// Same cell as [`counter_of`](Self::counter_of), read in nanoseconds.
    pub fn timer_of(&self, index: usize) -> Option<&'static Timer> {
        self.counter_of(index).map(Timer::from_counter)
    }

    /// Iterate `(name, counter)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static Counter)> + '_ {
        self.entries.iter().copied()
    }

    /// Write every entry to `sink` as CSV, in registration order.
    ///
    /// Each record is `<name>, <value>` followed by a newline, the name
    /// emitted verbatim with no quoting and the value in decimal. An empty
    /// name is rendered as `counter_<index>`. No header row and no
    /// trailing blank line are written. Each value is an independent
    /// point-in-time read; concurrent increments may or may not be
    /// visible.
    pub fn dump<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        for (index, (name, counter)) in self.entries.iter().enumerate() {
            if name.is_empty() {
                writeln!(sink, "counter_{}, {}", index, counter.value())?;
            } else {
                writeln!(sink, "{}, {}", name, counter.value())?;
            }
        }
        Ok(())
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// The global registry, frozen on first access.
///
/// The link table is complete before `main`, so the freeze observes every
/// call site in the program no matter how early this is called.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::freeze)
}

/// Resolve a call site to the canonical cell for `name`.
///
/// Fast path: the call site's cached pointer, one relaxed load. First call
/// per site takes the cold path, which consults the registry and publishes
/// the canonical address. Relaxed ordering suffices in both directions
/// because the pointee is a const-initialized static, valid since program
/// load; the pointer value itself is the only data exchanged.
#[doc(hidden)]
#[inline]
pub fn resolve(
    name: &'static str,
    cell: &'static Counter,
    canon: &AtomicPtr<Counter>,
) -> &'static Counter {
    let cached = canon.load(Ordering::Relaxed);
    if !cached.is_null() {
        // SAFETY: the cache only ever holds addresses of 'static cells,
        // stored below or by another thread racing the same call site.
        unsafe { &*cached }
    } else {
        resolve_slow(name, cell, canon)
    }
}

#[cold]
fn resolve_slow(
    name: &'static str,
    cell: &'static Counter,
    canon: &AtomicPtr<Counter>,
) -> &'static Counter {
    let registry = registry();
    let canonical = registry
        .find(name)
        .and_then(|index| registry.counter_of(index))
        .unwrap_or(cell);
    canon.store(
        canonical as *const Counter as *mut Counter,
        Ordering::Relaxed,
    );
    canonical
}
