//! minprof: minimal always-on profiling.
//!
//! Lock-free monotonic counters and nanosecond timers, keyed by
//! compile-time string names, cheap enough to leave enabled in production.
//! A counter increment is a single relaxed atomic add; resolving a name
//! costs one relaxed pointer load once the call site has warmed. Every
//! named counter self-registers through the link table, so one call at
//! shutdown serializes everything the program ever referenced as CSV.
//!
//! The pieces, smallest first:
//!
//! - [`Counter`]: an add-only atomic 64-bit tally.
//! - [`Timer`]: the same cell read and written as nanoseconds.
//! - [`counter!`], [`timer!`], [`event!`]: name-keyed access to
//!   process-global cells.
//! - [`Stopwatch`]: manual start/split/stop interval measurement.
//! - [`ScopeTimer`] and [`timed!`]: time a scope on every exit path.
//! - [`Section`] and [`section!`]: count scope entries into `<name>|C`
//!   and time the scope into `<name>|T`.
//! - [`Registry`] and [`dump()`]: enumeration and CSV serialization of
//!   all named counters in registration order.
//!
//! # Architecture
//!
//! ```text
//!  macro call site           link table              registry (frozen)
//!  +--------------+      +-----------------+      +-------------------+
//!  | static cell  |----->| (name, &cell)   |----->| name -> canonical |
//!  | canon cache  |      | one per site    |      | cell, one entry   |
//!  +--------------+      +-----------------+      | per distinct name |
//!         |                                       +-------------------+
//!         v                                                |
//!   atomic add on                                          v
//!   canonical cell                              dump(): "name, value"
//!                                               records, CSV
//! ```
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! fn handle(request_bytes: usize) {
//!     minprof::section!("handle", {
//!         minprof::counter!("bytes-in").add(request_bytes as u64);
//!         if request_bytes == 0 {
//!             minprof::event!("empty-request");
//!             return;
//!         }
//!         std::thread::sleep(Duration::from_micros(50));
//!     });
//! }
//!
//! handle(512);
//! handle(0);
//!
//! assert_eq!(minprof::counter!("handle|C").value(), 2);
//! assert_eq!(minprof::counter!("bytes-in").value(), 512);
//!
//! // At shutdown, one call serializes every counter ever referenced.
//! let mut csv = Vec::new();
//! minprof::dump_to_writer(&mut csv).unwrap();
//! assert!(String::from_utf8(csv).unwrap().contains("bytes-in, 512"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Primitive cells
mod counter;
mod timer;

// Manual and scoped measurement
mod scope;
mod stopwatch;

// Registration and serialization
mod dump;
mod registry;

// Name-keyed facade macros
mod macros;

pub use counter::Counter;
pub use timer::Timer;

pub use scope::{ScopeTimer, Section};
pub use stopwatch::Stopwatch;

pub use dump::{DEFAULT_PATH, DumpError, dump, dump_at_exit, dump_to_path, dump_to_writer};
pub use registry::{Registry, registry};

// Macro plumbing, not public API.
#[doc(hidden)]
pub mod __private {
    pub use linkme;
    pub use std::sync::atomic::AtomicPtr;

    pub use crate::registry::{COUNTERS, CounterEntry, resolve};
}
