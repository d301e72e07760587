//! CSV serialization of the registry.
//!
//! Three entry points cover the usual shutdown paths: [`dump`] writes the
//! default file, [`dump_to_path`] writes a caller-chosen file, and
//! [`dump_to_writer`] hands the records to any byte sink. [`dump_at_exit`]
//! installs a process-exit hook for programs that want the dump without
//! threading a call through their shutdown logic.
//!
//! Dump failures never disturb the counters themselves; the registry and
//! every cell remain valid and a later dump may succeed.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::registry::registry;

/// Default dump destination, relative to the working directory.
pub const DEFAULT_PATH: &str = "minprof.csv";

/// Failure to serialize the registry.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    /// The destination file could not be created or truncated.
    #[error("failed to create {}: {source}", .path.display())]
    Create {
        /// Destination that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A write or flush of counter records failed.
    #[error("failed to write counter data: {0}")]
    Write(#[from] io::Error),
}

/// Dump every registered counter to [`DEFAULT_PATH`] as CSV.
///
/// The file is created or truncated, written in registration order, and
/// flushed and closed before returning.
///
/// # Example
///
/// ```no_run
/// minprof::dump().expect("profile dump failed");
/// ```
pub fn dump() -> Result<(), DumpError> {
    dump_to_path(DEFAULT_PATH)
}

/// Dump every registered counter to the file at `path` as CSV.
///
/// The file is created or truncated, written in registration order, and
/// flushed and closed before returning.
pub fn dump_to_path<P: AsRef<Path>>(path: P) -> Result<(), DumpError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| DumpError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut sink = BufWriter::new(file);
    registry().dump(&mut sink)?;
    sink.flush()?;
    Ok(())
}

/// Dump every registered counter to an arbitrary byte sink as CSV.
///
/// Buffering and flushing are the sink's concern; nothing is flushed here.
///
/// # Example
///
/// ```
/// let mut csv = Vec::new();
/// minprof::dump_to_writer(&mut csv).unwrap();
/// ```
pub fn dump_to_writer<W: Write>(sink: &mut W) -> Result<(), DumpError> {
    registry().dump(sink)?;
    Ok(())
}

/// Install a process-exit hook that dumps to [`DEFAULT_PATH`].
///
/// Call once, any time before exit; repeated calls install nothing new. If
/// the dump fails at exit the reason is reported through a `tracing` error
/// event and the process exits normally.
///
/// # Example
///
/// ```no_run
/// minprof::dump_at_exit();
/// ```
pub fn dump_at_exit() {
    static ARMED: AtomicBool = AtomicBool::new(false);
    if !ARMED.swap(true, Ordering::SeqCst) {
        // SAFETY: registering an extern "C" handler with the C runtime;
        // the handler does not unwind.
        unsafe {
            libc::atexit(dump_on_exit);
        }
    }
}

extern "C" fn dump_on_exit() {
    if let Err(e) = dump() {
        tracing::error!(error = %e, path = DEFAULT_PATH, "Profile dump at exit failed");
    }
}
