//! Progress reporting for the download loop.
//!
//! The byte-copy loop reports every chunk through a [`ProgressObserver`];
//! rendering policy (boundaries, percentages, terminal output) lives in the
//! observer so the copy logic stays deterministic under test.

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::DownloadProgress;

/// Receives download lifecycle events.
pub trait ProgressObserver: Send + Sync {
    /// Called once before the first chunk; `total_bytes` is 0 when the
    /// server did not declare a content length.
    fn on_start(&self, total_bytes: u64);

    /// Called after each chunk is flushed to disk.
    fn on_chunk(&self, progress: DownloadProgress);

    /// Called once after the last chunk.
    fn on_finish(&self, progress: DownloadProgress);
}

/// Observer that swallows all events; used by tests and library callers
/// that do their own reporting.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressObserver for NullProgress {
    fn on_start(&self, _total_bytes: u64) {}
    fn on_chunk(&self, _progress: DownloadProgress) {}
    fn on_finish(&self, _progress: DownloadProgress) {}
}

/// Console observer printing a progress line each time the byte count
/// crosses a step boundary (1 MiB by default).
#[derive(Debug)]
pub struct ConsoleProgress {
    /// Reporting granularity in bytes
    step: u64,

    /// Last step index reported
    last_step: AtomicU64,

    /// Suppress all output
    quiet: bool,
}

impl ConsoleProgress {
    /// Create a console observer with the given step size
    pub fn new(step: u64) -> Self {
        Self {
            step: step.max(1),
            last_step: AtomicU64::new(0),
            quiet: false,
        }
    }

    /// Create an observer that tracks boundaries but prints nothing
    pub fn quiet(step: u64) -> Self {
        Self {
            step: step.max(1),
            last_step: AtomicU64::new(0),
            quiet: true,
        }
    }
}

impl ProgressObserver for ConsoleProgress {
    fn on_start(&self, total_bytes: u64) {
        if !self.quiet && total_bytes > 0 {
            println!("file size: {:.2} MiB", mib(total_bytes));
        }
    }

    fn on_chunk(&self, progress: DownloadProgress) {
        let current = step_index(progress.bytes_downloaded, self.step);
        let previous = self.last_step.swap(current, Ordering::SeqCst);

        if current <= previous || self.quiet {
            return;
        }

        match progress.percent() {
            Some(percent) => print!(
                "\rprogress: {:.1}% ({:.1}/{:.1} MiB)",
                percent,
                mib(progress.bytes_downloaded),
                mib(progress.total_bytes)
            ),
            None => print!("\rprogress: {} bytes", progress.bytes_downloaded),
        }
        let _ = std::io::stdout().flush();
    }

    fn on_finish(&self, progress: DownloadProgress) {
        if !self.quiet && step_index(progress.bytes_downloaded, self.step) > 0 {
            println!();
        }
    }
}

/// Which reporting step a byte count falls into
pub(crate) fn step_index(bytes: u64, step: u64) -> u64 {
    bytes / step.max(1)
}

fn mib(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}
