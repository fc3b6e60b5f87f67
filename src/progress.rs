//! Progress accounting and serialized console output.

use std::io::{stdout, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// Default number of candidates between progress lines.
pub const DEFAULT_REPORT_INTERVAL: u64 = 100;

/// Shared print lock. Every status line and hit notice goes through here so
/// concurrent workers never interleave output mid-line.
pub struct Console {
    lock: Mutex<()>,
}

impl Console {
    pub fn new() -> Self {
        Self { lock: Mutex::new(()) }
    }

    /// In-place status line, rewritten with `\r`.
    pub fn status(&self, msg: &str) {
        let _guard = self.lock.lock();
        print!("{}\r", msg);
        stdout().flush().ok();
    }

    /// Full line, breaking out of any pending status line.
    pub fn notice(&self, msg: &str) {
        let _guard = self.lock.lock();
        println!("\n{}", msg);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide candidate counter with periodic status emission.
///
/// The count itself is exact: one relaxed increment per attempted
/// candidate. The printing is best-effort observability; the race between
/// two workers both landing on a multiple of the interval is accepted.
pub struct ProgressMeter {
    processed: AtomicU64,
    interval: u64,
    console: Arc<Console>,
}

impl ProgressMeter {
    pub fn new(interval: u64, console: Arc<Console>) -> Self {
        Self {
            processed: AtomicU64::new(0),
            interval: interval.max(1),
            console,
        }
    }

    /// Count one attempted candidate.
    #[inline]
    pub fn record(&self) {
        let done = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        if done % self.interval == 0 {
            self.console.status(&format!("Processed {}", done));
        }
    }

    pub fn total(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }
}
