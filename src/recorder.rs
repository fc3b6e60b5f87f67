//! Durable, ordered persistence of confirmed hits.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::progress::Console;
use crate::scalar::Scalar;
use crate::types::XCoordinate;

/// A confirmed match: candidate private key and the target X-coordinate it
/// derived to.
#[derive(Clone, Copy, Debug)]
pub struct Hit {
    pub private_key: Scalar,
    pub x: XCoordinate,
}

impl Hit {
    /// Hit file line: `<private key decimal>,<x hex>`.
    pub fn to_line(&self) -> String {
        format!("{},{}\n", self.private_key, self.x.to_hex())
    }
}

/// Append-only hit log shared by all workers.
///
/// The file mutex keeps concurrent hits from interleaving; each line is
/// flushed and synced before `record` returns, so a found key survives a
/// crash immediately after.
pub struct HitRecorder {
    file: Mutex<File>,
    console: Arc<Console>,
}

impl HitRecorder {
    pub fn open(path: &Path, console: Arc<Console>) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
            console,
        })
    }

    /// Announce and persist one hit. A write failure cannot be returned to
    /// anyone who could act on it, so it is made as loud as possible
    /// instead of being dropped.
    pub fn record(&self, hit: &Hit) {
        self.console.notice(&format!(
            "[FOUND] Key: {} X: {}",
            hit.private_key,
            hit.x.to_hex()
        ));

        let line = hit.to_line();
        let mut file = self.file.lock();
        let written = file
            .write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .and_then(|_| file.sync_data());
        if let Err(e) = written {
            eprintln!(
                "[!] CRITICAL: failed to persist hit {}: {}",
                line.trim_end(),
                e
            );
        }
    }
}
