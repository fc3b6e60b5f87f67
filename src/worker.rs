//! The per-thread search loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::candidates::CandidateStream;
use crate::derive::KeyDerivation;
use crate::progress::ProgressMeter;
use crate::recorder::{Hit, HitRecorder};
use crate::scalar::{Delta, Scalar};
use crate::targets::TargetSet;

/// One worker: draws random bases, expands them against the shared delta
/// sequence, derives and checks every candidate. Workers share nothing
/// mutable except the progress counter, the hit log, and the shutdown flag.
pub struct Worker<D: KeyDerivation + ?Sized> {
    deltas: Arc<Vec<Delta>>,
    targets: Arc<TargetSet>,
    deriver: Arc<D>,
    recorder: Arc<HitRecorder>,
    progress: Arc<ProgressMeter>,
    shutdown: Arc<AtomicBool>,
    window: u64,
}

impl<D: KeyDerivation + ?Sized> Worker<D> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        deltas: Arc<Vec<Delta>>,
        targets: Arc<TargetSet>,
        deriver: Arc<D>,
        recorder: Arc<HitRecorder>,
        progress: Arc<ProgressMeter>,
        shutdown: Arc<AtomicBool>,
        window: u64,
    ) -> Self {
        Self {
            deltas,
            targets,
            deriver,
            recorder,
            progress,
            shutdown,
            window,
        }
    }

    /// Run until the shared shutdown flag is raised. The flag is checked
    /// once per sampling round, so shutdown latency is bounded by one pass
    /// over the delta sequence.
    pub fn run(&self) {
        // Thread-local source: no contention and no cross-worker
        // correlation between the sampled bases.
        let mut rng = rand::thread_rng();
        while !self.shutdown.load(Ordering::Relaxed) {
            let base = Scalar::random(&mut rng);
            self.scan_round(base);
        }
    }

    /// One full pass over the delta sequence for a fixed base. Public so
    /// tests can force a base and run an exact number of rounds. Returns
    /// the number of candidates attempted.
    pub fn scan_round(&self, base: Scalar) -> u64 {
        let mut attempted = 0u64;
        for delta in self.deltas.iter() {
            for candidate in CandidateStream::new(base, delta, self.window) {
                attempted += 1;
                self.progress.record();
                // A derivation failure means no match is possible for this
                // candidate; skip without noise or retry.
                let x = match self.deriver.derive(&candidate) {
                    Ok(x) => x,
                    Err(_) => continue,
                };
                if self.targets.contains(&x) {
                    self.recorder.record(&Hit {
                        private_key: candidate,
                        x,
                    });
                }
            }
        }
        attempted
    }
}
