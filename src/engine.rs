//! Worker pool orchestration.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crate::candidates::DEFAULT_WINDOW;
use crate::derive::KeyDerivation;
use crate::error::Result;
use crate::progress::{Console, ProgressMeter, DEFAULT_REPORT_INTERVAL};
use crate::recorder::HitRecorder;
use crate::scalar::Delta;
use crate::targets::TargetSet;
use crate::worker::Worker;

pub const DEFAULT_HITS_FILE: &str = "found_keys.txt";

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Worker threads; `None` means one per available core.
    pub threads: Option<usize>,
    /// Consecutive offsets tried per (base, delta) pair.
    pub window: u64,
    /// Candidates between progress lines.
    pub report_interval: u64,
    /// Append-only hit log path.
    pub hits_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: None,
            window: DEFAULT_WINDOW,
            report_interval: DEFAULT_REPORT_INTERVAL,
            hits_path: PathBuf::from(DEFAULT_HITS_FILE),
        }
    }
}

impl EngineConfig {
    fn resolved_threads(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

/// Owns the shared services and the worker pool.
///
/// The delta sequence and target set are read-only for the engine's whole
/// lifetime; the only mutable shared state is the progress counter, the hit
/// log, and the shutdown flag.
pub struct Engine {
    config: EngineConfig,
    deltas: Arc<Vec<Delta>>,
    targets: Arc<TargetSet>,
    deriver: Arc<dyn KeyDerivation>,
    recorder: Arc<HitRecorder>,
    progress: Arc<ProgressMeter>,
    shutdown: Arc<AtomicBool>,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        deltas: Vec<Delta>,
        targets: TargetSet,
        deriver: Arc<dyn KeyDerivation>,
    ) -> Result<Self> {
        let console = Arc::new(Console::new());
        let recorder = Arc::new(HitRecorder::open(&config.hits_path, console.clone())?);
        let progress = Arc::new(ProgressMeter::new(config.report_interval, console));
        Ok(Self {
            config,
            deltas: Arc::new(deltas),
            targets: Arc::new(targets),
            deriver,
            recorder,
            progress,
            shutdown: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Handle for external cancellation (signal handlers, tests).
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        self.shutdown.clone()
    }

    pub fn request_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    pub fn keys_processed(&self) -> u64 {
        self.progress.total()
    }

    /// Spawn the workers and block until they all exit after a shutdown
    /// request. No partitioning: every worker runs the same randomized
    /// loop, so load balances statistically.
    pub fn run(&self) -> Result<()> {
        let threads = self.config.resolved_threads().max(1);
        let mut handles = Vec::with_capacity(threads);
        for _ in 0..threads {
            let worker = Worker::new(
                self.deltas.clone(),
                self.targets.clone(),
                self.deriver.clone(),
                self.recorder.clone(),
                self.progress.clone(),
                self.shutdown.clone(),
                self.config.window,
            );
            handles.push(thread::spawn(move || worker.run()));
        }
        for handle in handles {
            if handle.join().is_err() {
                eprintln!("[!] A worker thread panicked during shutdown");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::DerivationError;
    use crate::scalar::Scalar;
    use crate::types::XCoordinate;
    use std::fs;
    use std::time::Duration;

    struct IdentityDeriver;

    impl KeyDerivation for IdentityDeriver {
        fn derive(&self, key: &Scalar) -> std::result::Result<XCoordinate, DerivationError> {
            if !key.is_valid_private_key() {
                return Err(DerivationError::OutOfRange);
            }
            Ok(XCoordinate::from_slice(&key.to_be_bytes()))
        }
    }

    fn test_config(name: &str, threads: usize) -> EngineConfig {
        EngineConfig {
            threads: Some(threads),
            window: 4,
            report_interval: 1_000_000,
            hits_path: std::env::temp_dir().join(format!(
                "deltahunt_engine_{}_{}",
                name,
                std::process::id()
            )),
        }
    }

    #[test]
    fn runs_until_shutdown_and_joins_cleanly() {
        let config = test_config("join", 2);
        let hits_path = config.hits_path.clone();
        let engine = Engine::new(
            config,
            vec![crate::scalar::Delta::from_i64(1)],
            TargetSet::new([]),
            Arc::new(IdentityDeriver),
        )
        .unwrap();

        let shutdown = engine.shutdown_handle();
        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            shutdown.store(true, Ordering::SeqCst);
        });

        engine.run().unwrap();
        stopper.join().unwrap();

        // Both workers had time for at least one sampling round each.
        assert!(engine.keys_processed() > 0);
        let _ = fs::remove_file(&hits_path);
    }

    #[test]
    fn immediate_shutdown_processes_nothing_new_after_join() {
        let config = test_config("immediate", 1);
        let hits_path = config.hits_path.clone();
        let engine = Engine::new(
            config,
            vec![crate::scalar::Delta::from_i64(1)],
            TargetSet::new([]),
            Arc::new(IdentityDeriver),
        )
        .unwrap();

        engine.request_shutdown();
        engine.run().unwrap();

        // All workers joined; the counter must not move afterwards.
        let settled = engine.keys_processed();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(engine.keys_processed(), settled);
        let _ = fs::remove_file(&hits_path);
    }

    #[test]
    fn default_config_matches_documented_values() {
        let config = EngineConfig::default();
        assert_eq!(config.window, 4);
        assert_eq!(config.report_interval, 100);
        assert_eq!(config.hits_path, PathBuf::from("found_keys.txt"));
        assert!(config.resolved_threads() >= 1);
    }
}
