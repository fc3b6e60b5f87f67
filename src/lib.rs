//! deltahunt: parallel randomized delta-offset search over secp256k1
//! private keys.
//!
//! Each worker repeatedly samples a random base scalar, subtracts every
//! precomputed delta, expands a small offset window around the result,
//! derives the public key for each candidate, and checks its X-coordinate
//! against a shared target set. Hits are appended durably; everything else
//! is thrown away and the loop continues until shutdown.
//!
//! Module map:
//! - `scalar`: full 256-bit arithmetic over the curve order
//! - `candidates`: offset-window expansion of a (base, delta) pair
//! - `targets`: the immutable membership set
//! - `derive`: the `KeyDerivation` seam over k256
//! - `worker` / `engine`: the search loop and the pool around it
//! - `recorder` / `progress`: hit persistence and progress accounting
//! - `sources`: line-oriented file ingest

pub mod candidates;
pub mod derive;
pub mod engine;
pub mod error;
pub mod progress;
pub mod recorder;
pub mod scalar;
pub mod sources;
pub mod targets;
pub mod types;
pub mod worker;
