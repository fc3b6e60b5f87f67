//! Offset-window expansion of a (base, delta) pair into key candidates.

use crate::scalar::{Delta, Scalar};

/// Default number of consecutive offsets tried per (base, delta) pair.
pub const DEFAULT_WINDOW: u64 = 4;

/// Lazy iterator over the candidates for one (base, delta) pair:
/// `(base − delta) mod N`, `+1`, `+2`, … up to `window` values, in
/// ascending offset order. Candidates that are not valid private keys
/// (zero, or offsets that wrapped past N back to zero) are filtered out,
/// not replaced, so the stream yields at most `window` scalars.
pub struct CandidateStream {
    start: Scalar,
    offset: u64,
    window: u64,
}

impl CandidateStream {
    pub fn new(base: Scalar, delta: &Delta, window: u64) -> Self {
        Self {
            start: base.sub_mod(delta),
            offset: 0,
            window,
        }
    }
}

impl Iterator for CandidateStream {
    type Item = Scalar;

    fn next(&mut self) -> Option<Scalar> {
        while self.offset < self.window {
            let candidate = self.start.add_offset_mod(self.offset);
            self.offset += 1;
            if candidate.is_valid_private_key() {
                return Some(candidate);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some((self.window - self.offset) as usize))
    }
}
