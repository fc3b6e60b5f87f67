//! Immutable membership set over target public-key X-coordinates.

use fxhash::FxHashSet;
use rayon::prelude::*;

use crate::types::XCoordinate;

/// Read-only set of target X-coordinates, built once before the workers
/// start and shared across threads without locking.
pub struct TargetSet {
    xs: FxHashSet<XCoordinate>,
}

impl TargetSet {
    /// Build from already-decoded coordinates. Duplicates collapse.
    pub fn new(ids: impl IntoIterator<Item = XCoordinate>) -> Self {
        Self {
            xs: ids.into_iter().collect(),
        }
    }

    /// Build from hex-encoded lines, decoding in parallel. Returns the set
    /// and the number of lines that failed to decode.
    pub fn from_encoded(lines: &[String]) -> (Self, usize) {
        let decoded: Vec<XCoordinate> = lines
            .par_iter()
            .filter_map(|line| XCoordinate::from_hex(line))
            .collect();
        let skipped = lines.len() - decoded.len();
        (Self::new(decoded), skipped)
    }

    #[inline]
    pub fn contains(&self, x: &XCoordinate) -> bool {
        self.xs.contains(x)
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G_X: &str = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

    #[test]
    fn membership_is_reflexive() {
        let inserted = XCoordinate::from_hex(G_X).unwrap();
        let set = TargetSet::new([inserted]);
        assert!(set.contains(&inserted));
        assert!(!set.contains(&XCoordinate::from_slice(&[0xAB; 32])));
    }

    #[test]
    fn duplicates_collapse() {
        let x = XCoordinate::from_slice(&[7u8; 32]);
        let set = TargetSet::new([x, x, x]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn encoded_lines_decode_and_malformed_are_counted() {
        let lines: Vec<String> = vec![
            G_X.to_string(),
            G_X.to_uppercase(),
            "not-hex".to_string(),
            "abcd".to_string(),
        ];
        let (set, skipped) = TargetSet::from_encoded(&lines);
        // Upper and lower case decode to the same coordinate.
        assert_eq!(set.len(), 1);
        assert_eq!(skipped, 2);
        assert!(set.contains(&XCoordinate::from_hex(G_X).unwrap()));
    }

    #[test]
    fn shared_reads_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let x = XCoordinate::from_slice(&[1u8; 32]);
        let set = Arc::new(TargetSet::new([x]));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let set = set.clone();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        assert!(set.contains(&XCoordinate::from_slice(&[1u8; 32])));
                        assert!(!set.contains(&XCoordinate::from_slice(&[2u8; 32])));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("reader thread panicked");
        }
    }
}
