//! Line-oriented ingest of the delta and target files.
//!
//! Blank lines are skipped; malformed lines are skipped with a note on
//! stderr and are never fatal.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;
use crate::scalar::Delta;
use crate::targets::TargetSet;

/// Read signed decimal deltas, one per line, preserving file order.
pub fn read_deltas<R: BufRead>(reader: R) -> Result<Vec<Delta>> {
    let mut deltas = Vec::new();
    let mut skipped = 0usize;
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<Delta>() {
            Ok(d) => deltas.push(d),
            Err(_) => skipped += 1,
        }
    }
    if skipped > 0 {
        eprintln!("[!] Skipped {} malformed delta lines", skipped);
    }
    Ok(deltas)
}

pub fn load_deltas(path: &Path) -> Result<Vec<Delta>> {
    read_deltas(BufReader::new(File::open(path)?))
}

/// Read hex-encoded target X-coordinates, one per line.
pub fn read_targets<R: BufRead>(reader: R) -> Result<TargetSet> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            lines.push(line.to_string());
        }
    }
    let (set, skipped) = TargetSet::from_encoded(&lines);
    if skipped > 0 {
        eprintln!("[!] Skipped {} malformed target lines", skipped);
    }
    Ok(set)
}

pub fn load_targets(path: &Path) -> Result<TargetSet> {
    read_targets(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::XCoordinate;
    use std::io::Cursor;

    #[test]
    fn deltas_parse_in_file_order() {
        let input = "5\n-37\n\n  \n18446744073709551616\n";
        let deltas = read_deltas(Cursor::new(input)).unwrap();
        assert_eq!(deltas.len(), 3);
        assert_eq!(deltas[0], Delta::from_i64(5));
        assert_eq!(deltas[1], Delta::from_i64(-37));
        assert_eq!(deltas[2].to_string(), "18446744073709551616");
    }

    #[test]
    fn malformed_delta_lines_are_skipped() {
        let input = "10\nnot-a-number\n-20\n1.5\n";
        let deltas = read_deltas(Cursor::new(input)).unwrap();
        assert_eq!(deltas, vec![Delta::from_i64(10), Delta::from_i64(-20)]);
    }

    #[test]
    fn targets_parse_with_blank_and_bad_lines() {
        let g_x = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
        let input = format!("{}\n\nnothex\n{}\n", g_x, "ab".repeat(32));
        let set = read_targets(Cursor::new(input)).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&XCoordinate::from_hex(g_x).unwrap()));
    }

    #[test]
    fn empty_input_gives_empty_collections() {
        assert!(read_deltas(Cursor::new("")).unwrap().is_empty());
        assert!(read_targets(Cursor::new("\n\n")).unwrap().is_empty());
    }
}
