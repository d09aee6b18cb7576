//! Readers and writers for the tabular formats the core exchanges with external tools.
//!
//! This module provides parsers for:
//!
//! - **PSL files**: 21-column alignment summaries, with or without the `psLayout` header
//! - **BED12 files**: blocked features for interval-intersection tools
//! - **Exon tables**: `feature_id, chrom, start, end, strand` rows, one exon per row
//! - **miRanda output**: `//hit_info` key-value records of predicted binding sites
//!
//! Any input whose name ends in `.gz` is decompressed on the fly.
//!
//! ## Error policy
//!
//! Alignment and binding-site output is noisy, so a malformed record is dropped, logged
//! and returned in [`ParsedBatch::rejected`] while the rest of the batch is kept. Exon
//! tables and BED12 features describe structure: a bad row or feature is reported with
//! its line number and feature name.
//!
//! ## Example
//!
//! ```rust,no_run
//! use circkit::parsing::psl::parse_psl_file;
//! use std::path::Path;
//!
//! let batch = parse_psl_file(Path::new("hits.psl.gz")).unwrap();
//! println!("{} hits, {} rejected", batch.records.len(), batch.rejected.len());
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

use crate::core::feature::FeatureError;

pub mod bed;
pub mod exons;
pub mod miranda;
pub mod psl;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Malformed hit on line {line}: {reason}")]
    MalformedHit { line: usize, reason: String },

    #[error("Invalid feature on line {line}: {source}")]
    Feature {
        line: usize,
        #[source]
        source: FeatureError,
    },

    #[error("Too many blocks on line {line}: {count} exceeds maximum allowed (100000)")]
    TooManyBlocks { line: usize, count: usize },
}

/// Records parsed from a noisy source, plus the records that were dropped
#[derive(Debug)]
pub struct ParsedBatch<T> {
    pub records: Vec<T>,
    pub rejected: Vec<ParseError>,
}

impl<T> Default for ParsedBatch<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Read a whole text input, decompressing gzip by file name
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened, decompressed or decoded as UTF-8.
pub fn read_input(path: &Path) -> Result<String, ParseError> {
    let file = File::open(path)?;
    let mut text = String::new();

    if is_gzipped(path) {
        GzDecoder::new(file).read_to_string(&mut text)?;
    } else {
        BufReader::new(file).read_to_string(&mut text)?;
    }

    Ok(text)
}

/// Data lines of a tab-separated text with 1-based line numbers; blank lines and
/// `#` comments skipped
pub(crate) fn data_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty() && !line.starts_with('#'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_input_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lines.txt.gz");

        let file = File::create(&path).unwrap();
        let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        encoder.write_all(b"chr1\t1\t2\n").unwrap();
        encoder.finish().unwrap();

        assert_eq!(read_input(&path).unwrap(), "chr1\t1\t2\n");
    }

    #[test]
    fn test_data_lines_skips_comments() {
        let lines: Vec<(usize, &str)> = data_lines("# header\n\nrow1\r\nrow2\n").collect();
        assert_eq!(lines, vec![(3, "row1"), (4, "row2")]);
    }
}
