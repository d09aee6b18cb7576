//! BED12 reader and writer for blocked features.
//!
//! Format: `chrom start end name score strand thickStart thickEnd itemRGB blockCount
//! blockSizes blockStarts`. Block starts are relative to `start` and listed in ascending
//! genomic order whatever the strand. Six-column BED lines are read as single-block
//! features.

use std::path::Path;

use tracing::{debug, warn};

use crate::core::feature::{Block, BlockedFeature};
use crate::core::types::Strand;
use crate::parsing::{data_lines, read_input, ParseError, ParsedBatch};
use crate::utils::validation::{check_block_limit, join_u64_list, parse_u64_list};

/// Column names of a BED12 record
pub const BED12_COLUMNS: [&str; 12] = [
    "chrom",
    "start",
    "end",
    "name",
    "score",
    "strand",
    "thickStart",
    "thickEnd",
    "itemRGB",
    "blockCount",
    "blockSizes",
    "blockStarts",
];

/// Format a feature as one BED12 line (no trailing newline)
#[must_use]
pub fn to_bed12(feature: &BlockedFeature) -> String {
    let sizes: Vec<u64> = feature.blocks().iter().map(|b| b.length).collect();
    let starts: Vec<u64> = feature.blocks().iter().map(|b| b.offset).collect();

    format!(
        "{chrom}\t{start}\t{end}\t{name}\t.\t{strand}\t{start}\t{end}\t0\t{count}\t{sizes}\t{starts}",
        chrom = feature.chrom(),
        start = feature.start(),
        end = feature.end(),
        name = feature.name(),
        strand = feature.strand(),
        count = feature.block_count(),
        sizes = join_u64_list(&sizes),
        starts = join_u64_list(&starts),
    )
}

/// Parse a BED/BED12 file (plain or gzipped)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read. Invalid features are collected in
/// `ParsedBatch::rejected`.
pub fn parse_bed_file(path: &Path) -> Result<ParsedBatch<BlockedFeature>, ParseError> {
    let text = read_input(path)?;
    let batch = parse_bed_text(&text);
    debug!(
        "{}: {} features, {} rejected",
        path.display(),
        batch.records.len(),
        batch.rejected.len()
    );
    Ok(batch)
}

/// Parse BED text; each invalid feature is rejected on its own
pub fn parse_bed_text(text: &str) -> ParsedBatch<BlockedFeature> {
    let mut batch = ParsedBatch::default();

    for (line_num, line) in data_lines(text) {
        if line.starts_with("track") || line.starts_with("browser") {
            continue;
        }
        match parse_bed_line(line, line_num) {
            Ok(feature) => batch.records.push(feature),
            Err(e) => {
                warn!("{e}");
                batch.rejected.push(e);
            }
        }
    }

    batch
}

/// Parse one BED6 or BED12 line
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for missing or non-numeric columns,
/// `ParseError::TooManyBlocks` if the block limit is exceeded, or `ParseError::Feature`
/// for an invalid strand or block layout.
pub fn parse_bed_line(line: &str, line_num: usize) -> Result<BlockedFeature, ParseError> {
    let invalid = |reason: String| ParseError::InvalidFormat(format!("line {line_num}: {reason}"));

    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if fields.len() < 6 {
        return Err(invalid(format!(
            "expected at least 6 fields, found {}",
            fields.len()
        )));
    }

    let coord = |idx: usize| -> Result<u64, ParseError> {
        fields[idx]
            .parse::<u64>()
            .map_err(|_| invalid(format!("invalid {} '{}'", BED12_COLUMNS[idx], fields[idx])))
    };

    let chrom = fields[0];
    let start = coord(1)?;
    let end = coord(2)?;
    let name = fields[3];
    let strand: Strand = fields[5]
        .parse()
        .map_err(|source| ParseError::Feature {
            line: line_num,
            source,
        })?;

    let blocks = if fields.len() >= 12 {
        let count: usize = fields[9]
            .parse()
            .map_err(|_| invalid(format!("invalid blockCount '{}'", fields[9])))?;
        if check_block_limit(count).is_some() {
            return Err(ParseError::TooManyBlocks {
                line: line_num,
                count,
            });
        }

        let sizes = parse_u64_list(fields[10]).map_err(&invalid)?;
        let starts = parse_u64_list(fields[11]).map_err(&invalid)?;
        if sizes.len() != count || starts.len() != count {
            return Err(invalid(format!(
                "blockCount {count} does not match {} sizes and {} starts",
                sizes.len(),
                starts.len()
            )));
        }

        sizes
            .into_iter()
            .zip(starts)
            .map(|(length, offset)| Block { offset, length })
            .collect::<Vec<_>>()
    } else {
        vec![Block {
            offset: 0,
            length: end.saturating_sub(start),
        }]
    };

    let feature = BlockedFeature::from_blocks(name, chrom, strand, start, &blocks).map_err(
        |source| ParseError::Feature {
            line: line_num,
            source,
        },
    )?;

    if feature.start() != start || feature.end() != end {
        return Err(invalid(format!(
            "blocks of '{name}' span {}-{}, not {start}-{end}",
            feature.start(),
            feature.end()
        )));
    }

    Ok(feature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::feature::FeatureError;
    use crate::core::interval::Interval;

    fn two_exon(strand: Strand) -> BlockedFeature {
        BlockedFeature::new(
            "circ1",
            &[
                Interval::new("chr1", 100, 150, strand).unwrap(),
                Interval::new("chr1", 200, 260, strand).unwrap(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_to_bed12_storage_order() {
        assert_eq!(
            to_bed12(&two_exon(Strand::Minus)),
            "chr1\t100\t260\tcirc1\t.\t-\t100\t260\t0\t2\t50,60\t0,100"
        );
    }

    #[test]
    fn test_parse_written_line() {
        for strand in [Strand::Plus, Strand::Minus] {
            let feature = two_exon(strand);
            assert_eq!(parse_bed_line(&to_bed12(&feature), 1).unwrap(), feature);
        }
    }

    #[test]
    fn test_parse_trailing_commas_and_bed6() {
        let text = "track name=circ\nchr2\t10\t40\tf1\t0\t+\t10\t40\t0\t2\t10,10,\t0,20,\nchr2\t5\t9\tf2\t0\t-\n";
        let batch = parse_bed_text(text);
        assert!(batch.rejected.is_empty());
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0].total_length(), 20);
        assert_eq!(batch.records[1].block_count(), 1);
        assert_eq!(batch.records[1].strand(), Strand::Minus);
    }

    #[test]
    fn test_invalid_features_rejected_individually() {
        let text = "chr1\t10\t40\tbad_strand\t0\t*\nchr1\t10\t40\tbad_count\t0\t+\t10\t40\t0\t3\t10,10\t0,20\nchr1\t10\t40\tok\t0\t+\t10\t40\t0\t2\t10,10\t0,20\nchr1\t10\t50\tbad_span\t0\t+\t10\t50\t0\t2\t10,10\t0,20\n";
        let batch = parse_bed_text(text);

        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].name(), "ok");
        assert_eq!(batch.rejected.len(), 3);
        assert!(matches!(
            batch.rejected[0],
            ParseError::Feature {
                line: 1,
                source: FeatureError::InvalidStrand(_)
            }
        ));
        assert!(matches!(batch.rejected[1], ParseError::InvalidFormat(_)));
        assert!(matches!(batch.rejected[2], ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_overlapping_blocks_rejected() {
        let line = "chr1\t10\t40\tov\t0\t+\t10\t40\t0\t2\t20,20\t0,10";
        assert!(matches!(
            parse_bed_line(line, 3),
            Err(ParseError::Feature {
                line: 3,
                source: FeatureError::OverlappingBlocks { .. }
            })
        ));
    }

    #[test]
    fn test_block_past_u64_max_rejected() {
        let line = "chr1\t18446744073709551600\t18446744073709551615\thuge\t0\t+\t0\t0\t0\t1\t100\t0";
        let batch = parse_bed_text(line);
        assert!(batch.records.is_empty());
        assert!(matches!(
            batch.rejected[..],
            [ParseError::Feature {
                line: 1,
                source: FeatureError::InvalidInterval { .. }
            }]
        ));
    }
}
