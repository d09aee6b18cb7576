//! Parser for exon tables: one exon per row, grouped into features by id.
//!
//! Format: `feature_id\tchrom\tstart\tend\tstrand`, 0-based half-open coordinates.
//! Row order within a feature does not matter: blocks are stored sorted by genomic start
//! and the walk order is derived from the strand.

use std::collections::HashMap;
use std::path::Path;

use crate::core::feature::{BlockedFeature, FeatureError};
use crate::core::interval::Interval;
use crate::core::types::Strand;
use crate::parsing::{data_lines, read_input, ParseError};
use crate::utils::validation::check_block_limit;

/// The exons listed for one feature id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExonGroup {
    pub id: String,
    pub exons: Vec<Interval>,
    /// First row of this feature with an invalid strand or interval, and its line
    pub invalid_row: Option<(usize, FeatureError)>,
}

impl ExonGroup {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            exons: Vec::new(),
            invalid_row: None,
        }
    }

    /// Build the feature, merging overlapping exons when `union` is set
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::InvalidExon` naming the feature if one of its rows was
    /// invalid, or the `FeatureError` describing why the exons do not form one feature.
    pub fn build(&self, union: bool) -> Result<BlockedFeature, FeatureError> {
        if let Some((line, source)) = &self.invalid_row {
            return Err(FeatureError::InvalidExon {
                feature: self.id.clone(),
                line: *line,
                source: Box::new(source.clone()),
            });
        }

        if union {
            BlockedFeature::union(self.id.as_str(), &self.exons)
        } else {
            BlockedFeature::new(self.id.as_str(), &self.exons)
        }
    }
}

/// Parse an exon table file (plain or gzipped)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any error from
/// [`parse_exon_text`].
pub fn parse_exon_file(path: &Path) -> Result<Vec<ExonGroup>, ParseError> {
    let text = read_input(path)?;
    parse_exon_text(&text)
}

/// Parse exon table text into groups, in order of first appearance
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for short rows or non-numeric coordinates, or
/// `ParseError::TooManyBlocks` if a feature lists too many exons. A row with an invalid
/// strand or empty interval only fails its own feature, through [`ExonGroup::build`].
pub fn parse_exon_text(text: &str) -> Result<Vec<ExonGroup>, ParseError> {
    let mut groups: Vec<ExonGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut first_data_line = true;

    for (line_num, line) in data_lines(text) {
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();

        // Optional header row
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if first == "feature_id" || first == "id" || first == "name" {
                continue;
            }
        }

        if fields.len() < 5 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 5 fields"
            )));
        }

        let coord = |idx: usize, what: &str| -> Result<u64, ParseError> {
            fields[idx].parse::<u64>().map_err(|_| {
                ParseError::InvalidFormat(format!(
                    "Invalid {what} on line {line_num}: '{}'",
                    fields[idx]
                ))
            })
        };
        let (start, end) = (coord(2, "start")?, coord(3, "end")?);
        let exon = fields[4]
            .parse::<Strand>()
            .and_then(|strand| Interval::new(fields[1], start, end, strand));

        let id = fields[0];
        let slot = match index.get(id) {
            Some(&slot) => slot,
            None => {
                index.insert(id.to_string(), groups.len());
                groups.push(ExonGroup::new(id));
                groups.len() - 1
            }
        };

        let group = &mut groups[slot];
        match exon {
            Ok(exon) => group.exons.push(exon),
            Err(e) => {
                if group.invalid_row.is_none() {
                    group.invalid_row = Some((line_num, e));
                }
            }
        }
        if check_block_limit(group.exons.len()).is_some() {
            return Err(ParseError::TooManyBlocks {
                line: line_num,
                count: group.exons.len(),
            });
        }
    }

    if groups.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No exons found in table".to_string(),
        ));
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exon_table() {
        let text = "feature_id\tchrom\tstart\tend\tstrand\n\
                    c1\tchr1\t200\t260\t-\n\
                    c1\tchr1\t100\t150\t-\n\
                    c2\tchr2\t10\t20\t+\n";

        let groups = parse_exon_text(text).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id, "c1");
        assert_eq!(groups[0].exons.len(), 2);
        assert_eq!(groups[0].exons[0].start(), 200);

        let feature = groups[0].build(false).unwrap();
        assert_eq!(feature.total_length(), 110);
        assert_eq!(feature.strand(), Strand::Minus);
    }

    #[test]
    fn test_build_union() {
        let text = "u\tchr1\t10\t20\t+\nu\tchr1\t15\t25\t+\nu\tchr1\t30\t40\t+\n";
        let groups = parse_exon_text(text).unwrap();

        assert!(matches!(
            groups[0].build(false),
            Err(FeatureError::OverlappingBlocks { .. })
        ));
        assert_eq!(groups[0].build(true).unwrap().block_count(), 2);
    }

    #[test]
    fn test_invalid_row_fails_only_its_feature() {
        let text = "good\tchr1\t10\t20\t+\n\
                    bad\tchr1\t30\t40\t.\n\
                    bad\tchr1\t50\t60\t+\n\
                    also_good\tchr2\t5\t15\t-\n";
        let groups = parse_exon_text(text).unwrap();
        assert_eq!(groups.len(), 3);

        assert!(groups[0].build(false).is_ok());
        assert!(groups[2].build(false).is_ok());

        let err = groups[1].build(false).unwrap_err();
        assert!(err.to_string().contains("'bad'"));
        match err {
            FeatureError::InvalidExon {
                feature,
                line,
                source,
            } => {
                assert_eq!(feature, "bad");
                assert_eq!(line, 2);
                assert!(matches!(*source, FeatureError::InvalidStrand(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_mixed_chrom_surfaces_at_build() {
        let groups = parse_exon_text("c1\tchr1\t10\t20\t+\nc1\tchr2\t30\t40\t+\n").unwrap();
        assert!(matches!(
            groups[0].build(false),
            Err(FeatureError::InconsistentFeature { field: "chrom", .. })
        ));
    }

    #[test]
    fn test_bad_coordinates() {
        assert!(matches!(
            parse_exon_text("c1\tchr1\tten\t20\t+\n"),
            Err(ParseError::InvalidFormat(_))
        ));
        let groups = parse_exon_text("c1\tchr1\t20\t20\t+\n").unwrap();
        assert!(matches!(
            groups[0].build(true),
            Err(FeatureError::InvalidExon { ref source, line: 1, .. })
                if matches!(**source, FeatureError::InvalidInterval { .. })
        ));
        assert!(parse_exon_text("").is_err());
    }
}
