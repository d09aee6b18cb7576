//! Parser for miRanda `//hit_info` records.
//!
//! Each record is one line: `//hit_info` followed by 14 tab-separated `key=value` pairs
//! in the order of [`HIT_INFO_FIELDS`]. Values are taken by position; keys are not
//! checked, and alignment strings keep their padding. Other lines of the report are
//! ignored.

use std::path::Path;

use tracing::{debug, warn};

use crate::core::binding::BindingHit;
use crate::parsing::{read_input, ParseError, ParsedBatch};

/// Marker that starts a binding-site record
pub const HIT_INFO_PREFIX: &str = "//hit_info\t";

/// Field order of a `//hit_info` record
pub const HIT_INFO_FIELDS: [&str; 14] = [
    "query_id",
    "reference_id",
    "score",
    "energy",
    "query_start",
    "query_end",
    "ref_start",
    "ref_end",
    "aln_length",
    "identity",
    "similarity",
    "aln_mirna",
    "aln_map",
    "aln_utr",
];

/// Parse a miRanda output file (plain or gzipped)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read. Malformed records are collected
/// in `ParsedBatch::rejected`.
pub fn parse_miranda_file(path: &Path) -> Result<ParsedBatch<BindingHit>, ParseError> {
    let text = read_input(path)?;
    let batch = parse_miranda_text(&text);
    debug!(
        "{}: {} binding hits, {} rejected",
        path.display(),
        batch.records.len(),
        batch.rejected.len()
    );
    Ok(batch)
}

/// Parse every `//hit_info` record in a miRanda report
pub fn parse_miranda_text(text: &str) -> ParsedBatch<BindingHit> {
    let mut batch = ParsedBatch::default();

    for (idx, line) in text.lines().enumerate() {
        let Some(record) = line.trim_end_matches('\r').strip_prefix(HIT_INFO_PREFIX) else {
            continue;
        };
        match parse_hit_info(record, idx + 1) {
            Ok(hit) => batch.records.push(hit),
            Err(e) => {
                warn!("{e}");
                batch.rejected.push(e);
            }
        }
    }

    batch
}

/// Parse the `key=value` part of one `//hit_info` line
///
/// # Errors
///
/// Returns `ParseError::MalformedHit` if the record does not have 14 `key=value` fields,
/// a numeric value does not parse, or the reference range is not a 1-based inclusive range.
pub fn parse_hit_info(record: &str, line_num: usize) -> Result<BindingHit, ParseError> {
    let malformed = |reason: String| ParseError::MalformedHit {
        line: line_num,
        reason,
    };

    let values = record
        .split('\t')
        .map(|kv| {
            kv.split_once('=')
                .map(|(_, value)| value)
                .ok_or_else(|| malformed(format!("'{kv}' is not a key=value pair")))
        })
        .collect::<Result<Vec<&str>, ParseError>>()?;

    if values.len() != HIT_INFO_FIELDS.len() {
        return Err(malformed(format!(
            "expected {} fields, found {}",
            HIT_INFO_FIELDS.len(),
            values.len()
        )));
    }

    let int = |idx: usize| -> Result<u64, ParseError> {
        values[idx].trim().parse::<u64>().map_err(|_| {
            malformed(format!("invalid {} '{}'", HIT_INFO_FIELDS[idx], values[idx]))
        })
    };
    let real = |idx: usize| -> Result<f64, ParseError> {
        values[idx].trim().parse::<f64>().map_err(|_| {
            malformed(format!("invalid {} '{}'", HIT_INFO_FIELDS[idx], values[idx]))
        })
    };

    let hit = BindingHit {
        query_id: values[0].trim().to_string(),
        reference_id: values[1].trim().to_string(),
        score: real(2)?,
        energy: real(3)?,
        query_start: int(4)?,
        query_end: int(5)?,
        ref_start: int(6)?,
        ref_end: int(7)?,
        aln_length: int(8)?,
        identity: real(9)?,
        similarity: real(10)?,
        aln_mirna: values[11].to_string(),
        aln_map: values[12].to_string(),
        aln_utr: values[13].to_string(),
    };

    if hit.query_id.is_empty() || hit.reference_id.is_empty() {
        return Err(malformed("empty query or reference id".to_string()));
    }
    if hit.ref_start == 0 || hit.ref_end < hit.ref_start {
        return Err(malformed(format!(
            "reference range {}-{} is not 1-based inclusive",
            hit.ref_start, hit.ref_end
        )));
    }

    Ok(hit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ref_start: &str, ref_end: &str) -> String {
        format!(
            "//hit_info\tquery_id=hsa-miR-7\treference_id=circ1\tscore=152.00\tenergy=-21.37\t\
             query_start=2\tquery_end=21\tref_start={ref_start}\tref_end={ref_end}\taln_length=20\t\
             identity=75.00\tsimilarity=85.00\taln_mirna=UGUUGGUCUAGAUUCUUGUG\t\
             aln_map=| |||||||:||||||||\taln_utr=ACAUCCAGAUCUAGGACAAC"
        )
    }

    #[test]
    fn test_parse_report() {
        let text = format!(
            "Read Sequence:circ1 (99 nt)\n{}\n>hsa-miR-7\tcirc1\t152.00\n",
            record("30", "49")
        );

        let batch = parse_miranda_text(&text);
        assert!(batch.rejected.is_empty());
        assert_eq!(batch.records.len(), 1);

        let hit = &batch.records[0];
        assert_eq!(hit.query_id, "hsa-miR-7");
        assert_eq!(hit.reference_id, "circ1");
        assert!((hit.energy + 21.37).abs() < 1e-9);
        assert_eq!((hit.ref_start, hit.ref_end), (30, 49));
        assert_eq!(hit.aln_map, "| |||||||:||||||||");
    }

    #[test]
    fn test_bad_ranges_rejected() {
        for (start, end) in [("0", "10"), ("20", "10"), ("x", "10")] {
            let text = format!("{}\n{}\n", record("1", "20"), record(start, end));
            let batch = parse_miranda_text(&text);
            assert_eq!(batch.records.len(), 1, "{start}-{end}");
            assert!(matches!(
                batch.rejected[..],
                [ParseError::MalformedHit { line: 2, .. }]
            ));
        }
    }

    #[test]
    fn test_wrong_field_count() {
        assert!(matches!(
            parse_hit_info("query_id=a\treference_id=b", 4),
            Err(ParseError::MalformedHit { line: 4, .. })
        ));
        assert!(parse_hit_info("no pairs here", 1).is_err());
    }
}
