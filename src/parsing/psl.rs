//! Parser for PSL alignment summaries (BLAT output).
//!
//! Format: 21 tab-separated columns
//! `matches misMatches repMatches nCount qNumInsert qBaseInsert tNumInsert tBaseInsert
//! strand qName qSize qStart qEnd tName tSize tStart tEnd blockCount blockSizes qStarts tStarts`,
//! optionally preceded by the 5-line `psLayout` header.

use std::path::Path;

use tracing::{debug, warn};

use crate::core::alignment::AlignmentHit;
use crate::parsing::{data_lines, read_input, ParseError, ParsedBatch};
use crate::utils::validation::{check_block_limit, parse_u64_list};

/// Number of columns in a PSL record
pub const PSL_FIELDS: usize = 21;

/// Lines taken up by the `psLayout` header
const PSL_HEADER_LINES: usize = 5;

/// Parse a PSL file (plain or gzipped)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read. Malformed records do not fail the
/// call; they are collected in `ParsedBatch::rejected`.
pub fn parse_psl_file(path: &Path) -> Result<ParsedBatch<AlignmentHit>, ParseError> {
    let text = read_input(path)?;
    let batch = parse_psl_text(&text);
    debug!(
        "{}: {} PSL records, {} rejected",
        path.display(),
        batch.records.len(),
        batch.rejected.len()
    );
    Ok(batch)
}

/// Parse PSL text, dropping and logging malformed records
pub fn parse_psl_text(text: &str) -> ParsedBatch<AlignmentHit> {
    let skip = if text.starts_with("psLayout") {
        PSL_HEADER_LINES
    } else {
        0
    };

    let mut batch = ParsedBatch::default();
    for (line_num, line) in data_lines(text).filter(|(n, _)| *n > skip) {
        match parse_psl_line(line, line_num) {
            Ok(hit) => batch.records.push(hit),
            Err(e) => {
                warn!("{e}");
                batch.rejected.push(e);
            }
        }
    }
    batch
}

/// Parse one PSL data line
///
/// # Errors
///
/// Returns `ParseError::MalformedHit` for a wrong column count, non-numeric fields or
/// inconsistent coordinates, or `ParseError::TooManyBlocks` if the block limit is exceeded.
pub fn parse_psl_line(line: &str, line_num: usize) -> Result<AlignmentHit, ParseError> {
    let malformed = |reason: String| ParseError::MalformedHit {
        line: line_num,
        reason,
    };

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != PSL_FIELDS {
        return Err(malformed(format!(
            "expected {PSL_FIELDS} fields, found {}",
            fields.len()
        )));
    }

    let num = |idx: usize, name: &str| -> Result<u64, ParseError> {
        fields[idx].trim().parse::<u64>().map_err(|_| {
            malformed(format!("invalid {name} '{}'", fields[idx]))
        })
    };
    let list = |idx: usize, name: &str| -> Result<Vec<u64>, ParseError> {
        parse_u64_list(fields[idx]).map_err(|e| malformed(format!("invalid {name}: {e}")))
    };

    let block_count = usize::try_from(num(17, "blockCount")?)
        .map_err(|_| malformed("blockCount does not fit in memory".to_string()))?;
    if check_block_limit(block_count).is_some() {
        return Err(ParseError::TooManyBlocks {
            line: line_num,
            count: block_count,
        });
    }

    let hit = AlignmentHit {
        matches: num(0, "matches")?,
        mismatches: num(1, "misMatches")?,
        rep_matches: num(2, "repMatches")?,
        n_count: num(3, "nCount")?,
        q_num_insert: num(4, "qNumInsert")?,
        q_base_insert: num(5, "qBaseInsert")?,
        t_num_insert: num(6, "tNumInsert")?,
        t_base_insert: num(7, "tBaseInsert")?,
        strand: fields[8].trim().to_string(),
        q_name: fields[9].trim().to_string(),
        q_size: num(10, "qSize")?,
        q_start: num(11, "qStart")?,
        q_end: num(12, "qEnd")?,
        t_name: fields[13].trim().to_string(),
        t_size: num(14, "tSize")?,
        t_start: num(15, "tStart")?,
        t_end: num(16, "tEnd")?,
        block_count,
        block_sizes: list(18, "blockSizes")?,
        q_starts: list(19, "qStarts")?,
        t_starts: list(20, "tStarts")?,
    };

    if hit.q_name.is_empty() {
        return Err(malformed("empty qName".to_string()));
    }
    if hit.q_start > hit.q_end || hit.q_end > hit.q_size {
        return Err(malformed(format!(
            "query range {}-{} does not fit qSize {}",
            hit.q_start, hit.q_end, hit.q_size
        )));
    }
    if hit.t_start > hit.t_end || hit.t_end > hit.t_size {
        return Err(malformed(format!(
            "target range {}-{} does not fit tSize {}",
            hit.t_start, hit.t_end, hit.t_size
        )));
    }
    if [&hit.block_sizes, &hit.q_starts, &hit.t_starts]
        .iter()
        .any(|l| l.len() != block_count)
    {
        return Err(malformed(format!(
            "blockCount {block_count} does not match block lists"
        )));
    }

    Ok(hit)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "95\t2\t0\t0\t0\t0\t1\t5000\t+\tjs_1\t200\t2\t99\tchr1\t248956422\t10000\t15097\t2\t40,57,\t2,42,\t10000,15040,";

    #[test]
    fn test_parse_psl_line() {
        let hit = parse_psl_line(LINE, 1).unwrap();
        assert_eq!(hit.matches, 95);
        assert_eq!(hit.q_name, "js_1");
        assert_eq!(hit.q_size, 200);
        assert_eq!((hit.q_start, hit.q_end), (2, 99));
        assert_eq!(hit.t_name, "chr1");
        assert_eq!(hit.block_sizes, vec![40, 57]);
        assert_eq!(hit.t_starts, vec![10000, 15040]);
    }

    #[test]
    fn test_parse_psl_with_header() {
        let text = format!(
            "psLayout version 3\n\nmatch\tmis- \trep. \n     \tmatch\tmatch\n---------------------------------------------------------------------------------------------------------------------------------------------------------------\n{LINE}\n"
        );
        let batch = parse_psl_text(&text);
        assert_eq!(batch.records.len(), 1);
        assert!(batch.rejected.is_empty());
    }

    #[test]
    fn test_malformed_records_are_dropped() {
        let bad_number = LINE.replacen("95", "ninety", 1);
        let short = "1\t2\t3";
        let bad_range = LINE.replacen("\t2\t99\t", "\t2\t250\t", 1);
        let text = format!("{bad_number}\n{LINE}\n{short}\n{bad_range}\n");

        let batch = parse_psl_text(&text);
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.rejected.len(), 3);
        assert!(matches!(
            batch.rejected[0],
            ParseError::MalformedHit { line: 1, .. }
        ));
        assert!(matches!(
            batch.rejected[1],
            ParseError::MalformedHit { line: 3, .. }
        ));
        assert!(matches!(
            batch.rejected[2],
            ParseError::MalformedHit { line: 4, .. }
        ));
    }

    #[test]
    fn test_block_count_mismatch() {
        let line = LINE.replacen("\t2\t40,57,", "\t3\t40,57,", 1);
        assert!(matches!(
            parse_psl_line(&line, 7),
            Err(ParseError::MalformedHit { line: 7, .. })
        ));
    }
}
