//! Centralized validation and helper functions.

/// Maximum number of blocks allowed in a single record (DOS protection)
pub const MAX_BLOCKS: usize = 100_000;

/// Check if a record's block count exceeds the maximum allowed.
///
/// Returns an error message if it does, None if the count is acceptable.
#[must_use]
pub fn check_block_limit(count: usize) -> Option<String> {
    if count > MAX_BLOCKS {
        Some(format!(
            "Too many blocks: {count} exceeds maximum of {MAX_BLOCKS}"
        ))
    } else {
        None
    }
}

/// Parse a comma-separated list of unsigned integers as used by BED12 and PSL.
///
/// A single trailing comma is accepted; empty input yields an empty list.
///
/// # Examples
///
/// ```
/// use circkit::utils::validation::parse_u64_list;
///
/// assert_eq!(parse_u64_list("10,20,").unwrap(), vec![10, 20]);
/// assert_eq!(parse_u64_list("").unwrap(), Vec::<u64>::new());
/// assert!(parse_u64_list("10,,20").is_err());
/// ```
///
/// # Errors
///
/// Returns the offending item if any element is not a valid integer.
pub fn parse_u64_list(s: &str) -> Result<Vec<u64>, String> {
    let s = s.trim();
    let s = s.strip_suffix(',').unwrap_or(s);
    if s.is_empty() {
        return Ok(Vec::new());
    }

    s.split(',')
        .map(|item| {
            item.trim()
                .parse::<u64>()
                .map_err(|_| format!("'{item}' is not a non-negative integer"))
        })
        .collect()
}

/// Format a list as comma-separated values with no trailing comma
#[must_use]
pub fn join_u64_list(values: &[u64]) -> String {
    values
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
