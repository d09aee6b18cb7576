use serde::{Deserialize, Serialize};

use crate::core::feature::FeatureError;
use crate::core::types::Strand;

/// A single contiguous genomic span.
///
/// Coordinates are 0-based, half-open: `[start, end)`, and `end > start` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    chrom: String,
    start: u64,
    end: u64,
    strand: Strand,
}

impl Interval {
    /// Create a new interval.
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::InvalidInterval` if `end <= start`.
    pub fn new(
        chrom: impl Into<String>,
        start: u64,
        end: u64,
        strand: Strand,
    ) -> Result<Self, FeatureError> {
        let chrom = chrom.into();
        if end <= start {
            return Err(FeatureError::InvalidInterval { chrom, start, end });
        }
        Ok(Self {
            chrom,
            start,
            end,
            strand,
        })
    }

    /// Build an interval whose bounds the caller has already validated
    pub(crate) fn from_valid(chrom: impl Into<String>, start: u64, end: u64, strand: Strand) -> Self {
        debug_assert!(end > start);
        Self {
            chrom: chrom.into(),
            start,
            end,
            strand,
        }
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if the two intervals share chrom, strand and at least one base
    #[must_use]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.chrom == other.chrom
            && self.strand == other.strand
            && self.start < other.end
            && other.start < self.end
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}({})",
            self.chrom, self.start, self.end, self.strand
        )
    }
}

/// Collapse intervals into the minimal sorted set of disjoint covering intervals.
///
/// Touching intervals (`a.end == b.start`) are merged. All inputs are assumed to share
/// chrom and strand; the caller checks that.
pub(crate) fn sweep_merge(intervals: &[Interval]) -> Vec<Interval> {
    let mut sorted: Vec<&Interval> = intervals.iter().collect();
    sorted.sort_by_key(|iv| (iv.start, iv.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(sorted.len());
    let mut iter = sorted.into_iter();
    let Some(first) = iter.next() else {
        return merged;
    };

    let mut running = first.clone();
    for next in iter {
        if next.start > running.end {
            merged.push(std::mem::replace(&mut running, next.clone()));
        } else {
            running.end = running.end.max(next.end);
        }
    }
    merged.push(running);

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: u64, end: u64) -> Interval {
        Interval::new("chr1", start, end, Strand::Plus).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_span() {
        assert!(matches!(
            Interval::new("chr1", 10, 10, Strand::Plus),
            Err(FeatureError::InvalidInterval { start: 10, end: 10, .. })
        ));
        assert!(Interval::new("chr1", 20, 10, Strand::Minus).is_err());
    }

    #[test]
    fn test_sweep_merge_overlapping() {
        let merged = sweep_merge(&[iv(10, 20), iv(15, 25), iv(30, 40)]);
        assert_eq!(merged, vec![iv(10, 25), iv(30, 40)]);
    }

    #[test]
    fn test_sweep_merge_touching_and_unsorted() {
        let merged = sweep_merge(&[iv(30, 40), iv(10, 20), iv(20, 30)]);
        assert_eq!(merged, vec![iv(10, 40)]);
    }

    #[test]
    fn test_sweep_merge_contained() {
        let merged = sweep_merge(&[iv(10, 100), iv(20, 30), iv(99, 101)]);
        assert_eq!(merged, vec![iv(10, 101)]);
    }

    #[test]
    fn test_sweep_merge_idempotent() {
        let once = sweep_merge(&[iv(5, 8), iv(1, 3), iv(2, 4), iv(9, 12)]);
        let twice = sweep_merge(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_overlaps() {
        assert!(iv(10, 20).overlaps(&iv(19, 30)));
        assert!(!iv(10, 20).overlaps(&iv(20, 30)));
        let minus = Interval::new("chr1", 10, 20, Strand::Minus).unwrap();
        assert!(!iv(10, 20).overlaps(&minus));
    }
}
