use thiserror::Error;

use crate::core::feature::{Block, BlockedFeature};
use crate::core::interval::Interval;
use crate::core::types::Strand;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error(
        "Relative range {start}-{end} is out of range for feature '{feature}' (length {length})"
    )]
    OutOfRange {
        feature: String,
        start: u64,
        end: u64,
        length: u64,
    },
}

/// Maps ranges of a feature's spliced sequence back to genomic intervals
pub struct PositionMapper<'a> {
    feature: &'a BlockedFeature,
    total_length: u64,
}

impl<'a> PositionMapper<'a> {
    pub fn new(feature: &'a BlockedFeature) -> Self {
        Self {
            feature,
            total_length: feature.total_length(),
        }
    }

    pub fn feature(&self) -> &BlockedFeature {
        self.feature
    }

    pub fn total_length(&self) -> u64 {
        self.total_length
    }

    /// Map the relative range `[relative_start, relative_end)` to genomic intervals.
    ///
    /// One interval is emitted per block touched, in walk order (5' to 3' along the
    /// feature's strand). A start that falls exactly on a block boundary belongs to the
    /// next block; an end on a boundary belongs to the current one.
    ///
    /// # Errors
    ///
    /// Returns `MapError::OutOfRange` if the range is empty or reaches past the end of
    /// the spliced sequence.
    pub fn map(&self, relative_start: u64, relative_end: u64) -> Result<Vec<Interval>, MapError> {
        if relative_start >= relative_end || relative_end > self.total_length {
            return Err(self.out_of_range(relative_start, relative_end));
        }

        let mut intervals = Vec::new();
        let mut block_rel_start = 0u64;

        for block in self.feature.walk() {
            let block_rel_end = block_rel_start + block.length;

            if relative_start < block_rel_end {
                let from = relative_start.max(block_rel_start) - block_rel_start;
                let to = relative_end.min(block_rel_end) - block_rel_start;
                intervals.push(self.project(block, from, to));

                if relative_end <= block_rel_end {
                    break;
                }
            }

            block_rel_start = block_rel_end;
        }

        Ok(intervals)
    }

    /// Map a range on a circular feature, allowing it to run across the back-splice
    /// junction at most once.
    ///
    /// Ranges ending past `total_length` are split into `[start, total)` and
    /// `[0, end - total)`; the intervals of both parts are returned in that order.
    ///
    /// # Errors
    ///
    /// Returns `MapError::OutOfRange` if the range is empty, starts past the end of the
    /// sequence, or is longer than one full turn.
    pub fn map_circular(
        &self,
        relative_start: u64,
        relative_end: u64,
    ) -> Result<Vec<Interval>, MapError> {
        if relative_end <= self.total_length {
            return self.map(relative_start, relative_end);
        }

        if relative_start >= self.total_length
            || relative_end - relative_start > self.total_length
        {
            return Err(self.out_of_range(relative_start, relative_end));
        }

        let mut intervals = self.map(relative_start, self.total_length)?;
        intervals.extend(self.map(0, relative_end - self.total_length)?);
        Ok(intervals)
    }

    /// Genomic interval for `[from, to)` within a single block, offsets in walk direction
    fn project(&self, block: &Block, from: u64, to: u64) -> Interval {
        let span = self.feature.block_interval(block);
        let (start, end) = match self.feature.strand() {
            Strand::Plus => (span.start() + from, span.start() + to),
            Strand::Minus => (span.end() - to, span.end() - from),
        };
        Interval::from_valid(span.chrom(), start, end, span.strand())
    }

    fn out_of_range(&self, start: u64, end: u64) -> MapError {
        MapError::OutOfRange {
            feature: self.feature.name().to_string(),
            start,
            end,
            length: self.total_length,
        }
    }
}
