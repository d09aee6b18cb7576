use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::interval::{sweep_merge, Interval};
use crate::core::types::Strand;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    #[error("Feature '{feature}' mixes {field} values: '{expected}' and '{found}'")]
    InconsistentFeature {
        feature: String,
        field: &'static str,
        expected: String,
        found: String,
    },

    #[error("Invalid strand '{0}': expected '+' or '-'")]
    InvalidStrand(String),

    #[error("Feature '{0}' has no intervals")]
    EmptyFeature(String),

    #[error("Invalid interval {chrom}:{start}-{end}: end must be greater than start")]
    InvalidInterval { chrom: String, start: u64, end: u64 },

    #[error("Feature '{feature}' has overlapping blocks at {chrom}:{position}")]
    OverlappingBlocks {
        feature: String,
        chrom: String,
        position: u64,
    },

    #[error("Feature '{feature}' has an invalid exon on line {line}: {source}")]
    InvalidExon {
        feature: String,
        line: usize,
        #[source]
        source: Box<FeatureError>,
    },
}

/// One exon block, relative to the owning feature's overall start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub offset: u64,
    pub length: u64,
}

/// A multi-block feature (e.g. the exons of one circRNA isoform) with a spliced,
/// virtual coordinate space.
///
/// Blocks are stored sorted by genomic start. The order in which they make up the
/// virtual sequence depends on the strand and is computed on demand by
/// [`BlockedFeature::walk`]: increasing genomic order on `+`, decreasing on `-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedFeature {
    name: String,
    chrom: String,
    strand: Strand,
    start: u64,
    end: u64,
    blocks: Vec<Block>,
}

impl BlockedFeature {
    /// Build a feature with one block per interval.
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::EmptyFeature` for an empty slice,
    /// `FeatureError::InconsistentFeature` if chrom or strand differ between intervals,
    /// or `FeatureError::OverlappingBlocks` if two intervals share bases.
    pub fn new(name: impl Into<String>, intervals: &[Interval]) -> Result<Self, FeatureError> {
        let name = name.into();
        let (chrom, strand) = shared_chrom_and_strand(&name, intervals)?;

        let mut sorted: Vec<&Interval> = intervals.iter().collect();
        sorted.sort_by_key(|iv| (iv.start(), iv.end()));

        for pair in sorted.windows(2) {
            if pair[0].overlaps(pair[1]) {
                return Err(FeatureError::OverlappingBlocks {
                    feature: name,
                    chrom,
                    position: pair[1].start(),
                });
            }
        }

        Ok(Self::assemble(name, chrom, strand, sorted.into_iter()))
    }

    /// Build a feature whose blocks are the union of the given intervals.
    ///
    /// Overlapping and touching intervals collapse into one block.
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::EmptyFeature` for an empty slice or
    /// `FeatureError::InconsistentFeature` if chrom or strand differ between intervals.
    pub fn union(name: impl Into<String>, intervals: &[Interval]) -> Result<Self, FeatureError> {
        let name = name.into();
        let (chrom, strand) = shared_chrom_and_strand(&name, intervals)?;
        let merged = sweep_merge(intervals);

        Ok(Self::assemble(name, chrom, strand, merged.iter()))
    }

    /// Rebuild a feature from BED12-style parts (blocks relative to `start`).
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::EmptyFeature` if `blocks` is empty,
    /// `FeatureError::InvalidInterval` for a zero-length block or one that ends past
    /// `u64::MAX`, or
    /// `FeatureError::OverlappingBlocks` if blocks overlap.
    pub fn from_blocks(
        name: impl Into<String>,
        chrom: impl Into<String>,
        strand: Strand,
        start: u64,
        blocks: &[Block],
    ) -> Result<Self, FeatureError> {
        let chrom = chrom.into();
        let intervals = blocks
            .iter()
            .map(|b| {
                let block_start = start.checked_add(b.offset);
                let block_end = block_start.and_then(|s| s.checked_add(b.length));
                match (block_start, block_end) {
                    (Some(s), Some(e)) => Interval::new(chrom.clone(), s, e, strand),
                    _ => Err(FeatureError::InvalidInterval {
                        chrom: chrom.clone(),
                        start: block_start.unwrap_or(u64::MAX),
                        end: u64::MAX,
                    }),
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(name, &intervals)
    }

    fn assemble<'a>(
        name: String,
        chrom: String,
        strand: Strand,
        sorted: impl Iterator<Item = &'a Interval>,
    ) -> Self {
        let spans: Vec<(u64, u64)> = sorted.map(|iv| (iv.start(), iv.end())).collect();
        let start = spans.iter().map(|(s, _)| *s).min().unwrap_or_default();
        let end = spans.iter().map(|(_, e)| *e).max().unwrap_or_default();

        let blocks = spans
            .iter()
            .map(|(s, e)| Block {
                offset: s - start,
                length: e - s,
            })
            .collect();

        Self {
            name,
            chrom,
            strand,
            start,
            end,
            blocks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Smallest genomic start over all blocks
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Largest genomic end over all blocks
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Blocks in storage order (ascending genomic start)
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Length of the spliced virtual sequence
    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.blocks.iter().map(|b| b.length).sum()
    }

    /// Iterate blocks 5' to 3' along the feature's strand
    pub fn walk(&self) -> WalkOrder<'_> {
        WalkOrder {
            inner: self.blocks.iter(),
            strand: self.strand,
        }
    }

    /// Relative start of each block in walk order; the first is always 0
    #[must_use]
    pub fn relative_starts(&self) -> Vec<u64> {
        self.walk()
            .scan(0u64, |acc, block| {
                let here = *acc;
                *acc += block.length;
                Some(here)
            })
            .collect()
    }

    /// Genomic span of a block belonging to this feature
    #[must_use]
    pub fn block_interval(&self, block: &Block) -> Interval {
        let start = self.start + block.offset;
        Interval::from_valid(self.chrom.clone(), start, start + block.length, self.strand)
    }

    /// All blocks as genomic intervals, in storage order
    #[must_use]
    pub fn genomic_blocks(&self) -> Vec<Interval> {
        self.blocks.iter().map(|b| self.block_interval(b)).collect()
    }

    /// This feature with touching or overlapping blocks collapsed
    #[must_use]
    pub fn union_of(&self) -> BlockedFeature {
        let merged = sweep_merge(&self.genomic_blocks());
        Self::assemble(
            self.name.clone(),
            self.chrom.clone(),
            self.strand,
            merged.iter(),
        )
    }
}

/// Strand-aware iterator over a feature's blocks
pub struct WalkOrder<'a> {
    inner: std::slice::Iter<'a, Block>,
    strand: Strand,
}

impl<'a> Iterator for WalkOrder<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<Self::Item> {
        match self.strand {
            Strand::Plus => self.inner.next(),
            Strand::Minus => self.inner.next_back(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for WalkOrder<'_> {}

fn shared_chrom_and_strand(
    name: &str,
    intervals: &[Interval],
) -> Result<(String, Strand), FeatureError> {
    let first = intervals
        .first()
        .ok_or_else(|| FeatureError::EmptyFeature(name.to_string()))?;

    for iv in &intervals[1..] {
        if iv.chrom() != first.chrom() {
            return Err(FeatureError::InconsistentFeature {
                feature: name.to_string(),
                field: "chrom",
                expected: first.chrom().to_string(),
                found: iv.chrom().to_string(),
            });
        }
        if iv.strand() != first.strand() {
            return Err(FeatureError::InconsistentFeature {
                feature: name.to_string(),
                field: "strand",
                expected: first.strand().to_string(),
                found: iv.strand().to_string(),
            });
        }
    }

    Ok((first.chrom().to_string(), first.strand()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(chrom: &str, start: u64, end: u64, strand: Strand) -> Interval {
        Interval::new(chrom, start, end, strand).unwrap()
    }

    #[test]
    fn test_new_plus_strand() {
        let feature = BlockedFeature::new(
            "circ1",
            &[
                iv("chr1", 100, 150, Strand::Plus),
                iv("chr1", 200, 260, Strand::Plus),
            ],
        )
        .unwrap();

        assert_eq!(feature.start(), 100);
        assert_eq!(feature.end(), 260);
        assert_eq!(feature.total_length(), 110);
        assert_eq!(
            feature.blocks(),
            &[
                Block {
                    offset: 0,
                    length: 50
                },
                Block {
                    offset: 100,
                    length: 60
                }
            ]
        );
        assert_eq!(feature.relative_starts(), vec![0, 50]);
    }

    #[test]
    fn test_minus_strand_walks_in_reverse() {
        // Exons given in transcription order (descending genomic position)
        let feature = BlockedFeature::new(
            "circ1",
            &[
                iv("chr1", 200, 260, Strand::Minus),
                iv("chr1", 100, 150, Strand::Minus),
            ],
        )
        .unwrap();

        // Storage stays sorted by genomic start
        assert_eq!(feature.blocks()[0].offset, 0);
        assert_eq!(feature.blocks()[1].offset, 100);

        let walked: Vec<u64> = feature.walk().map(|b| b.length).collect();
        assert_eq!(walked, vec![60, 50]);
        assert_eq!(feature.relative_starts(), vec![0, 60]);
    }

    #[test]
    fn test_inconsistent_chrom() {
        let err = BlockedFeature::new(
            "bad",
            &[
                iv("chr1", 100, 150, Strand::Plus),
                iv("chr2", 200, 260, Strand::Plus),
            ],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            FeatureError::InconsistentFeature { field: "chrom", ref feature, .. } if feature == "bad"
        ));
    }

    #[test]
    fn test_inconsistent_strand_in_union_mode() {
        let err = BlockedFeature::union(
            "bad",
            &[
                iv("chr1", 100, 150, Strand::Plus),
                iv("chr1", 120, 260, Strand::Minus),
            ],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            FeatureError::InconsistentFeature {
                field: "strand",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_feature() {
        assert_eq!(
            BlockedFeature::new("none", &[]).unwrap_err(),
            FeatureError::EmptyFeature("none".to_string())
        );
        assert!(BlockedFeature::union("none", &[]).is_err());
    }

    #[test]
    fn test_overlapping_blocks_rejected_in_normal_mode() {
        let err = BlockedFeature::new(
            "overlap",
            &[
                iv("chr1", 10, 20, Strand::Plus),
                iv("chr1", 15, 25, Strand::Plus),
            ],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FeatureError::OverlappingBlocks { position: 15, .. }
        ));
    }

    #[test]
    fn test_union_mode() {
        let feature = BlockedFeature::union(
            "u",
            &[
                iv("chr1", 10, 20, Strand::Plus),
                iv("chr1", 15, 25, Strand::Plus),
                iv("chr1", 30, 40, Strand::Plus),
            ],
        )
        .unwrap();

        assert_eq!(
            feature.genomic_blocks(),
            vec![
                iv("chr1", 10, 25, Strand::Plus),
                iv("chr1", 30, 40, Strand::Plus)
            ]
        );
        assert_eq!(feature.total_length(), 25);
    }

    #[test]
    fn test_union_of_is_idempotent() {
        let feature = BlockedFeature::new(
            "touching",
            &[
                iv("chr3", 10, 20, Strand::Minus),
                iv("chr3", 20, 30, Strand::Minus),
                iv("chr3", 50, 60, Strand::Minus),
            ],
        )
        .unwrap();

        let once = feature.union_of();
        assert_eq!(once.block_count(), 2);
        assert_eq!(once.union_of(), once);
    }

    #[test]
    fn test_from_blocks_round_trip() {
        let feature = BlockedFeature::new(
            "f",
            &[
                iv("chr1", 100, 150, Strand::Minus),
                iv("chr1", 200, 260, Strand::Minus),
            ],
        )
        .unwrap();

        let rebuilt = BlockedFeature::from_blocks(
            "f",
            "chr1",
            Strand::Minus,
            feature.start(),
            feature.blocks(),
        )
        .unwrap();
        assert_eq!(rebuilt, feature);
    }

    #[test]
    fn test_from_blocks_past_u64_max() {
        let blocks = [Block {
            offset: 10,
            length: 100,
        }];
        assert!(matches!(
            BlockedFeature::from_blocks("f", "chr1", Strand::Plus, u64::MAX - 50, &blocks),
            Err(FeatureError::InvalidInterval { .. })
        ));
    }
}
