use serde::{Deserialize, Serialize};

/// One pairwise alignment hit in PSL layout.
///
/// Query coordinates are 0-based, half-open. The parser guarantees
/// `q_start <= q_end <= q_size`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentHit {
    pub matches: u64,
    pub mismatches: u64,
    pub rep_matches: u64,
    pub n_count: u64,
    pub q_num_insert: u64,
    pub q_base_insert: u64,
    pub t_num_insert: u64,
    pub t_base_insert: u64,
    /// Alignment orientation, e.g. `+`, `-` or the two-character translated form
    pub strand: String,
    pub q_name: String,
    pub q_size: u64,
    pub q_start: u64,
    pub q_end: u64,
    pub t_name: String,
    pub t_size: u64,
    pub t_start: u64,
    pub t_end: u64,
    pub block_count: usize,
    pub block_sizes: Vec<u64>,
    pub q_starts: Vec<u64>,
    pub t_starts: Vec<u64>,
}

impl AlignmentHit {
    /// Unaligned bases before the hit on the query
    #[must_use]
    pub fn five_prime_offset(&self) -> u64 {
        self.q_start
    }

    /// Unaligned bases after the hit on the query
    #[must_use]
    pub fn three_prime_offset(&self) -> u64 {
        self.q_size.saturating_sub(self.q_end)
    }

    /// Fraction of the query explained by matching bases, repeats included
    #[must_use]
    pub fn identity_fraction(&self) -> f64 {
        if self.q_size == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            (self.matches + self.rep_matches) as f64 / self.q_size as f64
        }
    }
}
