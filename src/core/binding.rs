use serde::{Deserialize, Serialize};

/// A predicted binding site on a circularized sequence (miRanda `hit_info` record).
///
/// `ref_start`/`ref_end` are 1-based and inclusive, measured on the sequence as it was
/// searched, i.e. including the wrap-around extension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingHit {
    pub query_id: String,
    pub reference_id: String,
    pub score: f64,
    pub energy: f64,
    pub query_start: u64,
    pub query_end: u64,
    pub ref_start: u64,
    pub ref_end: u64,
    pub aln_length: u64,
    pub identity: f64,
    pub similarity: f64,
    pub aln_mirna: String,
    pub aln_map: String,
    pub aln_utr: String,
}

impl BindingHit {
    /// The same range as a 0-based, half-open relative range.
    ///
    /// `ref_start` must be at least 1; the miRanda parser rejects hits that are not.
    #[must_use]
    pub fn relative_range(&self) -> (u64, u64) {
        debug_assert!(self.ref_start >= 1, "ref_start is 1-based");
        (self.ref_start.saturating_sub(1), self.ref_end)
    }

    /// Identifier used for projected genomic records
    #[must_use]
    pub fn site_name(&self) -> String {
        format!(
            "{}|{}|{}-{}",
            self.query_id, self.reference_id, self.ref_start, self.ref_end
        )
    }
}

/// True if a site starts inside the real sequence but ends in the wrap extension
#[must_use]
pub fn crosses_junction(hit: &BindingHit, total_length: u64) -> bool {
    hit.ref_start <= total_length && total_length < hit.ref_end
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::BindingHit;

    pub fn site(query: &str, reference: &str, ref_start: u64, ref_end: u64) -> BindingHit {
        BindingHit {
            query_id: query.to_string(),
            reference_id: reference.to_string(),
            score: 150.0,
            energy: -20.5,
            query_start: 2,
            query_end: 21,
            ref_start,
            ref_end,
            aln_length: ref_end - ref_start + 1,
            identity: 80.0,
            similarity: 85.0,
            aln_mirna: "UGAGGUAGUAGGUUGUAUAGUU".to_string(),
            aln_map: "||||||||||||||||||||||".to_string(),
            aln_utr: "ACUCCAUCAUCCAACAUAUCAA".to_string(),
        }
    }
}
