use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::{debug, warn};

use crate::core::binding::BindingHit;

/// Hits that survived deduplication, plus how many were dropped and why
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupOutcome {
    pub kept: Vec<BindingHit>,
    /// No total length known for the hit's reference
    pub unknown_reference: usize,
    /// Started entirely inside the wrap extension
    pub out_of_range: usize,
    /// Wrap-extended copy of a hit that starts at position 1
    pub wrap_duplicates: usize,
}

impl DedupOutcome {
    pub fn dropped(&self) -> usize {
        self.unknown_reference + self.out_of_range + self.wrap_duplicates
    }
}

/// Removes binding hits that only exist because the searched sequence was circularized
/// by appending its first bases to its end.
///
/// For a hit `h` starting at position 1, another hit on the same query/reference pair
/// ending at `h.ref_end + total_length` is the same site seen through the extension; it
/// is dropped and `h` is kept.
pub struct WrapDeduplicator<'a> {
    total_lengths: &'a HashMap<String, u64>,
}

impl<'a> WrapDeduplicator<'a> {
    /// `total_lengths` maps reference id to the length of its sequence before extension
    pub fn new(total_lengths: &'a HashMap<String, u64>) -> Self {
        Self { total_lengths }
    }

    /// Deduplicate a batch of hits, keeping input order.
    ///
    /// Hits whose reference has no known length are dropped with a warning rather than
    /// failing the batch.
    #[must_use]
    pub fn dedup(&self, hits: Vec<BindingHit>) -> DedupOutcome {
        let mut outcome = DedupOutcome::default();
        let mut missing: BTreeSet<String> = BTreeSet::new();
        let mut candidates: Vec<(BindingHit, u64)> = Vec::with_capacity(hits.len());

        for hit in hits {
            let Some(&total) = self.total_lengths.get(&hit.reference_id) else {
                outcome.unknown_reference += 1;
                missing.insert(hit.reference_id);
                continue;
            };

            if hit.ref_start > total {
                outcome.out_of_range += 1;
                continue;
            }

            candidates.push((hit, total));
        }

        for reference in &missing {
            warn!("No sequence length for reference '{reference}'; its binding hits were dropped");
        }

        let wrapped_ends: HashSet<(&str, &str, u64)> = candidates
            .iter()
            .filter(|(hit, _)| hit.ref_start == 1)
            .filter_map(|(hit, total)| {
                // No partner can end past u64::MAX
                let wrapped_end = hit.ref_end.checked_add(*total)?;
                Some((
                    hit.query_id.as_str(),
                    hit.reference_id.as_str(),
                    wrapped_end,
                ))
            })
            .collect();

        let is_duplicate: Vec<bool> = candidates
            .iter()
            .map(|(hit, _)| {
                wrapped_ends.contains(&(
                    hit.query_id.as_str(),
                    hit.reference_id.as_str(),
                    hit.ref_end,
                ))
            })
            .collect();

        for ((hit, _), duplicate) in candidates.into_iter().zip(is_duplicate) {
            if duplicate {
                outcome.wrap_duplicates += 1;
            } else {
                outcome.kept.push(hit);
            }
        }

        debug!(
            "Binding hits: {} kept, {} wrap duplicates, {} out of range, {} without length",
            outcome.kept.len(),
            outcome.wrap_duplicates,
            outcome.out_of_range,
            outcome.unknown_reference
        );

        outcome
    }
}
