use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::classify::chimera::ChimeraScan;
use crate::classify::config::ClassifierConfig;
use crate::core::alignment::AlignmentHit;

/// Per-query flags with respect to one reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct QueryFlags {
    pub colinear: bool,
    pub chimeric: bool,
}

impl QueryFlags {
    /// Neither colinear nor chimeric
    #[must_use]
    pub fn is_clean(&self) -> bool {
        !self.colinear && !self.chimeric
    }
}

/// Classification of every query seen in one batch of hits against one reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// Queries with at least one colinear hit
    pub colinear: BTreeSet<String>,
    /// Queries whose hit group looks like an artificial junction
    pub chimeric: BTreeSet<String>,
    /// Queries with hits that are neither colinear nor chimeric
    pub multiple_hits: BTreeSet<String>,
}

impl ClassificationResult {
    #[must_use]
    pub fn flags(&self, query_id: &str) -> QueryFlags {
        QueryFlags {
            colinear: self.colinear.contains(query_id),
            chimeric: self.chimeric.contains(query_id),
        }
    }

    /// Every query id that had at least one hit
    #[must_use]
    pub fn queries(&self) -> BTreeSet<&str> {
        self.colinear
            .iter()
            .chain(&self.chimeric)
            .chain(&self.multiple_hits)
            .map(String::as_str)
            .collect()
    }
}

/// Classifies alignment hits as colinear, chimeric or multiple-hit
#[derive(Debug, Clone, Default)]
pub struct AlignmentClassifier {
    config: ClassifierConfig,
}

impl AlignmentClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// A single hit explains (nearly) the whole query.
    ///
    /// The comparison is strict: an identity fraction equal to the threshold is not
    /// colinear.
    #[must_use]
    pub fn is_colinear(&self, hit: &AlignmentHit) -> bool {
        hit.identity_fraction() > self.config.colinear_threshold
    }

    /// Chimera test over all hits of one query
    #[must_use]
    pub fn is_chimeric_group(&self, hits: &[&AlignmentHit]) -> bool {
        ChimeraScan::scan(hits.iter().copied(), &self.config).is_chimeric(&self.config)
    }

    /// Classify one batch of hits, all searched against the same reference.
    ///
    /// Query groups are scanned in parallel; the result sets are ordered, so the output
    /// does not depend on scheduling. `multiple_hits` holds every query present in the
    /// batch that is in neither of the other two sets.
    #[must_use]
    pub fn classify(&self, hits: &[AlignmentHit]) -> ClassificationResult {
        let groups = group_by_query(hits);

        let colinear: BTreeSet<String> = hits
            .iter()
            .filter(|hit| self.is_colinear(hit))
            .map(|hit| hit.q_name.clone())
            .collect();

        let chimeric: BTreeSet<String> = groups
            .par_iter()
            .filter(|(_, group)| self.is_chimeric_group(group))
            .map(|(query, _)| (*query).to_string())
            .collect();

        let multiple_hits: BTreeSet<String> = groups
            .keys()
            .filter(|query| !colinear.contains(**query) && !chimeric.contains(**query))
            .map(|query| (*query).to_string())
            .collect();

        debug!(
            "Classified {} hits over {} queries: {} colinear, {} chimeric, {} multiple-hit",
            hits.len(),
            groups.len(),
            colinear.len(),
            chimeric.len(),
            multiple_hits.len()
        );

        ClassificationResult {
            colinear,
            chimeric,
            multiple_hits,
        }
    }
}

/// Group hits by query name, keeping input order within each group
fn group_by_query(hits: &[AlignmentHit]) -> BTreeMap<&str, Vec<&AlignmentHit>> {
    let mut groups: BTreeMap<&str, Vec<&AlignmentHit>> = BTreeMap::new();
    for hit in hits {
        groups.entry(hit.q_name.as_str()).or_default().push(hit);
    }
    groups
}
