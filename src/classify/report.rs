use std::collections::BTreeSet;

use serde::Serialize;
use tracing::info;

use crate::classify::engine::ClassificationResult;
use crate::core::types::ReferenceKind;

/// A classification result together with the reference it was computed against
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedReference {
    pub label: String,
    pub kind: ReferenceKind,
    pub result: ClassificationResult,
}

/// Ambiguity flags for one query across every reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AmbiguityFlags {
    pub colinear: bool,
    pub chimeric: bool,
    pub multiple_hits: bool,
}

impl AmbiguityFlags {
    /// Colinear or multiple-hit evidence; chimeric evidence alone is not ambiguous
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.colinear || self.multiple_hits
    }
}

/// Combined view over all references searched for one set of junction sequences.
///
/// Colinear evidence from any reference wins. Multiple-hit evidence is only taken from
/// genome references and never overrides a colinear call. Chimeric queries are kept
/// for reporting only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AmbiguityReport {
    pub colinear: BTreeSet<String>,
    pub chimeric: BTreeSet<String>,
    pub multiple_hits: BTreeSet<String>,
    pub references: Vec<ClassifiedReference>,
}

impl AmbiguityReport {
    #[must_use]
    pub fn combine(references: Vec<ClassifiedReference>) -> Self {
        let colinear: BTreeSet<String> = references
            .iter()
            .flat_map(|r| r.result.colinear.iter().cloned())
            .collect();

        let genome = || {
            references
                .iter()
                .filter(|r| r.kind == ReferenceKind::Genome)
        };

        let chimeric: BTreeSet<String> = genome()
            .flat_map(|r| r.result.chimeric.iter().cloned())
            .collect();

        let multiple_hits: BTreeSet<String> = genome()
            .flat_map(|r| r.result.multiple_hits.iter())
            .filter(|query| !colinear.contains(*query))
            .cloned()
            .collect();

        info!(
            "{} references combined: {} colinear, {} multiple-hit, {} chimeric queries",
            references.len(),
            colinear.len(),
            multiple_hits.len(),
            chimeric.len()
        );

        Self {
            colinear,
            chimeric,
            multiple_hits,
            references,
        }
    }

    #[must_use]
    pub fn flags(&self, query_id: &str) -> AmbiguityFlags {
        AmbiguityFlags {
            colinear: self.colinear.contains(query_id),
            chimeric: self.chimeric.contains(query_id),
            multiple_hits: self.multiple_hits.contains(query_id),
        }
    }

    /// Every query seen in any reference, sorted
    #[must_use]
    pub fn queries(&self) -> BTreeSet<&str> {
        self.references
            .iter()
            .flat_map(|r| r.result.queries())
            .collect()
    }
}
