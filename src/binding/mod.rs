//! Binding-site hits on circularized sequences.
//!
//! Binding sites are predicted on each circRNA's spliced sequence with its first bases
//! appended to the end, so that sites across the back-splice junction can be found.
//! That extension produces duplicate hits, which [`WrapDeduplicator`] removes, and
//! ranges past the sequence end, which [`SiteProjector`] wraps around when mapping
//! sites back to the genome.

pub mod dedup;
pub mod sites;

pub use dedup::{DedupOutcome, WrapDeduplicator};
pub use sites::{feature_lengths, ProjectedSite, SiteError, SiteProjector};
