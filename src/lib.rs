//! # circkit
//!
//! A library for the coordinate algebra of back-spliced (circular) RNA features and for
//! the alignment evidence used to vet their junctions.
//!
//! A circRNA is made of exons that are read 5' to 3' along its strand and then loop back
//! to the start. Analysis tools work in two coordinate systems: genomic intervals, and
//! positions along the spliced sequence. `circkit` converts between them and classifies
//! alignments of junction-spanning sequences.
//!
//! ## Features
//!
//! - **Blocked features**: exon groups with a strand-aware walk order, in strict or
//!   union (merge overlapping) mode
//! - **Position mapping**: relative ranges to genomic intervals, split at exon
//!   boundaries, with wrap-around across the back-splice junction
//! - **Alignment classification**: colinear, chimeric and multiple-hit flags from PSL
//! - **Binding sites**: deduplication of wrap-extension hits and projection to the genome
//! - **BED12 I/O** for interval tools
//!
//! ## Example
//!
//! ```rust
//! use circkit::{BlockedFeature, Interval, PositionMapper, Strand};
//!
//! let exons = [
//!     Interval::new("chr1", 200, 260, Strand::Minus).unwrap(),
//!     Interval::new("chr1", 100, 150, Strand::Minus).unwrap(),
//! ];
//! let feature = BlockedFeature::new("circ1", &exons).unwrap();
//!
//! // The first 10 bases of a minus-strand feature sit at the high end of its last exon
//! let mapped = PositionMapper::new(&feature).map(0, 10).unwrap();
//! assert_eq!((mapped[0].start(), mapped[0].end()), (250, 260));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Intervals, blocked features and hit records
//! - [`mapping`]: Relative-to-genomic position mapping
//! - [`classify`]: Colinear/chimera classification of alignment hits
//! - [`binding`]: Binding-site deduplication and projection
//! - [`parsing`]: PSL, BED12, exon table and miRanda readers
//! - [`cli`]: Command-line interface implementation

pub mod binding;
pub mod classify;
pub mod cli;
pub mod core;
pub mod mapping;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use classify::{AlignmentClassifier, AmbiguityReport, ClassificationResult, ClassifierConfig};
pub use core::alignment::AlignmentHit;
pub use core::binding::BindingHit;
pub use core::feature::{Block, BlockedFeature, FeatureError};
pub use core::interval::Interval;
pub use core::types::*;
pub use mapping::{MapError, PositionMapper};
