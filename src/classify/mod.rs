//! Classification of junction-spanning alignment hits.
//!
//! Each sequence spanning a candidate back-splice junction is searched against one or
//! more references, and its hits are sorted into three categories:
//!
//! - **Colinear**: a single hit covers more than `colinear_threshold` of the query, so
//!   the "junction" is explained by an ordinary linear sequence
//! - **Chimeric**: no hit spans the query end to end, but two confident, distinct
//!   partial hits sit at its 5' and 3' ends
//! - **Multiple-hit**: anything else with hits
//!
//! ## Chimera test
//!
//! For each query the scan keeps the two best hits (by `matches`) starting within
//! `end_tolerance` of the 5' end and the two best ending within `end_tolerance` of the
//! 3' end. Both ends must pass the threshold check:
//!
//! | Condition | Default |
//! |-----------|---------|
//! | best `matches` at least | 30 |
//! | best minus second-best at least | 3 |
//!
//! Any hit near both ends marks the query linear and vetoes the chimera call.
//!
//! ## Example
//!
//! ```rust,no_run
//! use circkit::classify::{AlignmentClassifier, ClassifierConfig};
//! use circkit::parsing::psl::parse_psl_file;
//! use std::path::Path;
//!
//! let batch = parse_psl_file(Path::new("junctions_vs_genome.psl")).unwrap();
//! let classifier = AlignmentClassifier::new(ClassifierConfig::default());
//! let result = classifier.classify(&batch.records);
//!
//! for query in &result.chimeric {
//!     println!("{query}");
//! }
//! ```

pub mod chimera;
pub mod config;
pub mod engine;
pub mod report;

pub use chimera::{ChimeraScan, TopTwo};
pub use config::{ClassifierConfig, ConfigError};
pub use engine::{AlignmentClassifier, ClassificationResult, QueryFlags};
pub use report::{AmbiguityFlags, AmbiguityReport, ClassifiedReference};
