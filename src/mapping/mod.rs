//! Mapping between a feature's spliced (relative) coordinates and the genome.
//!
//! A [`PositionMapper`] walks the blocks of a [`BlockedFeature`] in strand order and
//! splits a relative range at every exon boundary it crosses:
//!
//! ```rust
//! use circkit::core::feature::BlockedFeature;
//! use circkit::core::interval::Interval;
//! use circkit::core::types::Strand;
//! use circkit::mapping::PositionMapper;
//!
//! let exons = [
//!     Interval::new("chr1", 100, 150, Strand::Plus).unwrap(),
//!     Interval::new("chr1", 200, 260, Strand::Plus).unwrap(),
//! ];
//! let feature = BlockedFeature::new("circ1", &exons).unwrap();
//! let mapped = PositionMapper::new(&feature).map(40, 70).unwrap();
//!
//! assert_eq!(mapped.len(), 2);
//! assert_eq!((mapped[0].start(), mapped[0].end()), (140, 150));
//! assert_eq!((mapped[1].start(), mapped[1].end()), (200, 220));
//! ```
//!
//! [`BlockedFeature`]: crate::core::feature::BlockedFeature

pub mod position;

pub use position::{MapError, PositionMapper};
