//! Core data types for circRNA coordinate algebra.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Interval`]: A single contiguous genomic span
//! - [`BlockedFeature`]: An ordered set of exon blocks with a spliced coordinate space
//! - [`AlignmentHit`]: One PSL alignment record
//! - [`BindingHit`]: One binding-site prediction on a circularized sequence
//! - [`Strand`], [`ReferenceKind`]: Shared enums
//!
//! ## Coordinates
//!
//! Genomic coordinates are 0-based and half-open everywhere, matching BED. Walking a
//! feature 5' to 3' means increasing genomic order on `+` and decreasing on `-`:
//!
//! | Strand | Stored blocks      | Walk order         |
//! |--------|--------------------|--------------------|
//! | `+`    | `[100,150) [200,260)` | `[100,150) [200,260)` |
//! | `-`    | `[100,150) [200,260)` | `[200,260) [100,150)` |
//!
//! [`Interval`]: interval::Interval
//! [`BlockedFeature`]: feature::BlockedFeature
//! [`AlignmentHit`]: alignment::AlignmentHit
//! [`BindingHit`]: binding::BindingHit
//! [`Strand`]: types::Strand
//! [`ReferenceKind`]: types::ReferenceKind

pub mod alignment;
pub mod binding;
pub mod feature;
pub mod interval;
pub mod types;
