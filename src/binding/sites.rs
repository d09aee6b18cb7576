use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::core::binding::{crosses_junction, BindingHit};
use crate::core::feature::{BlockedFeature, FeatureError};
use crate::mapping::position::{MapError, PositionMapper};

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("No feature named '{0}' for binding site")]
    UnknownFeature(String),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Feature(#[from] FeatureError),
}

/// A binding site placed back on the genome
#[derive(Debug, Clone, Serialize)]
pub struct ProjectedSite {
    pub hit: BindingHit,
    /// The site spans the back-splice junction
    pub crosses_junction: bool,
    /// Genomic footprint as a union-mode feature named after the site
    pub genomic: BlockedFeature,
}

/// Projects binding hits on circularized sequences onto genomic coordinates
pub struct SiteProjector<'a> {
    features: &'a HashMap<String, BlockedFeature>,
}

impl<'a> SiteProjector<'a> {
    pub fn new(features: &'a HashMap<String, BlockedFeature>) -> Self {
        Self { features }
    }

    /// # Errors
    ///
    /// Returns `SiteError::UnknownFeature` if the hit's reference is not a known feature,
    /// or `SiteError::Map` if its range does not fit the feature.
    pub fn project(&self, hit: &BindingHit) -> Result<ProjectedSite, SiteError> {
        let feature = self
            .features
            .get(&hit.reference_id)
            .ok_or_else(|| SiteError::UnknownFeature(hit.reference_id.clone()))?;

        let mapper = PositionMapper::new(feature);
        let (start, end) = hit.relative_range();
        let intervals = mapper.map_circular(start, end)?;
        let genomic = BlockedFeature::union(hit.site_name(), &intervals)?;

        Ok(ProjectedSite {
            hit: hit.clone(),
            crosses_junction: crosses_junction(hit, mapper.total_length()),
            genomic,
        })
    }

    /// Project every hit; failures are logged and returned alongside the successes
    pub fn project_all(&self, hits: &[BindingHit]) -> (Vec<ProjectedSite>, Vec<SiteError>) {
        let mut projected = Vec::with_capacity(hits.len());
        let mut failed = Vec::new();

        for hit in hits {
            match self.project(hit) {
                Ok(site) => projected.push(site),
                Err(e) => {
                    warn!("Skipping binding site {}: {e}", hit.site_name());
                    failed.push(e);
                }
            }
        }

        (projected, failed)
    }
}

/// Spliced length of every feature, keyed by name
#[must_use]
pub fn feature_lengths<'f>(
    features: impl IntoIterator<Item = &'f BlockedFeature>,
) -> HashMap<String, u64> {
    features
        .into_iter()
        .map(|f| (f.name().to_string(), f.total_length()))
        .collect()
}
