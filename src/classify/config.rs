use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classify::chimera::TopTwo;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read classifier config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse classifier config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid classifier config: {0}")]
    Invalid(String),
}

/// Default identity fraction a hit must exceed to count as colinear
pub const DEFAULT_COLINEAR_THRESHOLD: f64 = 0.8;

/// Default number of unaligned bases still treated as "at the end" of a query
pub const DEFAULT_END_TOLERANCE: u64 = 10;

/// Default minimum match count for the best hit at either end of a chimera
pub const DEFAULT_MIN_MATCHES: u64 = 30;

/// Default minimum lead of the best hit over the runner-up
pub const DEFAULT_MIN_DIFF: u64 = 3;

/// Thresholds for colinear and chimera classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassifierConfig {
    /// `(matches + rep_matches) / q_size` must be strictly greater than this
    pub colinear_threshold: f64,
    /// A hit is near an end if fewer than this many query bases lie beyond it
    pub end_tolerance: u64,
    /// Best hit at an end must have at least this many matches
    pub min_matches: u64,
    /// Best hit must lead the second-best by at least this many matches
    pub min_diff: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            colinear_threshold: DEFAULT_COLINEAR_THRESHOLD,
            end_tolerance: DEFAULT_END_TOLERANCE,
            min_matches: DEFAULT_MIN_MATCHES,
            min_diff: DEFAULT_MIN_DIFF,
        }
    }
}

impl ClassifierConfig {
    /// Load a config from a JSON file; missing keys take their defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, `ConfigError::Parse` for
    /// malformed JSON or unknown keys, or `ConfigError::Invalid` if a value is out of range.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a config from JSON text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or `ConfigError::Invalid` if a value
    /// is out of range.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the colinear threshold is not within `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.colinear_threshold) {
            return Err(ConfigError::Invalid(format!(
                "colinear_threshold must be between 0 and 1, got {}",
                self.colinear_threshold
            )));
        }
        Ok(())
    }

    /// Does the best hit at one end of a query stand out enough?
    ///
    /// Passes when there is at least one candidate, the best has `min_matches` or more,
    /// and it leads the second-best (0 if absent) by at least `min_diff`.
    #[must_use]
    pub fn check(&self, top: &TopTwo<'_>) -> bool {
        let Some(best) = top.best() else {
            return false;
        };
        let second = top.second().map_or(0, |hit| hit.matches);

        best.matches >= self.min_matches && best.matches.saturating_sub(second) >= self.min_diff
    }
}
