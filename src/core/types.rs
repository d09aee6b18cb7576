use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::feature::FeatureError;

/// Genomic strand of a feature or interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

impl Strand {
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

impl FromStr for Strand {
    type Err = FeatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Self::Plus),
            "-" => Ok(Self::Minus),
            other => Err(FeatureError::InvalidStrand(other.to_string())),
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Which kind of reference an alignment batch was searched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// The genome the circRNA calls were made on
    Genome,
    /// Any other reference, e.g. a linear transcriptome used as a decoy
    Other,
}

impl std::fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Genome => write!(f, "genome"),
            Self::Other => write!(f, "other"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strand() {
        assert_eq!("+".parse::<Strand>().unwrap(), Strand::Plus);
        assert_eq!("-".parse::<Strand>().unwrap(), Strand::Minus);
        assert!(matches!(
            ".".parse::<Strand>(),
            Err(FeatureError::InvalidStrand(s)) if s == "."
        ));
    }

    #[test]
    fn test_strand_display() {
        assert_eq!(Strand::Minus.to_string(), "-");
        assert_eq!(ReferenceKind::Other.to_string(), "other");
    }
}
