//! Confidence labels derived from how much raw data was available.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Qualitative reliability of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum raw sample counts for each label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceThresholds {
    /// `count >= high` is [`Confidence::High`].
    pub high: usize,
    /// `medium <= count < high` is [`Confidence::Medium`].
    pub medium: usize,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self { high: 10, medium: 5 }
    }
}

impl ConfidenceThresholds {
    /// Label a raw sample count. Zero samples means there is no estimate at all.
    #[must_use]
    pub fn classify(&self, sample_count: usize) -> Option<Confidence> {
        match sample_count {
            0 => None,
            n if n >= self.high => Some(Confidence::High),
            n if n >= self.medium => Some(Confidence::Medium),
            _ => Some(Confidence::Low),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_boundaries() {
        let thresholds = ConfidenceThresholds::default();
        assert_eq!(thresholds.classify(0), None);
        assert_eq!(thresholds.classify(1), Some(Confidence::Low));
        assert_eq!(thresholds.classify(4), Some(Confidence::Low));
        assert_eq!(thresholds.classify(5), Some(Confidence::Medium));
        assert_eq!(thresholds.classify(9), Some(Confidence::Medium));
        assert_eq!(thresholds.classify(10), Some(Confidence::High));
        assert_eq!(thresholds.classify(250), Some(Confidence::High));
    }

    #[test]
    fn classification_is_monotonic() {
        let thresholds = ConfidenceThresholds { high: 7, medium: 3 };
        let labels: Vec<_> = (1..20).filter_map(|n| thresholds.classify(n)).collect();
        assert!(labels.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn serializes_uppercase() {
        let json = serde_json::to_string(&Confidence::Medium).unwrap();
        assert_eq!(json, "\"MEDIUM\"");
        assert_eq!(Confidence::High.to_string(), "HIGH");
    }
}
