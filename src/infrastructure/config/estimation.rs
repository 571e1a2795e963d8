//! Estimation engine configuration sections.
//!
//! Maps the `[filter]`, `[confidence]`, `[cache]`, `[rate_limit]` and
//! `[engine]` tables onto the runtime settings of the price service.

use serde::{Deserialize, Serialize};

use crate::domain::GapThreshold;

const fn default_min_samples() -> usize {
    3
}

const fn default_high() -> usize {
    10
}

const fn default_medium() -> usize {
    5
}

const fn default_ttl_secs() -> u64 {
    3600
}

const fn default_fallback_ttl_secs() -> u64 {
    300
}

const fn default_min_interval_ms() -> u64 {
    1000
}

const fn default_fetch_timeout_secs() -> u64 {
    15
}

const fn default_min_query_len() -> usize {
    3
}

/// Outlier filter configuration (`[filter]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterSection {
    /// Sets with fewer samples are accepted whole.
    ///
    /// Defaults to 3.
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,

    /// Gap between neighbouring prices that starts a new cluster.
    ///
    /// Either `{ relative = 0.2 }` (fraction of the lower price) or
    /// `{ absolute = 2000000 }` (currency units). Defaults to 20% relative.
    #[serde(default)]
    pub gap: GapThreshold,
}

impl Default for FilterSection {
    fn default() -> Self {
        Self {
            min_samples: default_min_samples(),
            gap: GapThreshold::default(),
        }
    }
}

/// Confidence thresholds (`[confidence]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfidenceSection {
    /// Raw sample count for HIGH. Defaults to 10.
    #[serde(default = "default_high")]
    pub high: usize,
    /// Raw sample count for MEDIUM. Defaults to 5.
    #[serde(default = "default_medium")]
    pub medium: usize,
}

impl Default for ConfidenceSection {
    fn default() -> Self {
        Self {
            high: default_high(),
            medium: default_medium(),
        }
    }
}

/// Result cache lifetimes (`[cache]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSection {
    /// Lifetime of a market estimate. Defaults to one hour.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Lifetime of a reference-price fallback. Defaults to five minutes.
    #[serde(default = "default_fallback_ttl_secs")]
    pub fallback_ttl_secs: u64,

    /// Lifetime of a no-data marker. Zero, the default, disables it.
    #[serde(default)]
    pub no_data_ttl_secs: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            fallback_ttl_secs: default_fallback_ttl_secs(),
            no_data_ttl_secs: 0,
        }
    }
}

/// Outbound request spacing (`[rate_limit]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitSection {
    /// Minimum milliseconds between fetches. Defaults to 1000.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

impl Default for RateLimitSection {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

/// Request handling (`[engine]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineSection {
    /// Deadline for one fetch, in seconds. Defaults to 15.
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Minimum normalized query length. Defaults to 3.
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: default_fetch_timeout_secs(),
            min_query_len: default_min_query_len(),
        }
    }
}
