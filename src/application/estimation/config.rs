//! Tunables for the estimation service.

use std::time::Duration;

use crate::domain::{ConfidenceThresholds, FilterConfig};

/// Runtime settings for [`PriceService`](super::PriceService).
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Outlier filter settings.
    pub filter: FilterConfig,
    /// Sample counts for each confidence label.
    pub thresholds: ConfidenceThresholds,
    /// Lifetime of a market-derived estimate in the cache.
    pub ttl: Duration,
    /// Lifetime of a reference-price fallback. Shorter than `ttl`.
    pub fallback_ttl: Duration,
    /// Lifetime of a no-data marker. Zero disables the marker.
    pub no_data_ttl: Duration,
    /// Minimum spacing between outbound fetches.
    pub min_interval: Duration,
    /// Deadline for a single fetch.
    pub fetch_timeout: Duration,
    /// Queries that normalize to fewer characters are refused.
    pub min_query_len: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            thresholds: ConfidenceThresholds::default(),
            ttl: Duration::from_secs(3600),
            fallback_ttl: Duration::from_secs(300),
            no_data_ttl: Duration::ZERO,
            min_interval: Duration::from_secs(1),
            fetch_timeout: Duration::from_secs(15),
            min_query_len: 3,
        }
    }
}
