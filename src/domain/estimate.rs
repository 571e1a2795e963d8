//! The engine's output record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::confidence::Confidence;
use super::estimator::PointEstimate;

/// Where the market price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    /// Computed from freshly fetched marketplace listings.
    Market,
    /// Taken from the static reference price table.
    Reference,
}

impl fmt::Display for PriceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Market => f.write_str("market"),
            Self::Reference => f.write_str("reference"),
        }
    }
}

/// Fair market price for a device with its bounds and reliability.
///
/// `min <= market_price <= max` always holds. `min` and `max` describe the
/// accepted cluster, not the raw listings; `sample_count` is the raw count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEstimate {
    market_price: u64,
    min: u64,
    max: u64,
    sample_count: usize,
    rejected_count: usize,
    confidence: Confidence,
    source: PriceSource,
    computed_at: DateTime<Utc>,
}

impl PriceEstimate {
    /// Estimate derived from marketplace samples.
    #[must_use]
    pub fn from_market(
        point: PointEstimate,
        sample_count: usize,
        rejected_count: usize,
        confidence: Confidence,
        computed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            market_price: point.point.clamp(point.min, point.max),
            min: point.min,
            max: point.max,
            sample_count,
            rejected_count,
            confidence,
            source: PriceSource::Market,
            computed_at,
        }
    }

    /// Estimate backed only by a reference price. Always low confidence.
    #[must_use]
    pub fn from_reference(price: u64, computed_at: DateTime<Utc>) -> Self {
        Self {
            market_price: price,
            min: price,
            max: price,
            sample_count: 0,
            rejected_count: 0,
            confidence: Confidence::Low,
            source: PriceSource::Reference,
            computed_at,
        }
    }

    #[must_use]
    pub const fn market_price(&self) -> u64 {
        self.market_price
    }

    #[must_use]
    pub const fn min(&self) -> u64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> u64 {
        self.max
    }

    #[must_use]
    pub const fn sample_count(&self) -> usize {
        self.sample_count
    }

    #[must_use]
    pub const fn rejected_count(&self) -> usize {
        self.rejected_count
    }

    #[must_use]
    pub const fn confidence(&self) -> Confidence {
        self.confidence
    }

    #[must_use]
    pub const fn source(&self) -> PriceSource {
        self.source
    }

    #[must_use]
    pub fn computed_at(&self) -> DateTime<Utc> {
        self.computed_at
    }
}
