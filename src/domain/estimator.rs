//! Point estimate over the accepted cluster.
//!
//! The statistic is always the arithmetic mean. The outlier filter has already
//! cut the set down to one tight cluster, so the mean uses every surviving
//! price; it is never swapped for the median based on sample count.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::EstimateError;
use super::sample::PriceSample;

/// Mean, minimum and maximum of the accepted samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointEstimate {
    pub point: u64,
    pub min: u64,
    pub max: u64,
}

/// Reduces accepted samples to a single integer price.
#[derive(Debug, Clone, Copy, Default)]
pub struct Estimator;

impl Estimator {
    /// Mean of `accepted`, rounded half away from zero to whole currency units.
    ///
    /// # Errors
    ///
    /// Returns [`EstimateError::EmptyAccepted`] when there is nothing to reduce.
    pub fn estimate(&self, accepted: &[PriceSample]) -> Result<PointEstimate, EstimateError> {
        let first = accepted.first().ok_or(EstimateError::EmptyAccepted)?;

        let mut min = first.amount();
        let mut max = first.amount();
        let mut sum: u128 = 0;
        for sample in accepted {
            let amount = sample.amount();
            min = min.min(amount);
            max = max.max(amount);
            sum += u128::from(amount);
        }

        let count = accepted.len() as u128;
        let point = mean_rounded(sum, count).clamp(min, max);

        Ok(PointEstimate { point, min, max })
    }
}

fn mean_rounded(sum: u128, count: u128) -> u64 {
    match (Decimal::from_u128(sum), Decimal::from_u128(count)) {
        (Some(sum), Some(count)) => (sum / count)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .unwrap_or(u64::MAX),
        // Beyond Decimal range; integer division is exact enough there.
        _ => u64::try_from(sum / count).unwrap_or(u64::MAX),
    }
}
