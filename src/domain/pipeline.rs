//! Filter, estimator and classifier composed into one pure step.

use chrono::Utc;

use super::confidence::ConfidenceThresholds;
use super::error::EstimateError;
use super::estimate::PriceEstimate;
use super::estimator::Estimator;
use super::filter::{FilterConfig, OutlierFilter};
use super::sample::SampleSet;

/// Turns a raw sample set into a [`PriceEstimate`].
#[derive(Debug, Clone, Default)]
pub struct EstimationPipeline {
    filter: OutlierFilter,
    estimator: Estimator,
    thresholds: ConfidenceThresholds,
}

impl EstimationPipeline {
    #[must_use]
    pub fn new(filter: FilterConfig, thresholds: ConfidenceThresholds) -> Self {
        Self {
            filter: OutlierFilter::new(filter),
            estimator: Estimator,
            thresholds,
        }
    }

    /// Estimate the market price of `samples`.
    ///
    /// Repeated listings are merged before anything is counted, so one
    /// listing seen five times is one sample.
    ///
    /// # Errors
    ///
    /// - [`EstimateError::NoSamples`] for an empty set
    /// - [`EstimateError::DegenerateInput`] when every raw value was invalid
    /// - [`EstimateError::EmptyAccepted`] if the filter rejected everything
    pub fn evaluate(&self, samples: &SampleSet) -> Result<PriceEstimate, EstimateError> {
        let deduped;
        let samples = if samples.has_repeated_listings() {
            deduped = samples.clone().dedup_listings();
            &deduped
        } else {
            samples
        };

        if samples.is_empty() {
            return Err(match samples.discarded() {
                0 => EstimateError::NoSamples,
                discarded => EstimateError::DegenerateInput { discarded },
            });
        }

        let partition = self.filter.filter(samples);
        debug_assert!(
            !partition.accepted().is_empty(),
            "largest cluster of a non-empty set must be non-empty"
        );
        let point = self.estimator.estimate(partition.accepted())?;
        let confidence = self
            .thresholds
            .classify(samples.len())
            .ok_or(EstimateError::NoSamples)?;

        Ok(PriceEstimate::from_market(
            point,
            samples.len(),
            partition.rejected().len(),
            confidence,
            Utc::now(),
        ))
    }
}
