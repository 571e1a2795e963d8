//! Gap-clustering outlier filter.
//!
//! Genuine listings for one product sit in a tight cluster around the real
//! market price; flash sales, accessories that match the search, scalped or
//! stale listings sit away from it. The filter sorts the prices, cuts the
//! sorted run wherever the gap between neighbours reaches the configured
//! threshold, and keeps the single largest run.
//!
//! ```text
//! 4.5   8.4 8.5 8.5 8.6 8.7   11.0      (millions)
//!    3.9                   2.3          gaps >= 2.0 split
//! [4.5] [8.4 ........... 8.7] [11.0]
//!  rej         accepted        rej
//! ```
//!
//! Ties between equally large runs go to the run with the smallest variance,
//! then to the lower-priced run, so the result is deterministic.

use std::ops::Range;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::sample::{PriceSample, SampleSet};

/// Minimum gap between sorted neighbours that separates two clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapThreshold {
    /// Split when `upper - lower >= threshold` currency units.
    Absolute(u64),
    /// Split when `upper - lower >= ratio * lower`.
    Relative(Decimal),
}

impl GapThreshold {
    /// Whether the gap between two sorted neighbours separates clusters.
    ///
    /// Equal prices are never separated.
    #[must_use]
    pub fn splits(&self, lower: u64, upper: u64) -> bool {
        let gap = upper.saturating_sub(lower);
        if gap == 0 {
            return false;
        }
        match *self {
            Self::Absolute(threshold) => gap >= threshold,
            Self::Relative(ratio) => ratio
                .checked_mul(Decimal::from(lower))
                .is_some_and(|limit| Decimal::from(gap) >= limit),
        }
    }
}

impl Default for GapThreshold {
    fn default() -> Self {
        Self::Relative(dec!(0.2))
    }
}

/// Tuning for the outlier filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    /// Gap that separates clusters.
    pub gap: GapThreshold,
    /// Sets smaller than this are accepted whole.
    pub min_samples: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            gap: GapThreshold::default(),
            min_samples: 3,
        }
    }
}

/// Partition of a sample set into accepted and rejected samples.
///
/// Both halves keep the order of the original set and together contain every
/// original sample exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    accepted: Vec<PriceSample>,
    rejected: Vec<PriceSample>,
}

impl FilterResult {
    #[must_use]
    pub fn accepted(&self) -> &[PriceSample] {
        &self.accepted
    }

    #[must_use]
    pub fn rejected(&self) -> &[PriceSample] {
        &self.rejected
    }

    #[must_use]
    pub fn accepted_amounts(&self) -> Vec<u64> {
        self.accepted.iter().map(PriceSample::amount).collect()
    }

    #[must_use]
    pub fn rejected_amounts(&self) -> Vec<u64> {
        self.rejected.iter().map(PriceSample::amount).collect()
    }

    /// True when nothing was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Total samples across both partitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Separates representative prices from anomalous ones.
#[derive(Debug, Clone, Default)]
pub struct OutlierFilter {
    config: FilterConfig,
}

impl OutlierFilter {
    #[must_use]
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Partition `samples` into the largest contiguous price cluster and the rest.
    #[must_use]
    pub fn filter(&self, samples: &SampleSet) -> FilterResult {
        let all = samples.samples();
        if all.len() < self.config.min_samples {
            return FilterResult {
                accepted: all.to_vec(),
                rejected: Vec::new(),
            };
        }

        // Index sort keeps the output in input order without cloning twice.
        let mut order: Vec<usize> = (0..all.len()).collect();
        order.sort_by_key(|&i| (all[i].amount(), i));
        let sorted: Vec<u64> = order.iter().map(|&i| all[i].amount()).collect();

        let Some(best) = self.largest_run(&sorted) else {
            return FilterResult::default();
        };

        let mut keep = vec![false; all.len()];
        for &index in &order[best] {
            keep[index] = true;
        }

        let mut result = FilterResult::default();
        for (sample, kept) in all.iter().zip(keep) {
            if kept {
                result.accepted.push(sample.clone());
            } else {
                result.rejected.push(sample.clone());
            }
        }
        result
    }

    /// Pick the winning run over ascending `sorted` values.
    fn largest_run(&self, sorted: &[u64]) -> Option<Range<usize>> {
        if sorted.is_empty() {
            return None;
        }

        let mut runs = Vec::new();
        let mut start = 0;
        for pos in 1..sorted.len() {
            if self.config.gap.splits(sorted[pos - 1], sorted[pos]) {
                runs.push(start..pos);
                start = pos;
            }
        }
        runs.push(start..sorted.len());

        // Strict comparisons keep the earlier (lower-priced) run on a full tie.
        runs.into_iter().reduce(|best, run| {
            let longer = run.len() > best.len();
            let tighter = run.len() == best.len()
                && dispersion(&sorted[run.clone()]) < dispersion(&sorted[best.clone()]);
            if longer || tighter {
                run
            } else {
                best
            }
        })
    }
}

/// `n * Σd² - (Σd)²` with `d = x - min`: proportional to the variance for a
/// fixed run length, exact in integers.
fn dispersion(values: &[u64]) -> u128 {
    let Some(&base) = values.first() else {
        return 0;
    };
    let n = values.len() as u128;
    let (sum, sum_sq) = values.iter().fold((0u128, 0u128), |(sum, sum_sq), &x| {
        let d = u128::from(x.saturating_sub(base));
        (
            sum.saturating_add(d),
            sum_sq.saturating_add(d.saturating_mul(d)),
        )
    });
    n.saturating_mul(sum_sq).saturating_sub(sum.saturating_mul(sum))
}
