//! Estimation orchestrator.
//!
//! # Flow
//!
//! ```text
//! DeviceQuery ─► cache key ─► PriceCache ──hit──────────────────────────► outcome
//!                                 │miss
//!                                 ▼
//!                           RateLimiter::acquire
//!                                 ▼
//!                     timeout(SampleFetcher::fetch_samples)
//!                        │ok                       │err / timeout
//!                        ▼                         ▼
//!               EstimationPipeline        ReferencePrices::lookup
//!                 │ok        │no data        │some        │none
//!                 ▼          └──────────────►▼            ▼
//!             Estimated                  Fallback       NoData
//! ```
//!
//! Every request ends in exactly one [`PriceOutcome`]; nothing propagates
//! past [`PriceService::get_price`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::config::ServiceConfig;
use crate::application::cache::PriceCache;
use crate::application::limiter::RateLimiter;
use crate::domain::{
    CacheKey, DeviceQuery, EstimateError, EstimationPipeline, PriceEstimate, PriceOutcome,
};
use crate::port::{ReferencePrices, SampleFetcher};

/// Entry point for price requests.
///
/// Safe to share across tasks behind an [`Arc`]. The cache and the rate
/// limiter are the only mutable state.
pub struct PriceService {
    fetcher: Arc<dyn SampleFetcher>,
    reference: Option<Arc<dyn ReferencePrices>>,
    cache: PriceCache,
    limiter: Arc<RateLimiter>,
    pipeline: EstimationPipeline,
    config: ServiceConfig,
}

impl PriceService {
    /// Create a service with its own rate limiter and no reference table.
    pub fn new(fetcher: Arc<dyn SampleFetcher>, config: ServiceConfig) -> Self {
        Self {
            fetcher,
            reference: None,
            cache: PriceCache::new(),
            limiter: Arc::new(RateLimiter::new(config.min_interval)),
            pipeline: EstimationPipeline::new(config.filter, config.thresholds),
            config,
        }
    }

    /// Use `reference` when the market path fails.
    #[must_use]
    pub fn with_reference(mut self, reference: Arc<dyn ReferencePrices>) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Share a rate limiter with other services hitting the same upstream.
    #[must_use]
    pub fn with_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    #[must_use]
    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    /// Estimate the fair market price for `query`.
    pub async fn get_price(&self, query: &DeviceQuery) -> PriceOutcome {
        let key = query.cache_key();
        if key.char_len() < self.config.min_query_len {
            debug!(query = %query, min = self.config.min_query_len, "Query too short");
            return PriceOutcome::NoData {
                cause: EstimateError::InvalidQuery {
                    query: query.search_text(),
                },
            };
        }

        if let Some(cached) = self.cache.get(&key) {
            debug!(key = %key, status = cached.label(), "Cache hit");
            return cached;
        }

        let waited = self.limiter.acquire().await;
        if !waited.is_zero() {
            debug!(key = %key, waited_ms = waited.as_millis() as u64, "Rate limited");
        }

        let outcome = match self.fetch_and_estimate(query).await {
            Ok(estimate) => {
                info!(
                    key = %key,
                    price = estimate.market_price(),
                    samples = estimate.sample_count(),
                    rejected = estimate.rejected_count(),
                    confidence = %estimate.confidence(),
                    "Estimated market price"
                );
                PriceOutcome::Estimated(estimate)
            }
            Err(cause @ EstimateError::EmptyAccepted) => {
                error!(key = %key, error = %cause, "Estimation invariant violated");
                PriceOutcome::NoData { cause }
            }
            Err(cause) => self.fall_back(query, &key, cause),
        };

        self.store(key, &outcome);
        outcome
    }

    /// Number of live cached outcomes. Expired entries are pruned first.
    pub fn cache_size(&self) -> usize {
        let pruned = self.cache.prune_expired();
        if pruned > 0 {
            debug!(pruned, "Pruned expired cache entries");
        }
        self.cache.len()
    }

    /// Drop every cached outcome. Returns count removed.
    pub fn clear_cache(&self) -> usize {
        let removed = self.cache.clear();
        info!(removed, "Price cache cleared");
        removed
    }

    /// Link to the upstream listings for `query`, if the fetcher has one.
    #[must_use]
    pub fn search_url(&self, query: &DeviceQuery) -> Option<String> {
        self.fetcher.search_url(query)
    }

    async fn fetch_and_estimate(&self, query: &DeviceQuery) -> Result<PriceEstimate, EstimateError> {
        let timeout = self.config.fetch_timeout;
        let samples = match tokio::time::timeout(timeout, self.fetcher.fetch_samples(query)).await {
            Ok(Ok(samples)) => samples,
            Ok(Err(e)) => {
                warn!(source = self.fetcher.name(), query = %query, error = %e, "Fetch failed");
                return Err(EstimateError::FetchFailure(e.to_string()));
            }
            Err(_) => {
                warn!(
                    source = self.fetcher.name(),
                    query = %query,
                    timeout_ms = timeout.as_millis() as u64,
                    "Fetch timed out"
                );
                return Err(EstimateError::FetchTimeout(timeout));
            }
        };

        debug!(
            source = samples.source(),
            count = samples.len(),
            sources = samples.source_count(),
            discarded = samples.discarded(),
            duplicates = samples.duplicates(),
            "Samples fetched"
        );
        self.pipeline.evaluate(&samples)
    }

    fn fall_back(&self, query: &DeviceQuery, key: &CacheKey, cause: EstimateError) -> PriceOutcome {
        let price = self
            .reference
            .as_ref()
            .and_then(|table| table.lookup(query.brand(), query.marketing_name()));

        match price {
            Some(price) => {
                info!(key = %key, price, cause = %cause, "Using reference price");
                PriceOutcome::Fallback {
                    estimate: PriceEstimate::from_reference(price, chrono::Utc::now()),
                    cause,
                }
            }
            None if cause.is_operational() => {
                info!(key = %key, cause = %cause, "No price available");
                PriceOutcome::NoData { cause }
            }
            None => {
                warn!(key = %key, cause = %cause, "No price available from unusable listings");
                PriceOutcome::NoData { cause }
            }
        }
    }

    fn store(&self, key: CacheKey, outcome: &PriceOutcome) {
        let ttl = self.ttl_for(outcome);
        if ttl.is_zero() {
            return;
        }
        self.cache.put(key, outcome.clone(), ttl);
    }

    fn ttl_for(&self, outcome: &PriceOutcome) -> Duration {
        match outcome {
            PriceOutcome::Estimated(_) => self.config.ttl,
            PriceOutcome::Fallback { .. } => self.config.fallback_ttl,
            PriceOutcome::NoData {
                cause: EstimateError::EmptyAccepted,
            } => Duration::ZERO,
            PriceOutcome::NoData { .. } => self.config.no_data_ttl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Confidence, PriceSource, SampleSet};
    use crate::error::{Error, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedFetcher {
        raw: Vec<i64>,
        calls: AtomicUsize,
    }

    impl FixedFetcher {
        fn new(raw: Vec<i64>) -> Arc<Self> {
            Arc::new(Self {
                raw,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SampleFetcher for FixedFetcher {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn fetch_samples(&self, _query: &DeviceQuery) -> Result<SampleSet> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SampleSet::from_raw("fixed", self.raw.clone()))
        }
    }

    struct BrokenFetcher;

    #[async_trait]
    impl SampleFetcher for BrokenFetcher {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn fetch_samples(&self, _query: &DeviceQuery) -> Result<SampleSet> {
            Err(Error::Marketplace("refused".into()))
        }
    }

    struct OneDevice(u64);

    impl ReferencePrices for OneDevice {
        fn lookup(&self, _brand: Option<&str>, marketing_name: &str) -> Option<u64> {
            (marketing_name == "Galaxy S24").then_some(self.0)
        }

        fn len(&self) -> usize {
            1
        }
    }

    fn query() -> DeviceQuery {
        DeviceQuery::new(Some("Samsung"), "Galaxy S24")
    }

    #[tokio::test(start_paused = true)]
    async fn success_is_cached_and_fetched_once() {
        let fetcher = FixedFetcher::new(vec![100, 101, 102, 103, 104]);
        let service = PriceService::new(fetcher.clone(), ServiceConfig::default());

        let first = service.get_price(&query()).await;
        let second = service
            .get_price(&DeviceQuery::parse("  SAMSUNG galaxy   s24 "))
            .await;

        assert!(first.is_estimated());
        assert_eq!(first, second);
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(first.estimate().map(PriceEstimate::confidence), Some(Confidence::Medium));
    }

    #[tokio::test(start_paused = true)]
    async fn short_query_skips_fetch() {
        let fetcher = FixedFetcher::new(vec![100]);
        let service = PriceService::new(fetcher.clone(), ServiceConfig::default());

        let outcome = service.get_price(&DeviceQuery::parse("a!")).await;

        assert!(matches!(
            outcome,
            PriceOutcome::NoData {
                cause: EstimateError::InvalidQuery { .. }
            }
        ));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_with_reference_falls_back() {
        let service = PriceService::new(Arc::new(BrokenFetcher), ServiceConfig::default())
            .with_reference(Arc::new(OneDevice(15_000_000)));

        let outcome = service.get_price(&query()).await;

        let estimate = outcome.estimate().unwrap();
        assert!(outcome.is_fallback());
        assert_eq!(estimate.market_price(), 15_000_000);
        assert_eq!(estimate.source(), PriceSource::Reference);
        assert_eq!(estimate.confidence(), Confidence::Low);
        assert_eq!(service.cache().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn no_data_is_not_cached_by_default() {
        let fetcher = FixedFetcher::new(vec![]);
        let service = PriceService::new(fetcher.clone(), ServiceConfig::default());

        let outcome = service.get_price(&query()).await;

        assert_eq!(outcome.cause(), Some(&EstimateError::NoSamples));
        assert!(service.cache().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn search_url_defaults_to_none() {
        let service = PriceService::new(Arc::new(BrokenFetcher), ServiceConfig::default());
        assert_eq!(service.search_url(&query()), None);
    }
}
