use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use fairprice::domain::{DeviceQuery, ListingId, PriceSample, SampleSet};
use fairprice::error::{Error, Result};
use fairprice::port::SampleFetcher;

/// What the fetcher does on every call.
#[derive(Debug, Clone)]
pub enum Behaviour {
    Samples(Vec<i64>),
    /// Prices tagged with the listing they were read from.
    Listings(Vec<(i64, &'static str)>),
    Fail(String),
    Hang,
}

/// Fetcher with a fixed behaviour that records when each call started.
pub struct ScriptedFetcher {
    behaviour: Behaviour,
    delay: Duration,
    calls: AtomicUsize,
    starts: Mutex<Vec<Instant>>,
    queries: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            starts: Mutex::new(Vec::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn samples(raw: &[i64]) -> Self {
        Self::new(Behaviour::Samples(raw.to_vec()))
    }

    pub fn listings(tagged: &[(i64, &'static str)]) -> Self {
        Self::new(Behaviour::Listings(tagged.to_vec()))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(Behaviour::Fail(message.to_string()))
    }

    pub fn hanging() -> Self {
        Self::new(Behaviour::Hang)
    }

    /// Take `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Call start times in order.
    pub fn starts(&self) -> Vec<Instant> {
        self.starts.lock().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl SampleFetcher for ScriptedFetcher {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn fetch_samples(&self, query: &DeviceQuery) -> Result<SampleSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.starts.lock().push(Instant::now());
        self.queries.lock().push(query.search_text());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match &self.behaviour {
            Behaviour::Samples(raw) => Ok(SampleSet::from_raw("scripted", raw.clone())),
            Behaviour::Listings(tagged) => {
                let samples = tagged
                    .iter()
                    .map(|&(amount, id)| {
                        PriceSample::try_new(amount)
                            .expect("positive listing price")
                            .with_listing(ListingId::new(id))
                    })
                    .collect();
                Ok(SampleSet::new("scripted", samples))
            }
            Behaviour::Fail(message) => Err(Error::Marketplace(message.clone())),
            Behaviour::Hang => std::future::pending().await,
        }
    }

    fn search_url(&self, query: &DeviceQuery) -> Option<String> {
        Some(format!("https://example.test/search?q={}", query.cache_key()))
    }
}
