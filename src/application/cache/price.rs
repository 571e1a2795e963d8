//! Outcome cache keyed by normalized query text.
//!
//! Entries expire lazily: an expired entry is treated as absent and removed
//! on the read that notices it. Expiry uses tokio's clock so a paused runtime
//! can drive it deterministically.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::Instant;

use crate::domain::{CacheKey, PriceOutcome};

#[derive(Debug, Clone)]
struct CacheEntry {
    value: PriceOutcome,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Thread-safe TTL cache of [`PriceOutcome`]s.
#[derive(Debug, Default)]
pub struct PriceCache {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
}

impl PriceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the live outcome for `key`, dropping it if it has expired.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<PriceOutcome> {
        let now = Instant::now();
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Re-check under the write lock: a concurrent put may have refreshed it.
        let mut entries = self.entries.write();
        if let Some(entry) = entries.get(key) {
            if entry.is_live(now) {
                return Some(entry.value.clone());
            }
            entries.remove(key);
        }
        None
    }

    /// Store `outcome` for `ttl`. A zero TTL stores nothing.
    pub fn put(&self, key: CacheKey, outcome: PriceOutcome, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }
        let entry = CacheEntry {
            value: outcome,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().insert(key, entry);
    }

    /// Remove every entry. Returns count removed, expired ones included.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.write();
        let removed = entries.len();
        entries.clear();
        removed
    }

    /// Number of stored entries, including expired ones not yet pruned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Prune expired entries. Returns count removed.
    pub fn prune_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| entry.is_live(now));
        before - entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EstimateError, PriceEstimate};
    use chrono::Utc;

    fn key(text: &str) -> CacheKey {
        CacheKey::new(text)
    }

    fn outcome(price: u64) -> PriceOutcome {
        PriceOutcome::Estimated(PriceEstimate::from_reference(price, Utc::now()))
    }

    #[tokio::test(start_paused = true)]
    async fn returns_value_before_expiry() {
        let cache = PriceCache::new();
        cache.put(key("galaxy s24"), outcome(10), Duration::from_secs(60));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert_eq!(cache.get(&key("galaxy s24")), Some(outcome(10)));
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entry_is_absent_and_removed() {
        let cache = PriceCache::new();
        cache.put(key("galaxy s24"), outcome(10), Duration::from_secs(60));

        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(cache.get(&key("galaxy s24")), None);
        assert_eq!(cache.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn put_overwrites_and_refreshes_ttl() {
        let cache = PriceCache::new();
        cache.put(key("x"), outcome(1), Duration::from_secs(10));
        tokio::time::advance(Duration::from_secs(8)).await;
        cache.put(key("x"), outcome(2), Duration::from_secs(10));
        tokio::time::advance(Duration::from_secs(8)).await;

        assert_eq!(cache.get(&key("x")), Some(outcome(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn clear_counts_all_entries() {
        let cache = PriceCache::new();
        cache.put(key("a"), outcome(1), Duration::from_secs(1));
        cache.put(key("b"), outcome(2), Duration::from_secs(100));
        cache.put(
            key("c"),
            PriceOutcome::NoData {
                cause: EstimateError::NoSamples,
            },
            Duration::from_secs(100),
        );
        tokio::time::advance(Duration::from_secs(5)).await;

        assert_eq!(cache.clear(), 3);
        assert!(cache.is_empty());
        assert_eq!(cache.clear(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn prune_removes_only_expired() {
        let cache = PriceCache::new();
        cache.put(key("short"), outcome(1), Duration::from_secs(1));
        cache.put(key("long"), outcome(2), Duration::from_secs(100));
        tokio::time::advance(Duration::from_secs(2)).await;

        assert_eq!(cache.prune_expired(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get(&key("long")).is_some());
    }

    #[test]
    fn zero_ttl_stores_nothing() {
        let cache = PriceCache::new();
        cache.put(key("a"), outcome(1), Duration::ZERO);
        assert!(cache.is_empty());
    }
}
