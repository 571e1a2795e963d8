//! Raw price observations collected for a single device query.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Identity of the listing a price was read from, used for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(String);

impl ListingId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single observed price in integer currency units. Always positive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceSample {
    amount: u64,
    listing: Option<ListingId>,
}

impl PriceSample {
    /// Create a sample, rejecting non-positive amounts.
    pub fn try_new(amount: i64) -> Result<Self, DomainError> {
        if amount <= 0 {
            return Err(DomainError::NonPositivePrice { amount });
        }
        Ok(Self {
            amount: amount.unsigned_abs(),
            listing: None,
        })
    }

    /// Tag the sample with the listing it came from.
    #[must_use]
    pub fn with_listing(mut self, listing: ListingId) -> Self {
        self.listing = Some(listing);
        self
    }

    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.amount
    }

    #[must_use]
    pub fn listing(&self) -> Option<&ListingId> {
        self.listing.as_ref()
    }
}

/// Ordered collection of positive price samples for one query, with provenance.
///
/// A set may be empty, which means the source returned nothing usable.
/// `discarded` counts raw values that were dropped because they were not
/// positive; it lets callers tell "no data" from "only garbage".
/// `duplicates` counts samples merged away as repeats of another listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleSet {
    samples: Vec<PriceSample>,
    source: String,
    collected_at: DateTime<Utc>,
    discarded: usize,
    duplicates: usize,
}

impl SampleSet {
    /// Create a set from already validated samples.
    pub fn new(source: impl Into<String>, samples: Vec<PriceSample>) -> Self {
        Self {
            samples,
            source: source.into(),
            collected_at: Utc::now(),
            discarded: 0,
            duplicates: 0,
        }
    }

    /// Create a set from raw integers, keeping only positive values.
    pub fn from_raw(source: impl Into<String>, raw: impl IntoIterator<Item = i64>) -> Self {
        let mut samples = Vec::new();
        let mut discarded = 0;
        for amount in raw {
            match PriceSample::try_new(amount) {
                Ok(sample) => samples.push(sample),
                Err(_) => discarded += 1,
            }
        }
        Self {
            samples,
            source: source.into(),
            collected_at: Utc::now(),
            discarded,
            duplicates: 0,
        }
    }

    /// Empty set, meaning the source found nothing.
    pub fn empty(source: impl Into<String>) -> Self {
        Self::new(source, Vec::new())
    }

    /// Record raw values that were dropped before the set was built.
    #[must_use]
    pub fn with_discarded(mut self, discarded: usize) -> Self {
        self.discarded += discarded;
        self
    }

    /// Record repeats the source already collapsed before building the set.
    #[must_use]
    pub fn with_duplicates(mut self, duplicates: usize) -> Self {
        self.duplicates += duplicates;
        self
    }

    /// Remove repeated listings, keeping the first occurrence.
    ///
    /// Samples without a listing id are never merged.
    #[must_use]
    pub fn dedup_listings(mut self) -> Self {
        let before = self.samples.len();
        let mut seen = HashSet::new();
        self.samples.retain(|s| match s.listing() {
            Some(id) => seen.insert(id.clone()),
            None => true,
        });
        self.duplicates += before - self.samples.len();
        self
    }

    /// True if two samples share a listing id.
    #[must_use]
    pub fn has_repeated_listings(&self) -> bool {
        self.source_count() < self.samples.len()
    }

    #[must_use]
    pub fn samples(&self) -> &[PriceSample] {
        &self.samples
    }

    /// Sample amounts in collection order.
    #[must_use]
    pub fn amounts(&self) -> Vec<u64> {
        self.samples.iter().map(PriceSample::amount).collect()
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn collected_at(&self) -> DateTime<Utc> {
        self.collected_at
    }

    #[must_use]
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of distinct sellers/listings behind the samples.
    ///
    /// Untagged samples each count as their own source.
    #[must_use]
    pub fn source_count(&self) -> usize {
        let mut ids = HashSet::new();
        let mut untagged = 0;
        for sample in &self.samples {
            match sample.listing() {
                Some(id) => {
                    ids.insert(id);
                }
                None => untagged += 1,
            }
        }
        ids.len() + untagged
    }
}
