//! Device queries and their normalized cache keys.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Normalize free text into the canonical search form.
///
/// Strips every character that is neither a word character nor whitespace,
/// lowercases, and collapses runs of whitespace into single spaces.
///
/// ```
/// use fairprice::domain::query::normalize;
///
/// assert_eq!(normalize("  Samsung  Galaxy S24+ "), "samsung galaxy s24");
/// assert_eq!(normalize("iPhone 15 Pro Max 256GB"), "iphone 15 pro max 256gb");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized query text used as the cache slot for a device.
///
/// Trivially different spellings of the same device map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build a key from arbitrary text.
    pub fn new(text: &str) -> Self {
        Self(normalize(text))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the normalized text.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A request to price one device, identified by brand and marketing name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceQuery {
    brand: Option<String>,
    marketing_name: String,
}

impl DeviceQuery {
    /// Create a query from a brand and marketing name.
    ///
    /// An empty brand is treated as absent.
    pub fn new(brand: Option<&str>, marketing_name: impl Into<String>) -> Self {
        let brand = brand
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(ToOwned::to_owned);
        Self {
            brand,
            marketing_name: marketing_name.into().trim().to_string(),
        }
    }

    /// Create a query from free text such as `"Samsung Galaxy S24 Ultra"`.
    pub fn parse(text: &str) -> Self {
        Self::new(None, text)
    }

    /// Like [`DeviceQuery::new`], rejecting names without any word character.
    pub fn try_new(brand: Option<&str>, marketing_name: &str) -> Result<Self, DomainError> {
        if normalize(marketing_name).is_empty() {
            return Err(DomainError::EmptyDeviceName);
        }
        Ok(Self::new(brand, marketing_name))
    }

    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    #[must_use]
    pub fn marketing_name(&self) -> &str {
        &self.marketing_name
    }

    /// Human-facing search text: `"{brand} {marketing_name}"`.
    #[must_use]
    pub fn search_text(&self) -> String {
        match &self.brand {
            Some(brand) => format!("{brand} {}", self.marketing_name),
            None => self.marketing_name.clone(),
        }
    }

    /// Normalized cache key for this query.
    #[must_use]
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(&self.search_text())
    }
}

impl fmt::Display for DeviceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.search_text())
    }
}
