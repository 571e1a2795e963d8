//! Tokopedia marketplace adapter.

pub mod client;
pub mod extract;

pub use client::{TokopediaConfig, TokopediaFetcher, DEFAULT_SEARCH_URL, DEFAULT_USER_AGENT};
pub use extract::{Extracted, PriceBand, PriceExtractor};
