//! In-memory caches shared across concurrent requests.

pub mod price;

pub use price::PriceCache;
