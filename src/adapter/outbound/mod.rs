//! Outbound adapters: the marketplace fetcher and the reference price table.

pub mod reference;
pub mod tokopedia;

pub use reference::PriceBook;
pub use tokopedia::{TokopediaConfig, TokopediaFetcher};
