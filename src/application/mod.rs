//! Application layer: shared state and the estimation workflow.
//!
//! Everything here is runtime agnostic apart from tokio's clock and locks.

pub mod cache;
pub mod estimation;
pub mod limiter;

pub use cache::PriceCache;
pub use estimation::{PriceService, ServiceConfig};
pub use limiter::RateLimiter;
