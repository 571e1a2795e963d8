//! Request orchestration: cache, rate limit, fetch, estimate, fall back.

pub mod config;
pub mod service;

pub use config::ServiceConfig;
pub use service::PriceService;
