//! Fairprice - market price estimation from noisy marketplace listings.
//!
//! Takes the raw prices found for a device model, discards outlier listings
//! by gap clustering, and reports the mean of the dominant cluster with a
//! confidence label. Requests go through a TTL cache and a process-wide
//! rate limiter, and fall back to a reference price table when the
//! marketplace cannot be read.
//!
//! # Architecture
//!
//! - [`domain`] - Pure types and algorithms: samples, filter, estimator
//! - [`port`] - Traits for the fetcher and the reference table
//! - [`application`] - Cache, rate limiter and the `PriceService` orchestrator
//! - [`adapter`] - Tokopedia scraper, CSV price book, CLI
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use fairprice::domain::DeviceQuery;
//! use fairprice::infrastructure::bootstrap::build_service;
//! use fairprice::infrastructure::config::Config;
//!
//! # async fn demo() -> fairprice::error::Result<()> {
//! let service = build_service(&Config::default())?;
//! let outcome = service
//!     .get_price(&DeviceQuery::new(Some("Samsung"), "Galaxy S24"))
//!     .await;
//! if let Some(estimate) = outcome.estimate() {
//!     println!("{} ({})", estimate.market_price(), estimate.confidence());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
