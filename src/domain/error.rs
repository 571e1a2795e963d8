//! Domain validation and estimation errors.
//!
//! [`DomainError`] is returned by `try_new` constructors when a value type's
//! invariant is violated. [`EstimateError`] names every reason the engine can
//! fail to produce a market estimate; it is `Clone` so it can travel inside a
//! cached [`PriceOutcome`](super::outcome::PriceOutcome).
//!
//! # Examples
//!
//! ```
//! use fairprice::domain::error::DomainError;
//! use fairprice::domain::sample::PriceSample;
//!
//! let result = PriceSample::try_new(0);
//! assert!(matches!(result, Err(DomainError::NonPositivePrice { amount: 0 })));
//! ```

use std::time::Duration;

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Prices must be strictly positive.
    #[error("price must be positive, got {amount}")]
    NonPositivePrice {
        /// The rejected amount.
        amount: i64,
    },

    /// Marketing name must contain at least one word character.
    #[error("device name cannot be empty")]
    EmptyDeviceName,
}

/// Reasons an estimation request ends without a market-derived price.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimateError {
    /// The query normalizes to fewer characters than the configured minimum.
    #[error("query '{query}' is too short to search for")]
    InvalidQuery { query: String },

    /// The fetch succeeded but produced no usable prices.
    #[error("no prices found")]
    NoSamples,

    /// The fetch collaborator failed (transport, status or parse error).
    #[error("fetch failed: {0}")]
    FetchFailure(String),

    /// The fetch did not finish within the configured deadline.
    #[error("fetch timed out after {0:?}")]
    FetchTimeout(Duration),

    /// Every raw value was non-positive or malformed.
    #[error("all {discarded} raw prices were invalid")]
    DegenerateInput { discarded: usize },

    /// The outlier filter rejected every sample.
    #[error("no samples survived outlier filtering")]
    EmptyAccepted,
}

impl EstimateError {
    /// True for upstream conditions that may succeed on a later request.
    #[must_use]
    pub fn is_operational(&self) -> bool {
        matches!(
            self,
            Self::NoSamples | Self::FetchFailure(_) | Self::FetchTimeout(_)
        )
    }
}
