//! Pure domain types and algorithms for price estimation.
//!
//! Nothing in here performs I/O or logs.

pub mod confidence;
pub mod error;
pub mod estimate;
pub mod estimator;
pub mod filter;
pub mod outcome;
pub mod pipeline;
pub mod query;
pub mod sample;

pub use confidence::{Confidence, ConfidenceThresholds};
pub use error::{DomainError, EstimateError};
pub use estimate::{PriceEstimate, PriceSource};
pub use estimator::{Estimator, PointEstimate};
pub use filter::{FilterConfig, FilterResult, GapThreshold, OutlierFilter};
pub use outcome::{OutcomeReport, PriceOutcome};
pub use pipeline::EstimationPipeline;
pub use query::{normalize, CacheKey, DeviceQuery};
pub use sample::{ListingId, PriceSample, SampleSet};
