//! Sample fetching port for marketplace adapters.
//!
//! The engine treats fetching as an opaque, possibly slow, possibly failing
//! operation. It does not prescribe transport or parsing.

use async_trait::async_trait;

use crate::domain::query::DeviceQuery;
use crate::domain::sample::SampleSet;
use crate::error::Result;

/// Source of raw listing prices for a device.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; concurrent requests for different
/// devices share one fetcher.
///
/// # Errors
///
/// [`fetch_samples`](Self::fetch_samples) returns an error for transport,
/// status or parse failures. Finding no listings is not an error: return an
/// empty [`SampleSet`].
#[async_trait]
pub trait SampleFetcher: Send + Sync {
    /// Return the source name for logging.
    fn name(&self) -> &'static str;

    /// Collect raw prices for `query`.
    async fn fetch_samples(&self, query: &DeviceQuery) -> Result<SampleSet>;

    /// Link a person can open to inspect the same listings.
    fn search_url(&self, _query: &DeviceQuery) -> Option<String> {
        None
    }
}
