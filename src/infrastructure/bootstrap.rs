//! Composition root: builds the price service from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::reference::PriceBook;
use crate::adapter::outbound::tokopedia::TokopediaFetcher;
use crate::application::PriceService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{ReferencePrices, SampleFetcher};

/// Load the reference table named in `[reference]`, if any.
///
/// # Errors
///
/// Returns an error if a configured CSV cannot be read or parsed.
pub fn build_reference(config: &Config) -> Result<Option<Arc<dyn ReferencePrices>>> {
    let Some(path) = &config.reference.prices_csv else {
        warn!("No reference price table configured; failed lookups return no data");
        return Ok(None);
    };
    let book = PriceBook::load(path)?;
    if book.is_empty() {
        warn!(path = %path.display(), "Reference price table is empty");
    }
    Ok(Some(Arc::new(book)))
}

/// Build the service around an explicit fetcher.
///
/// # Errors
///
/// Returns an error if the reference table cannot be loaded.
pub fn build_service_with(config: &Config, fetcher: Arc<dyn SampleFetcher>) -> Result<PriceService> {
    let settings = config.service_config();
    info!(
        fetcher = fetcher.name(),
        ttl_secs = settings.ttl.as_secs(),
        min_interval_ms = settings.min_interval.as_millis() as u64,
        "Building price service"
    );

    let service = PriceService::new(fetcher, settings);
    Ok(match build_reference(config)? {
        Some(reference) => service.with_reference(reference),
        None => service,
    })
}

/// Build the service with the Tokopedia fetcher.
///
/// # Errors
///
/// Returns an error if the HTTP client or reference table cannot be built.
pub fn build_service(config: &Config) -> Result<PriceService> {
    let fetcher = TokopediaFetcher::new(config.tokopedia_config())?;
    build_service_with(config, Arc::new(fetcher))
}
