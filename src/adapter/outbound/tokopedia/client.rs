//! Tokopedia search page fetcher.
//!
//! Implements [`SampleFetcher`] by requesting the public search page for a
//! device and reading every rupiah amount in the rendered text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::extract::{PriceBand, PriceExtractor};
use crate::domain::{normalize, DeviceQuery, SampleSet};
use crate::error::{Error, Result};
use crate::port::outbound::fetcher::SampleFetcher;

/// Public search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://www.tokopedia.com/search";

/// Desktop Chrome user agent. The search page refuses obvious bots.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Settings for [`TokopediaFetcher`].
#[derive(Debug, Clone)]
pub struct TokopediaConfig {
    /// Search endpoint; the query goes in the `q` parameter.
    pub search_url: String,
    /// Per-request timeout applied by the HTTP client.
    pub timeout: Duration,
    /// Prices outside this band are ignored.
    pub band: PriceBand,
    pub user_agent: String,
    /// Collapse identical prices into one sample.
    pub dedup_prices: bool,
}

impl Default for TokopediaConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            timeout: Duration::from_secs(10),
            band: PriceBand::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            dedup_prices: true,
        }
    }
}

/// Scrapes listing prices from Tokopedia search results.
#[derive(Debug)]
pub struct TokopediaFetcher {
    client: Client,
    base: Url,
    extractor: PriceExtractor,
}

impl TokopediaFetcher {
    /// Create a fetcher.
    ///
    /// # Errors
    ///
    /// Returns an error if the search URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: TokopediaConfig) -> Result<Self> {
        let base = Url::parse(&config.search_url)?;
        let client = Client::builder()
            .default_headers(browser_headers(&config.user_agent)?)
            .timeout(config.timeout)
            .build()?;
        let extractor = PriceExtractor::new(config.band, config.dedup_prices)?;

        Ok(Self {
            client,
            base,
            extractor,
        })
    }

    /// Search page URL for `query`.
    #[must_use]
    pub fn url_for(&self, query: &DeviceQuery) -> Url {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("q", &normalize(&query.search_text()));
        url
    }
}

fn browser_headers(user_agent: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let user_agent = HeaderValue::from_str(user_agent)?;
    headers.insert(header::USER_AGENT, user_agent);
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("id-ID,id;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("max-age=0"));
    Ok(headers)
}

#[async_trait]
impl SampleFetcher for TokopediaFetcher {
    fn name(&self) -> &'static str {
        "tokopedia"
    }

    async fn fetch_samples(&self, query: &DeviceQuery) -> Result<SampleSet> {
        let url = self.url_for(query);
        debug!(url = %url, "Fetching search page");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Marketplace(format!("search page returned {status}")));
        }
        let body = response.text().await?;

        let extracted = self.extractor.extract_html(&body);
        debug!(
            prices = extracted.prices.len(),
            malformed = extracted.malformed,
            out_of_band = extracted.out_of_band,
            duplicates = extracted.duplicates,
            "Parsed search page"
        );

        Ok(SampleSet::from_raw(self.name(), extracted.prices)
            .with_discarded(extracted.malformed)
            .with_duplicates(extracted.duplicates))
    }

    fn search_url(&self, query: &DeviceQuery) -> Option<String> {
        Some(self.url_for(query).to_string())
    }
}
