//! Marketplace fetcher and reference table configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::adapter::outbound::tokopedia::{DEFAULT_SEARCH_URL, DEFAULT_USER_AGENT};

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_min_price() -> u64 {
    500_000
}

const fn default_max_price() -> u64 {
    100_000_000
}

const fn default_true() -> bool {
    true
}

/// Tokopedia scraper settings (`[fetcher]`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FetcherSection {
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// HTTP request timeout in seconds. Defaults to 10.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Lowest plausible listing price. Defaults to 500 000.
    #[serde(default = "default_min_price")]
    pub min_price: u64,

    /// Highest plausible listing price. Defaults to 100 000 000.
    #[serde(default = "default_max_price")]
    pub max_price: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Collapse identical prices on a page. Defaults to true.
    #[serde(default = "default_true")]
    pub dedup_prices: bool,
}

impl Default for FetcherSection {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            timeout_secs: default_timeout_secs(),
            min_price: default_min_price(),
            max_price: default_max_price(),
            user_agent: default_user_agent(),
            dedup_prices: true,
        }
    }
}

/// Reference price table (`[reference]`).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ReferenceSection {
    /// CSV with `Brand,Marketing_Name,Price_IDR` columns. No fallback when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices_csv: Option<PathBuf>,
}
