//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application
//! settings. Every section is optional; an empty file yields the defaults.
//!
//! # Example
//!
//! ```no_run
//! use fairprice::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("fairprice.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::estimation::{
    CacheSection, ConfidenceSection, EngineSection, FilterSection, RateLimitSection,
};
use super::fetcher::{FetcherSection, ReferenceSection};
use super::logging::LoggingConfig;
use crate::adapter::outbound::tokopedia::{PriceBand, TokopediaConfig};
use crate::application::ServiceConfig;
use crate::domain::{ConfidenceThresholds, FilterConfig, GapThreshold};
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Outlier filter settings.
    #[serde(default)]
    pub filter: FilterSection,

    /// Sample counts for each confidence label.
    #[serde(default)]
    pub confidence: ConfidenceSection,

    /// Cache lifetimes per outcome kind.
    #[serde(default)]
    pub cache: CacheSection,

    /// Outbound request spacing.
    #[serde(default)]
    pub rate_limit: RateLimitSection,

    /// Request handling limits.
    #[serde(default)]
    pub engine: EngineSection,

    /// Marketplace scraper settings.
    #[serde(default)]
    pub fetcher: FetcherSection,

    /// Reference price table used for fallbacks.
    #[serde(default)]
    pub reference: ReferenceSection,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Render the effective configuration, defaults included, as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Render(e).into())
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Runtime settings for the price service.
    #[must_use]
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            filter: FilterConfig {
                gap: self.filter.gap,
                min_samples: self.filter.min_samples,
            },
            thresholds: ConfidenceThresholds {
                high: self.confidence.high,
                medium: self.confidence.medium,
            },
            ttl: Duration::from_secs(self.cache.ttl_secs),
            fallback_ttl: Duration::from_secs(self.cache.fallback_ttl_secs),
            no_data_ttl: Duration::from_secs(self.cache.no_data_ttl_secs),
            min_interval: Duration::from_millis(self.rate_limit.min_interval_ms),
            fetch_timeout: Duration::from_secs(self.engine.fetch_timeout_secs),
            min_query_len: self.engine.min_query_len,
        }
    }

    /// Settings for the Tokopedia fetcher.
    #[must_use]
    pub fn tokopedia_config(&self) -> TokopediaConfig {
        TokopediaConfig {
            search_url: self.fetcher.search_url.clone(),
            timeout: Duration::from_secs(self.fetcher.timeout_secs),
            band: PriceBand {
                min: self.fetcher.min_price,
                max: self.fetcher.max_price,
            },
            user_agent: self.fetcher.user_agent.clone(),
            dedup_prices: self.fetcher.dedup_prices,
        }
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(invalid("format", "must be \"pretty\" or \"json\""));
        }

        match self.filter.gap {
            GapThreshold::Absolute(0) => {
                return Err(invalid("gap", "absolute gap must be greater than 0"));
            }
            GapThreshold::Relative(ratio) if ratio <= Decimal::ZERO => {
                return Err(invalid("gap", "relative gap must be greater than 0"));
            }
            _ => {}
        }

        if self.confidence.medium == 0 {
            return Err(invalid("medium", "must be greater than 0"));
        }
        if self.confidence.high < self.confidence.medium {
            return Err(invalid("high", "must be >= medium"));
        }

        if self.cache.ttl_secs == 0 {
            return Err(invalid("ttl_secs", "must be greater than 0"));
        }
        if self.cache.fallback_ttl_secs >= self.cache.ttl_secs {
            return Err(invalid("fallback_ttl_secs", "must be shorter than ttl_secs"));
        }
        if self.cache.no_data_ttl_secs >= self.cache.ttl_secs {
            return Err(invalid("no_data_ttl_secs", "must be shorter than ttl_secs"));
        }

        if self.engine.fetch_timeout_secs == 0 {
            return Err(invalid("fetch_timeout_secs", "must be greater than 0"));
        }
        if self.engine.min_query_len == 0 {
            return Err(invalid("min_query_len", "must be greater than 0"));
        }

        if self.fetcher.search_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "search_url",
            }
            .into());
        }
        if let Err(e) = url::Url::parse(&self.fetcher.search_url) {
            return Err(invalid("search_url", e.to_string()));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(invalid("timeout_secs", "must be greater than 0"));
        }
        if self.fetcher.min_price == 0 {
            return Err(invalid("min_price", "must be greater than 0"));
        }
        if self.fetcher.max_price < self.fetcher.min_price {
            return Err(invalid("max_price", "must be >= min_price"));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();
        let service = config.service_config();

        assert_eq!(service.ttl, Duration::from_secs(3600));
        assert_eq!(service.fallback_ttl, Duration::from_secs(300));
        assert_eq!(service.no_data_ttl, Duration::ZERO);
        assert_eq!(service.min_interval, Duration::from_secs(1));
        assert_eq!(service.min_query_len, 3);
        assert_eq!(service.filter.gap, GapThreshold::Relative(dec!(0.2)));
        assert_eq!(service.thresholds, ConfidenceThresholds::default());
        assert!(config.reference.prices_csv.is_none());
    }

    #[test]
    fn parses_absolute_gap() {
        let config = Config::parse_toml("[filter]\ngap = { absolute = 2000000 }\n").unwrap();
        assert_eq!(config.filter.gap, GapThreshold::Absolute(2_000_000));
    }

    #[test]
    fn parses_relative_gap() {
        let config = Config::parse_toml("[filter]\ngap = { relative = 0.35 }\n").unwrap();
        assert_eq!(config.filter.gap, GapThreshold::Relative(dec!(0.35)));
    }

    #[test]
    fn fetcher_band_flows_into_adapter_config() {
        let toml = "[fetcher]\nmin_price = 1000\nmax_price = 2000\ndedup_prices = false\n";
        let fetcher = Config::parse_toml(toml).unwrap().tokopedia_config();
        assert_eq!(fetcher.band, PriceBand { min: 1000, max: 2000 });
        assert!(!fetcher.dedup_prices);
    }

    #[test]
    fn rejects_inverted_confidence_thresholds() {
        let result = Config::parse_toml("[confidence]\nhigh = 3\nmedium = 5\n");
        assert!(matches!(
            result,
            Err(crate::error::Error::Config(ConfigError::InvalidValue { field: "high", .. }))
        ));
    }

    #[test]
    fn rejects_no_data_ttl_not_shorter_than_ttl() {
        let result = Config::parse_toml("[cache]\nttl_secs = 60\nno_data_ttl_secs = 60\n");
        assert!(matches!(
            result,
            Err(crate::error::Error::Config(ConfigError::InvalidValue {
                field: "no_data_ttl_secs",
                ..
            }))
        ));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = Config::parse_toml("[logging]\nformat = \"xml\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn effective_config_renders_as_toml() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(rendered.contains("[rate_limit]"));
        assert!(rendered.contains("min_interval_ms = 1000"));
    }
}
