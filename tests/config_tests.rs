mod support;

use std::time::Duration;

use fairprice::domain::GapThreshold;
use fairprice::error::{ConfigError, Error};
use fairprice::infrastructure::config::settings::Config;
use rust_decimal_macros::dec;

use support::temp_file;

const TEMPLATE: &str = include_str!("../fairprice.toml.example");

#[test]
fn shipped_template_is_valid_and_matches_defaults() {
    let config = Config::parse_toml(TEMPLATE).expect("template parses");
    let defaults = Config::default();

    assert_eq!(config.filter.gap, defaults.filter.gap);
    assert_eq!(config.filter.min_samples, defaults.filter.min_samples);
    assert_eq!(config.cache.ttl_secs, defaults.cache.ttl_secs);
    assert_eq!(config.cache.fallback_ttl_secs, defaults.cache.fallback_ttl_secs);
    assert_eq!(config.rate_limit.min_interval_ms, defaults.rate_limit.min_interval_ms);
    assert_eq!(config.fetcher.search_url, defaults.fetcher.search_url);
    assert_eq!(config.fetcher.min_price, 500_000);
    assert_eq!(config.fetcher.max_price, 100_000_000);
}

#[test]
fn load_reads_file_and_maps_service_settings() {
    let file = temp_file(
        ".toml",
        r#"
[filter]
min_samples = 4
gap = { absolute = 2000000 }

[confidence]
high = 8
medium = 4

[cache]
ttl_secs = 600
fallback_ttl_secs = 60
no_data_ttl_secs = 15

[rate_limit]
min_interval_ms = 250

[engine]
fetch_timeout_secs = 7
min_query_len = 4
"#,
    );

    let service = Config::load(file.path()).unwrap().service_config();

    assert_eq!(service.filter.gap, GapThreshold::Absolute(2_000_000));
    assert_eq!(service.filter.min_samples, 4);
    assert_eq!(service.thresholds.high, 8);
    assert_eq!(service.thresholds.medium, 4);
    assert_eq!(service.ttl, Duration::from_secs(600));
    assert_eq!(service.fallback_ttl, Duration::from_secs(60));
    assert_eq!(service.no_data_ttl, Duration::from_secs(15));
    assert_eq!(service.min_interval, Duration::from_millis(250));
    assert_eq!(service.fetch_timeout, Duration::from_secs(7));
    assert_eq!(service.min_query_len, 4);
}

#[test]
fn relative_gap_accepts_float_literal() {
    let config = Config::parse_toml("[filter]\ngap = { relative = 0.15 }\n").unwrap();
    assert_eq!(config.filter.gap, GapThreshold::Relative(dec!(0.15)));
}

#[test]
fn config_rejects_fallback_ttl_not_shorter_than_ttl() {
    let result = Config::parse_toml("[cache]\nttl_secs = 300\nfallback_ttl_secs = 300\n");

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "fallback_ttl_secs",
            ..
        })) => {}
        Err(err) => panic!("Expected fallback_ttl_secs error, got {err}"),
        Ok(_) => panic!("Expected equal TTLs to be rejected"),
    }
}

#[test]
fn config_rejects_zero_gap() {
    for toml in [
        "[filter]\ngap = { absolute = 0 }\n",
        "[filter]\ngap = { relative = 0.0 }\n",
    ] {
        match Config::parse_toml(toml) {
            Err(Error::Config(ConfigError::InvalidValue { field: "gap", .. })) => {}
            other => panic!("Expected gap error for {toml:?}, got {other:?}"),
        }
    }
}

#[test]
fn config_rejects_inverted_price_band() {
    let result = Config::parse_toml("[fetcher]\nmin_price = 2000\nmax_price = 1000\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "max_price",
            ..
        }))
    ));
}

#[test]
fn config_rejects_bad_search_url() {
    let result = Config::parse_toml("[fetcher]\nsearch_url = \"tokopedia dot com\"\n");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "search_url",
            ..
        }))
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let result = Config::parse_toml("[cache\nttl_secs = 1");
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn missing_file_is_a_read_error() {
    let result = Config::load("/nonexistent/fairprice.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn reference_path_is_optional() {
    let config = Config::parse_toml("[reference]\nprices_csv = \"data/prices.csv\"\n").unwrap();
    assert_eq!(
        config.reference.prices_csv.as_deref(),
        Some(std::path::Path::new("data/prices.csv"))
    );
}
