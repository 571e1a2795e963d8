//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::output;
use crate::adapter::outbound::reference::PriceBook;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::ReferencePrices;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../fairprice.toml.example");

/// Load `path`, or return defaults when no file was found.
pub fn load(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::default()),
    }
}

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note(&format!("2. Run: fairprice config check {}", path.display()));
    output::note("3. Run: fairprice estimate \"Galaxy S24\" --brand Samsung");
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: Option<&Path>) -> Result<()> {
    let config = load(path)?;

    if output::is_json() {
        output::json_output(json!({
            "command": "config.show",
            "path": path.map(|p| p.display().to_string()),
            "config": config,
        }));
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field(
        "Source",
        path.map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string()),
    );
    output::lines(&config.to_toml()?);
    Ok(())
}

/// Execute `config check`.
pub fn execute_check(path: Option<&Path>) -> Result<()> {
    let config = load(path)?;
    let service = config.service_config();

    output::section("Configuration Check");
    match path {
        Some(path) => output::field("Config", path.display()),
        None => output::field("Config", "built-in defaults"),
    }
    output::success("Configuration is valid");

    output::section("Summary");
    output::field("Cache TTL", format!("{}s", service.ttl.as_secs()));
    output::field("Fallback TTL", format!("{}s", service.fallback_ttl.as_secs()));
    output::field("Rate limit", format!("{}ms", service.min_interval.as_millis()));
    output::field("Search URL", &config.fetcher.search_url);

    match &config.reference.prices_csv {
        Some(csv) => {
            let book = PriceBook::load(csv)?;
            output::success(&format!("Reference table has {} devices", book.len()));
        }
        None => output::warning("No reference price table; failed fetches return no data"),
    }

    output::success("Configuration check complete");
    Ok(())
}
