//! Crate-wide error types.
//!
//! Domain failures that end up inside a cached [`PriceOutcome`] live in
//! [`crate::domain::error`]; everything here is an I/O or setup failure.
//!
//! [`PriceOutcome`]: crate::domain::PriceOutcome

use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[source] toml::ser::Error),
}

/// Failures raised by the reference price table.
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("failed to read reference prices from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("reference price file {path} is missing column {column}")]
    MissingColumn { path: String, column: &'static str },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("invalid price '{value}' on line {line}")]
    InvalidPrice { line: usize, value: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The marketplace answered, but not with a usable search page.
    #[error("marketplace error: {0}")]
    Marketplace(String),

    #[error("price pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;
