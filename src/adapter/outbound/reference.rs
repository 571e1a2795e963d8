//! Reference price table backed by a CSV file.
//!
//! Expected header: `Brand,Marketing_Name,Price_IDR` with an optional
//! `Year` column. Prices may carry `Rp`, `.` or `,` separators. Rows with a
//! zero or empty price are skipped.

use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::normalize;
use crate::error::ReferenceError;
use crate::port::outbound::reference::ReferencePrices;

const BRAND: &str = "Brand";
const MARKETING_NAME: &str = "Marketing_Name";
const PRICE: &str = "Price_IDR";

/// One CSV row. Extra columns such as `Year` are ignored.
#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "Brand")]
    brand: String,
    #[serde(rename = "Marketing_Name")]
    marketing_name: String,
    #[serde(rename = "Price_IDR", default)]
    price: String,
}

/// In-memory reference prices indexed by normalized device name.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    /// `"brand marketing name"`, normalized.
    by_full_name: HashMap<String, u64>,
    /// Marketing name alone, normalized. First row wins.
    by_name: HashMap<String, u64>,
}

impl PriceBook {
    /// Build a book from `(brand, marketing_name, price)` rows.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str, u64)>) -> Self {
        let mut book = Self::default();
        for (brand, name, price) in entries {
            book.insert(brand, name, price);
        }
        book
    }

    /// Load a CSV file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a required column is
    /// missing, or a price is not a number.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReferenceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ReferenceError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let book = Self::parse(&path.display().to_string(), &content)?;
        info!(path = %path.display(), devices = book.len(), "Loaded reference prices");
        Ok(book)
    }

    /// Parse CSV text. `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// Same as [`PriceBook::load`], minus I/O.
    pub fn parse(origin: &str, content: &str) -> Result<Self, ReferenceError> {
        let malformed = |source: csv::Error| ReferenceError::Csv {
            path: origin.to_string(),
            source,
        };
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut headers = reader.headers().map_err(malformed)?.clone();
        if let Some(first) = headers.get(0).filter(|h| h.starts_with('\u{feff}')) {
            let mut cleaned: Vec<String> = headers.iter().map(str::to_string).collect();
            cleaned[0] = first.trim_start_matches('\u{feff}').to_string();
            headers = StringRecord::from(cleaned);
        }
        for column in [BRAND, MARKETING_NAME, PRICE] {
            if !headers.iter().any(|h| h == column) {
                return Err(ReferenceError::MissingColumn {
                    path: origin.to_string(),
                    column,
                });
            }
        }

        let mut book = Self::default();
        let mut record = StringRecord::new();
        while reader.read_record(&mut record).map_err(malformed)? {
            let line = record.position().map_or(0, |p| p.line() as usize);
            let row: Row = record.deserialize(Some(&headers)).map_err(malformed)?;
            let price = parse_price(&row.price).ok_or_else(|| ReferenceError::InvalidPrice {
                line,
                value: row.price.clone(),
            })?;
            if price == 0 {
                debug!(line, "Skipping row without price");
                continue;
            }
            book.insert(&row.brand, &row.marketing_name, price);
        }
        Ok(book)
    }

    fn insert(&mut self, brand: &str, name: &str, price: u64) {
        let name_key = normalize(name);
        if name_key.is_empty() || price == 0 {
            return;
        }
        let full_key = normalize(&format!("{brand} {name}"));
        self.by_full_name.insert(full_key, price);
        self.by_name.entry(name_key).or_insert(price);
    }
}

impl ReferencePrices for PriceBook {
    fn lookup(&self, brand: Option<&str>, marketing_name: &str) -> Option<u64> {
        let name_key = normalize(marketing_name);
        if let Some(brand) = brand {
            let full_key = normalize(&format!("{brand} {marketing_name}"));
            if let Some(price) = self.by_full_name.get(&full_key) {
                return Some(*price);
            }
        }
        self.by_name
            .get(&name_key)
            .or_else(|| self.by_full_name.get(&name_key))
            .copied()
    }

    fn len(&self) -> usize {
        self.by_full_name.len()
    }
}

/// `"Rp 12.999.000"` -> `12999000`; empty -> `0`; anything else -> `None`.
fn parse_price(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("Rp")
        .chars()
        .filter(|c| !matches!(c, '.' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Some(0);
    }
    cleaned.parse().ok()
}
