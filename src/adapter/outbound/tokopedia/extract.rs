//! Price extraction from marketplace search result pages.

use regex::Regex;
use scraper::Html;

use crate::error::Result;

/// Matches `Rp1.234.567`, `Rp 1.234.567` and `Rp1234567`.
const PRICE_PATTERN: &str = r"Rp\s*[\d\.]+";

/// Inclusive range of prices considered plausible for a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBand {
    pub min: u64,
    pub max: u64,
}

impl PriceBand {
    #[must_use]
    pub const fn contains(&self, price: u64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceBand {
    fn default() -> Self {
        Self {
            min: 500_000,
            max: 100_000_000,
        }
    }
}

/// Prices read from one page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// Plausible prices in ascending order.
    pub prices: Vec<i64>,
    /// Matches whose digits could not be read as a number.
    pub malformed: usize,
    /// Well-formed prices outside the plausibility band.
    pub out_of_band: usize,
    /// Repeated prices collapsed into one when dedup is on.
    pub duplicates: usize,
}

/// Pulls rupiah amounts out of rendered page text.
#[derive(Debug, Clone)]
pub struct PriceExtractor {
    pattern: Regex,
    band: PriceBand,
    dedup: bool,
}

impl PriceExtractor {
    /// Build an extractor.
    ///
    /// # Errors
    ///
    /// Returns an error if the price pattern fails to compile.
    pub fn new(band: PriceBand, dedup: bool) -> Result<Self> {
        let pattern = Regex::new(PRICE_PATTERN)?;
        Ok(Self {
            pattern,
            band,
            dedup,
        })
    }

    #[must_use]
    pub const fn band(&self) -> PriceBand {
        self.band
    }

    /// Extract prices from an HTML document.
    #[must_use]
    pub fn extract_html(&self, html: &str) -> Extracted {
        let document = Html::parse_document(html);
        let text: String = document.root_element().text().collect::<Vec<_>>().join(" ");
        self.extract_text(&text)
    }

    /// Extract prices from plain text.
    #[must_use]
    pub fn extract_text(&self, text: &str) -> Extracted {
        let mut extracted = Extracted::default();

        for found in self.pattern.find_iter(text) {
            let digits: String = found.as_str().chars().filter(char::is_ascii_digit).collect();
            let Ok(price) = digits.parse::<u64>() else {
                extracted.malformed += 1;
                continue;
            };
            if !self.band.contains(price) {
                extracted.out_of_band += 1;
                continue;
            }
            match i64::try_from(price) {
                Ok(price) => extracted.prices.push(price),
                Err(_) => extracted.out_of_band += 1,
            }
        }

        extracted.prices.sort_unstable();
        if self.dedup {
            let before = extracted.prices.len();
            extracted.prices.dedup();
            extracted.duplicates = before - extracted.prices.len();
        }
        extracted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(dedup: bool) -> PriceExtractor {
        PriceExtractor::new(PriceBand::default(), dedup).unwrap()
    }

    #[test]
    fn reads_indonesian_price_formats() {
        let text = "Rp1.234.567 lalu Rp 2.500.000 dan Rp3000000";
        let extracted = extractor(true).extract_text(text);
        assert_eq!(extracted.prices, vec![1_234_567, 2_500_000, 3_000_000]);
    }

    #[test]
    fn drops_implausible_prices() {
        let text = "Rp15.000 Rp 8.500.000 Rp250.000.000";
        let extracted = extractor(true).extract_text(text);
        assert_eq!(extracted.prices, vec![8_500_000]);
        assert_eq!(extracted.out_of_band, 2);
    }

    #[test]
    fn band_edges_are_inclusive() {
        let text = "Rp500.000 Rp100.000.000";
        let extracted = extractor(true).extract_text(text);
        assert_eq!(extracted.prices, vec![500_000, 100_000_000]);
    }

    #[test]
    fn counts_matches_without_digits() {
        let extracted = extractor(true).extract_text("Harga Rp. mulai Rp 1.000.000");
        assert_eq!(extracted.malformed, 1);
        assert_eq!(extracted.prices, vec![1_000_000]);
    }

    #[test]
    fn dedup_is_optional() {
        let text = "Rp 8.500.000 Rp 8.500.000 Rp 8.400.000";
        let collapsed = extractor(true).extract_text(text);
        assert_eq!(collapsed.prices, vec![8_400_000, 8_500_000]);
        assert_eq!(collapsed.duplicates, 1);
        assert_eq!(
            extractor(false).extract_text(text).prices,
            vec![8_400_000, 8_500_000, 8_500_000]
        );
    }

    #[test]
    fn reads_prices_split_across_elements() {
        let html = r#"
            <html><body>
              <div class="card"><span class="name">Galaxy S24</span>
                <div class="price">Rp12.999.000</div></div>
              <div class="card"><div class="price">Rp 13.499.000</div></div>
            </body></html>
        "#;
        let extracted = extractor(true).extract_html(html);
        assert_eq!(extracted.prices, vec![12_999_000, 13_499_000]);
    }

    #[test]
    fn page_without_prices_is_empty() {
        let extracted = extractor(true).extract_html("<html><body>Tidak ditemukan</body></html>");
        assert!(extracted.prices.is_empty());
        assert_eq!(extracted.malformed, 0);
    }
}
