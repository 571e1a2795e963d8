//! Handler for `fairprice estimate`.

use futures_util::future::join_all;
use serde_json::{json, Value};
use tabled::{Table, Tabled};

use super::command::EstimateArgs;
use super::output;
use crate::application::PriceService;
use crate::domain::{DeviceQuery, PriceOutcome};
use crate::error::Result;

#[derive(Tabled)]
struct EstimateRow {
    #[tabled(rename = "Device")]
    device: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Range")]
    range: String,
    #[tabled(rename = "Samples")]
    samples: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl EstimateRow {
    fn new(query: &DeviceQuery, outcome: &PriceOutcome) -> Self {
        let dash = || "-".to_string();
        match outcome.estimate() {
            Some(estimate) => Self {
                device: query.search_text(),
                price: rupiah(estimate.market_price()),
                range: format!("{} - {}", rupiah(estimate.min()), rupiah(estimate.max())),
                samples: format!("{} ({} rejected)", estimate.sample_count(), estimate.rejected_count()),
                confidence: estimate.confidence().to_string(),
                status: outcome.label().to_string(),
            },
            None => Self {
                device: query.search_text(),
                price: dash(),
                range: dash(),
                samples: dash(),
                confidence: dash(),
                status: outcome.label().to_string(),
            },
        }
    }
}

/// Format an amount the way Indonesian listings do: `Rp 8.540.000`.
#[must_use]
pub fn rupiah(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("Rp {grouped}")
}

/// JSON document describing one request.
pub fn outcome_json(query: &DeviceQuery, outcome: &PriceOutcome, search_url: Option<String>) -> Value {
    json!({
        "query": query.search_text(),
        "key": query.cache_key().as_str(),
        "search_url": search_url,
        "result": outcome.report(),
    })
}

/// One-line human summary of an outcome.
#[must_use]
pub fn summary(outcome: &PriceOutcome) -> String {
    match outcome {
        PriceOutcome::Estimated(estimate) => format!(
            "{} [{}] from {} listings",
            output::positive(rupiah(estimate.market_price())),
            estimate.confidence(),
            estimate.sample_count()
        ),
        PriceOutcome::Fallback { estimate, cause } => format!(
            "{} [{}] reference price ({cause})",
            output::highlight(rupiah(estimate.market_price())),
            estimate.confidence()
        ),
        PriceOutcome::NoData { cause } => output::negative(format!("no data ({cause})")),
    }
}

/// Execute `estimate`. Queries run concurrently; the rate limiter spaces
/// their fetches.
pub async fn execute(service: &PriceService, args: &EstimateArgs) -> Result<()> {
    let queries: Vec<DeviceQuery> = args
        .queries
        .iter()
        .map(|text| DeviceQuery::new(args.brand.as_deref(), text.as_str()))
        .collect();

    let outcomes = join_all(queries.iter().map(|query| service.get_price(query))).await;

    if output::is_json() {
        for (query, outcome) in queries.iter().zip(&outcomes) {
            output::json_output(outcome_json(query, outcome, service.search_url(query)));
        }
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    let rows: Vec<EstimateRow> = queries
        .iter()
        .zip(&outcomes)
        .map(|(query, outcome)| EstimateRow::new(query, outcome))
        .collect();
    output::lines(&Table::new(rows).to_string());

    for (query, outcome) in queries.iter().zip(&outcomes) {
        if let Some(cause) = outcome.cause() {
            output::warning(&format!("{}: {cause}", query.search_text()));
        }
        if output::verbosity() > 0 {
            if let Some(url) = service.search_url(query) {
                output::hint(&format!("check listings at {url}"));
            }
        }
    }
    Ok(())
}
