//! Handler for `fairprice watch`: one estimate per stdin line.
//!
//! Lines starting with `:` are commands:
//! `:clear` empties the cache, `:size` reports its size, `:quit` exits.

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::command::WatchArgs;
use super::estimate::{outcome_json, summary};
use super::output;
use crate::application::PriceService;
use crate::domain::DeviceQuery;
use crate::error::Result;

/// A parsed stdin line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Query(&'a str),
    Clear,
    Size,
    Quit,
    Unknown(&'a str),
    Blank,
}

fn parse_line(line: &str) -> Line<'_> {
    let line = line.trim();
    match line {
        "" => Line::Blank,
        ":clear" => Line::Clear,
        ":size" => Line::Size,
        ":quit" | ":q" => Line::Quit,
        command if command.starts_with(':') => Line::Unknown(command),
        query => Line::Query(query),
    }
}

/// Execute `watch` until stdin closes or `:quit` is read.
pub async fn execute(service: &PriceService, args: &WatchArgs) -> Result<()> {
    output::header(env!("CARGO_PKG_VERSION"));
    output::note("Enter a device name per line (:clear, :size, :quit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Line::Blank => {}
            Line::Quit => break,
            Line::Clear => {
                let removed = service.clear_cache();
                output::success(&format!("Cleared {removed} cached results"));
            }
            Line::Size => output::field("Cached", service.cache_size()),
            Line::Unknown(command) => output::warning(&format!("Unknown command {command}")),
            Line::Query(text) => {
                let query = DeviceQuery::new(args.brand.as_deref(), text);
                let outcome = service.get_price(&query).await;
                if output::is_json() {
                    output::json_output(outcome_json(&query, &outcome, service.search_url(&query)));
                } else {
                    output::field(&query.search_text(), summary(&outcome));
                }
            }
        }
    }

    debug!("Watch input closed");
    Ok(())
}
