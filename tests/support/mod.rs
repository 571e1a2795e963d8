#![allow(dead_code)]

pub mod fetcher;
pub mod reference;
pub mod server;

use std::io::Write;
use std::time::Duration;

use fairprice::application::ServiceConfig;
use fairprice::domain::{FilterConfig, GapThreshold};
use tempfile::NamedTempFile;

/// Service settings with an absolute gap, handy for round-number fixtures.
pub fn service_config(gap: u64) -> ServiceConfig {
    ServiceConfig {
        filter: FilterConfig {
            gap: GapThreshold::Absolute(gap),
            min_samples: 3,
        },
        ..ServiceConfig::default()
    }
}

/// Write `contents` to a temp file with the given suffix.
pub fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("fairprice-test-")
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

pub const ONE_HOUR: Duration = Duration::from_secs(3600);
