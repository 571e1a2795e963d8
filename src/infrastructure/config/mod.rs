//! Configuration loading and section types.

pub mod estimation;
pub mod fetcher;
pub mod logging;
pub mod settings;

pub use settings::Config;
