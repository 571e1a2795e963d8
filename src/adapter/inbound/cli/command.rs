//! Command-line interface definitions.
//!
//! Defines the `fairprice` CLI using `clap`: one-shot estimates, an
//! interactive watch loop over stdin, and configuration utilities.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Fair market price estimates for devices from marketplace listings
#[derive(Parser, Debug)]
#[command(name = "fairprice")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, env = "FAIRPRICE_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate the market price of one or more devices
    Estimate(EstimateArgs),

    /// Read device names from stdin and estimate each line
    Watch(WatchArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `fairprice config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented configuration template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file.
    Check(ConfigPathArg),
}

/// Arguments for `fairprice estimate`.
#[derive(Parser, Debug)]
pub struct EstimateArgs {
    /// Device names, e.g. "Galaxy S24 Ultra". Each is estimated separately.
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Brand applied to every query
    #[arg(short, long)]
    pub brand: Option<String>,
}

/// Arguments for `fairprice watch`.
#[derive(Parser, Debug)]
pub struct WatchArgs {
    /// Brand applied to every line
    #[arg(short, long)]
    pub brand: Option<String>,
}

/// Optional explicit configuration path for `config` subcommands.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file (defaults to the resolved config)
    pub path: Option<PathBuf>,
}

/// Arguments for `fairprice config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the template
    #[arg(default_value = "fairprice.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
