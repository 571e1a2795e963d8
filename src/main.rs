use clap::Parser;

use fairprice::adapter::inbound::cli::command::Cli;
use fairprice::adapter::inbound::cli::output::{self, OutputConfig};
use fairprice::adapter::inbound::cli::run;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    if let Err(e) = run(cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
