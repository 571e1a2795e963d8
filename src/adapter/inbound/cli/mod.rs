//! CLI module graph and dispatch.

pub mod command;
pub mod config;
pub mod estimate;
pub mod output;
pub mod paths;
pub mod watch;

use crate::error::Result;
use crate::infrastructure::bootstrap;
use command::{Cli, Commands, ConfigCommand};

/// Run the parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config_path = paths::resolve_config(cli.config.as_deref());

    match cli.command {
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(arg)) => {
            config::execute_show(arg.path.as_deref().or(config_path.as_deref()))
        }
        Commands::Config(ConfigCommand::Check(arg)) => {
            config::execute_check(arg.path.as_deref().or(config_path.as_deref()))
        }
        Commands::Estimate(args) => {
            let config = config::load(config_path.as_deref())?;
            config
                .logging
                .clone()
                .with_verbosity(cli.quiet, cli.verbose)
                .init();
            let service = bootstrap::build_service(&config)?;
            estimate::execute(&service, &args).await
        }
        Commands::Watch(args) => {
            let config = config::load(config_path.as_deref())?;
            config
                .logging
                .clone()
                .with_verbosity(cli.quiet, cli.verbose)
                .init();
            let service = bootstrap::build_service(&config)?;
            watch::execute(&service, &args).await
        }
    }
}
