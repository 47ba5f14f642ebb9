//! CLI entry point - the composition root.
//!
//! The configuration is loaded here once through [`bootstrap`] and handed to
//! the handlers. `config` and `version` run without it so they work before a
//! configuration file exists.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use pancake_cli::{Cli, CliError, Commands, bootstrap, handlers};
use pancake_core::ConfigError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Provider keys may come from a local .env file.
    dotenvy::dotenv().ok();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(CliError::exit_code_for(&err));
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_path() -> Result<PathBuf, CliError> {
    pancake_core::config_path()
        .map_err(ConfigError::from)
        .map_err(CliError::from)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Version => handlers::version::execute(),
        Commands::Config { command } => {
            handlers::config::execute(&config_path()?, command)?;
        }
        Commands::Project { command } => {
            let ctx = bootstrap(&config_path()?)?;
            handlers::project::execute(&ctx, command).await?;
        }
        Commands::Tool { command } => {
            let mut ctx = bootstrap(&config_path()?)?;
            handlers::tool::execute(&mut ctx, command).await?;
        }
        Commands::Ai {
            description,
            provider,
        } => {
            let ctx = bootstrap(&config_path()?)?;
            handlers::ai::execute(&ctx, &description, provider).await?;
        }
    }

    Ok(())
}
