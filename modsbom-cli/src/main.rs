//! modsbom CLI entry point
//!
//! Parses arguments, loads configuration, initializes logging, and dispatches
//! to the subcommand handlers. Errors are printed to stderr and mapped to
//! the process exit code by [`CliError::exit_code`].

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use colored::Colorize;

use modsbom_core::config::{GeneralConfig, ModsbomConfig};
use modsbom_core::error::ModsbomError;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            e.exit_code()
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let loaded = ModsbomConfig::load_or_default(&cli.config).await;

    let general = logging_config(loaded.as_ref().ok(), cli.log_level.as_deref());
    if let Err(e) = logging::init_tracing(&general) {
        eprintln!("{} {}", "warning:".yellow().bold(), e);
    }

    tracing::debug!(config = %cli.config.display(), "modsbom starting");

    let writer = OutputWriter::new(cli.output);

    match cli.command {
        Commands::Generate(args) => {
            let config = loaded.map_err(config_error)?;
            commands::generate::execute(args, &config, &writer).await
        }
        Commands::Detect(args) => commands::detect::execute(args, &writer).await,
        // reports load failures itself
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer).await,
    }
}

/// Resolve the logging settings: `--log-level` flag over the configuration file.
///
/// An unloadable configuration falls back to defaults so the error can still be logged.
fn logging_config(config: Option<&ModsbomConfig>, log_level: Option<&str>) -> GeneralConfig {
    let mut general = config.map(|c| c.general.clone()).unwrap_or_default();
    if let Some(level) = log_level {
        general.log_level = level.to_owned();
    }
    general
}

fn config_error(e: ModsbomError) -> CliError {
    match e {
        ModsbomError::Config(inner) => CliError::Config(inner.to_string()),
        other => CliError::Core(other),
    }
}
