//! # FreightDesk CLI Entry Point
//!
//! Parses arguments, initializes logging, and dispatches to handlers in
//! [`freightdesk_cli::commands`].

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use freightdesk_cli::commands::{
    run_config, run_new_id, run_summary, run_validate, ConfigArgs, NewIdArgs, SummaryArgs,
    ValidateArgs,
};
use freightdesk_cli::FreightDeskConfig;

/// FreightDesk quotation calculator.
///
/// Computes category subtotals, tax, and grand totals for freight
/// quotation documents.
#[derive(Parser, Debug)]
#[command(name = "freightdesk", version, about)]
struct Cli {
    /// Path to configuration file.
    #[arg(long, global = true, env = "FREIGHTDESK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print category subtotals and the financial summary.
    Summary(SummaryArgs),
    /// Check a quotation document against strict validation.
    Validate(ValidateArgs),
    /// Print a freshly generated identifier.
    NewId(NewIdArgs),
    /// Show or initialize configuration.
    Config(ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();
    debug!(command = ?cli.command, "freightdesk starting");

    let output = match &cli.command {
        Commands::NewId(args) => run_new_id(args),
        Commands::Config(args) => run_config(args, cli.config.clone())?,
        Commands::Summary(args) => {
            let config = load_config(cli.config.clone())?;
            run_summary(args, &config)
                .with_context(|| format!("summarizing {}", args.file.display()))?
        }
        Commands::Validate(args) => {
            let config = load_config(cli.config.clone())?;
            run_validate(args, &config)
                .with_context(|| format!("validating {}", args.file.display()))?
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<FreightDeskConfig> {
    FreightDeskConfig::load(path).context("loading configuration")
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so `summary --json` output stays parseable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=freightdesk=trace` - Show trace for freightdesk crates only
/// - Default: INFO, DEBUG for freightdesk crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,freightdesk=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
