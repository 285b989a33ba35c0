use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use ds_cli::commands::report::ReportStyle;
use ds_cli::commands::{add, del, init, reset, status};
use ds_cli::{Cli, Commands, Config};
use ds_db::Database;

/// Exit status after printing usage for `-h`/`--help`.
const USAGE_EXIT_CODE: i32 = 1;

/// Parses arguments. Help goes to stdout and exits non-zero; other usage
/// errors exit through clap.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::DisplayHelp => {
            // A failed write to stdout has nowhere to be reported
            let _ = err.print();
            std::process::exit(USAGE_EXIT_CODE);
        }
        Err(err) => err.exit(),
    }
}

fn main() -> Result<()> {
    let cli = parse_args();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr; stdout carries the report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let db = Database::at(&config.data_path);
    let today = Local::now().date_naive();
    let style = ReportStyle::from_flags(cli.json, cli.target);
    let mut stdout = io::stdout().lock();

    match &cli.command {
        None | Some(Commands::Status) => status::run(&mut stdout, &db, today, style)?,
        Some(Commands::Add { name }) => add::run(&mut stdout, &db, name, today, style)?,
        Some(Commands::Reset { entry }) => reset::run(&mut stdout, &db, entry, today, style)?,
        Some(Commands::Del { entry }) => del::run(&mut stdout, &db, entry, today, style)?,
        Some(Commands::Init) => init::run(&mut stdout, &db)?,
    }

    stdout.flush()?;
    Ok(())
}
