//! sqldump-rows: export the rows of a MySQL dump as CSV and JSON files.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sqldump_rows::DumpParser;
use sqldump_rows::config::{CliArgs, ExportConfig};
use sqldump_rows::export::export_tables;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();
    setup_logging(args.verbose);

    let config = ExportConfig::from_args(args).context("Invalid configuration")?;
    info!(
        schema = %config.schema_source,
        tables = ?config.registry.table_names(),
        "known tables"
    );

    let parser = DumpParser::new(&config.registry);
    let rows = parser
        .parse_path(&config.input)
        .with_context(|| format!("Failed to parse {}", config.input.display()))?;

    let summary = export_tables(&rows, &config.registry, &config.output_dir, config.format)
        .with_context(|| format!("Failed to export to {}", config.output_dir.display()))?;

    for (table, count) in &summary.tables {
        info!("{table}: {count} rows");
    }
    info!(
        tables = summary.tables.len(),
        files = summary.files.len(),
        "wrote {}",
        config.output_dir.display()
    );

    Ok(())
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("sqldump_rows=debug,warn")
    } else {
        EnvFilter::new("sqldump_rows=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
