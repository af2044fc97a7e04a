//! tagsheet - Collect labeled field values from batches of PDF reports
//!
//! tagsheet provides:
//! - Reconstruction of shown text tokens from page content streams
//! - Tag-to-value association over a document's merged tokens
//! - A per-run summary (hits per tag, incomplete and empty reports)
//! - Spreadsheet output (xlsx/csv) with typed cells and column widths

use anyhow::Result;
use clap::Parser;

mod backends;
mod cli;
mod core;
mod extract;
mod flows;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();

    cli::run(cli)
}
