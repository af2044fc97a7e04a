//! CLI module - Command-line interface definitions and handlers

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::PathBuf;

use crate::backends::pdf::PdfLoader;
use crate::backends::walk::{collect_documents, DEFAULT_EXTENSION};
use crate::backends::writer::writer_for;
use crate::core::error::ScanError;
use crate::core::model::Tag;
use crate::flows::report::assemble;
use crate::flows::scan::{scan_documents, ScanOptions};
use crate::flows::stats::{log_counters, print_stats, StatsFormat};

/// tagsheet - collect labeled values from scanned PDF reports into a spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "tagsheet")]
#[command(
    author,
    version,
    about,
    long_about = r#"tagsheet reads every PDF report below a folder, looks for each tag's label
("<tag>:") in the rendered text, and takes the text right after the label as
the tag's value. One row per report is written to a workbook.

Values that start with digits are stored as percentages (the number divided
by 100). Tags that do not occur in a report are written as "not found".

Examples:
    tagsheet
    tagsheet -p path/to/my/reports -t Tumorfläche Grading -o results.xlsx -v
    tagsheet -p reports -o results.csv --stats json
"#
)]
pub struct Cli {
    /// Folder that contains the scanned reports.
    #[arg(
        short,
        long,
        env = "TAGSHEET_PATH",
        default_value = "documents",
        value_name = "PATH",
        long_help = "Folder that contains the scanned reports. Subfolders are searched as well;\n\
every file with a .pdf extension is scanned."
    )]
    pub path: PathBuf,

    /// Tags to search for.
    #[arg(
        short,
        long,
        num_args = 1..,
        default_values = ["Tumorfläche", "Grading"],
        value_name = "TAG",
        long_help = "Tags to search for. A tag is found when a text token equals the tag followed\n\
by a colon; the next token is its value. Each tag becomes a column."
    )]
    pub tags: Vec<String>,

    /// Output file (.xlsx or .csv).
    #[arg(
        short,
        long,
        env = "TAGSHEET_OUTPUT",
        default_value = "results.xlsx",
        value_name = "FILE",
        long_help = "Output file. A .csv extension writes CSV; anything else writes an XLSX\n\
workbook."
    )]
    pub output: PathBuf,

    /// Verbose mode (progress and counters).
    #[arg(
        short,
        long,
        long_help = "Log every scanned file and the summary counters to stderr.\n\
RUST_LOG overrides the level chosen here."
    )]
    pub verbose: bool,

    /// Quiet mode (errors only).
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Print summary statistics to stdout (summary/json).
    #[arg(
        long,
        value_name = "FORMAT",
        long_help = "Print the run's counters to stdout after the report is written.\n\n\
Supported values:\n\
- summary: human-readable block\n\
- json: counters as a JSON object"
    )]
    pub stats: Option<String>,

    /// Skip unreadable reports instead of aborting.
    #[arg(
        long,
        long_help = "By default a report that cannot be opened, or whose page tree cannot be read,\n\
aborts the whole run. With this flag it is logged as a warning and left out of\n\
the table and the counters."
    )]
    pub skip_unreadable: bool,

    /// Write the placeholder table when no reports are found.
    #[arg(
        long,
        long_help = "When the folder contains no reports, still write a table with a single\n\
\"no files found\" row. The run exits with an error either way."
    )]
    pub write_empty: bool,

    /// Number of reports scanned in parallel.
    #[arg(
        long,
        default_value = "1",
        value_name = "N",
        long_help = "Number of reports scanned in parallel. Values above 1 require a build with\n\
the `parallel` feature; otherwise scanning stays sequential."
    )]
    pub jobs: usize,
}

impl Cli {
    /// Default log filter for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let stats_format = cli
        .stats
        .as_deref()
        .map(|s| s.parse::<StatsFormat>().map_err(|e| anyhow!(e)))
        .transpose()?;

    let tags: Vec<Tag> = cli.tags.iter().map(|t| Tag::from(t.as_str())).collect();

    log::info!("getting file list from {}", cli.path.display());
    let documents = collect_documents(&cli.path, DEFAULT_EXTENSION);

    if documents.is_empty() {
        log::warn!("No PDF files found in folder '{}'", cli.path.display());
        if cli.write_empty {
            writer_for(&cli.output)
                .write(&assemble(&[], &tags), &cli.output)
                .context("Failed to write placeholder report")?;
        }
        return Err(ScanError::NoDocumentsFound { path: cli.path }.into());
    }

    let options = ScanOptions {
        skip_unreadable: cli.skip_unreadable,
        jobs: cli.jobs,
    };
    let outcome = scan_documents(&PdfLoader, &documents, &tags, options)?;

    log_counters(&outcome.counters);
    if !outcome.skipped.is_empty() {
        log::warn!("{} unreadable files skipped", outcome.skipped.len());
    }

    let table = assemble(&outcome.documents, &tags);
    writer_for(&cli.output).write(&table, &cli.output)?;
    log::info!(
        "wrote {} rows to {}",
        outcome.documents.len(),
        cli.output.display()
    );

    if let Some(format) = stats_format {
        print_stats(&outcome.counters, format)?;
    }

    Ok(())
}
