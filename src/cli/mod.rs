//! Command-line interface for cmsify.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **convert**: Convert a progress note into a CMS-ready problem list
//! - **score**: Score a single phrase against the code table
//! - **table**: List, show, or export entries from the code table
//!
//! ## Usage
//!
//! ```text
//! # Convert a note file
//! cmsify convert note.txt
//!
//! # Pipe a note from stdin
//! cat note.txt | cmsify convert
//!
//! # JSON output for scripting
//! cmsify convert note.txt --format json
//!
//! # Inspect why a phrase matched
//! cmsify score "Mild AKI likely prerenal"
//!
//! # Browse the code table
//! cmsify table list --prefix E11
//! ```

use clap::{Parser, Subcommand};

pub mod convert;
pub mod score;
pub mod table;

/// Code table path used when `--table` is not given
pub const DEFAULT_TABLE_PATH: &str = "icd10cm_codes.csv";

#[derive(Parser)]
#[command(name = "cmsify")]
#[command(version)]
#[command(about = "Convert clinical progress notes into a CMS-ready ICD-10 problem list")]
#[command(
    long_about = "cmsify converts free-text clinical notes into a structured problem list.\n\nIt recognizes condition mentions, fuzzy-matches each against a local ICD-10 code table, and annotates every problem with objective supporting findings from the note.\n\nEverything runs locally and deterministically: no network calls, no learned models."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a progress note into a problem list
    Convert(convert::ConvertArgs),

    /// Score a phrase against the code table
    Score(score::ScoreArgs),

    /// Inspect the code table
    Table(table::TableArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}
