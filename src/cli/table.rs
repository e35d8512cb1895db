use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};

use crate::cli::{OutputFormat, DEFAULT_TABLE_PATH};
use crate::core::types::CodeId;
use crate::table::store::CodeTable;

#[derive(Args)]
pub struct TableArgs {
    #[command(subcommand)]
    pub command: TableCommands,
}

#[derive(Subcommand)]
pub enum TableCommands {
    /// List entries in the code table
    List {
        /// Path to the code table file
        #[arg(long, default_value = DEFAULT_TABLE_PATH)]
        table: PathBuf,

        /// Only list codes starting with this prefix (e.g., "E11")
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Show one entry by code
    Show {
        /// Diagnosis code (e.g., "N17.9")
        #[arg(required = true)]
        code: String,

        /// Path to the code table file
        #[arg(long, default_value = DEFAULT_TABLE_PATH)]
        table: PathBuf,
    },

    /// Export the code table
    Export {
        /// Path to the code table file
        #[arg(long, default_value = DEFAULT_TABLE_PATH)]
        table: PathBuf,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Execute the table subcommand
///
/// # Errors
///
/// Returns an error if the table cannot be loaded, the requested code
/// does not exist, or the export cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: TableArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        TableCommands::List { table, prefix } => {
            let table = load(&table, verbose)?;
            list_entries(&table, prefix.as_deref(), format)?;
        }
        TableCommands::Show { code, table } => {
            let table = load(&table, verbose)?;
            let entry = table
                .get(&CodeId::new(code.clone()))
                .ok_or_else(|| anyhow::anyhow!("code '{code}' not found in table"))?;

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(entry)?);
                }
                OutputFormat::Text | OutputFormat::Tsv => {
                    println!("Code: {}", entry.code);
                    println!("Description: {}", entry.description);
                    if let Some(short) = &entry.short_description {
                        println!("Short: {short}");
                    }
                }
            }
        }
        TableCommands::Export { table, output } => {
            let table = load(&table, verbose)?;
            let rendered = match format {
                OutputFormat::Json => {
                    let mut json = table.to_json()?;
                    json.push('\n');
                    json
                }
                OutputFormat::Text | OutputFormat::Tsv => table.to_csv_string(),
            };
            match output {
                Some(path) => std::fs::write(&path, rendered)
                    .with_context(|| format!("cannot write export to {}", path.display()))?,
                None => print!("{rendered}"),
            }
        }
    }

    Ok(())
}

fn load(path: &PathBuf, verbose: bool) -> anyhow::Result<CodeTable> {
    let table = CodeTable::load_from_file(path)
        .with_context(|| format!("cannot load code table from {}", path.display()))?;
    if verbose {
        eprintln!("Loaded code table with {} entries", table.len());
    }
    Ok(table)
}

fn list_entries(
    table: &CodeTable,
    prefix: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let entries: Vec<_> = table
        .entries()
        .iter()
        .filter(|e| prefix.map_or(true, |p| e.code.0.starts_with(p)))
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            for entry in &entries {
                println!("{}\t{}", entry.code, entry.description);
            }
            println!("\n{} entries", entries.len());
        }
        OutputFormat::Tsv => {
            println!("code\tshort_description\tdescription");
            for entry in &entries {
                println!(
                    "{}\t{}\t{}",
                    entry.code,
                    entry.short_description.as_deref().unwrap_or(""),
                    entry.description,
                );
            }
        }
    }

    Ok(())
}
