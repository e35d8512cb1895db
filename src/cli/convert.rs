use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::annotate::{annotate_results, Evidence, Problem};
use crate::cli::{OutputFormat, DEFAULT_TABLE_PATH};
use crate::core::types::Modifier;
use crate::matching::engine::{MatchingConfig, MatchingEngine, ScoringWeights, DEFAULT_MIN_SCORE};
use crate::parsing::note::{read_note, segment_note};
use crate::table::store::CodeTable;

#[derive(Args)]
pub struct ConvertArgs {
    /// Note file to convert. Omit or use '-' to read standard input.
    pub note: Option<PathBuf>,

    /// Path to the code table file (CSV, or TSV by extension)
    #[arg(long, default_value = DEFAULT_TABLE_PATH)]
    pub table: PathBuf,

    /// Minimum similarity score for accepting a match (0.0 - 1.0)
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    pub threshold: f64,

    /// List candidates that matched no code instead of omitting them
    #[arg(long)]
    pub include_unmatched: bool,

    /// Write the report to a file instead of standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the convert subcommand: the full Load -> Segment -> Match
/// -> Annotate -> Format pipeline.
///
/// # Errors
///
/// Returns an error if the code table or the note cannot be read, or
/// if the report cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ConvertArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = CodeTable::load_from_file(&args.table)
        .with_context(|| format!("cannot load code table from {}", args.table.display()))?;

    if verbose {
        eprintln!("Loaded code table with {} entries", table.len());
    }

    let text = read_note(args.note.as_deref()).with_context(|| match &args.note {
        Some(p) => format!("cannot read note from {}", p.display()),
        None => "cannot read note from standard input".to_string(),
    })?;

    let mut note = segment_note(&text);
    if let Some(path) = &args.note {
        note = note.with_source(path.display().to_string());
    }
    if verbose {
        eprintln!("Segmented note into {} candidate phrases", note.len());
    }

    let config = MatchingConfig {
        min_score: args.threshold,
        scoring_weights: ScoringWeights::default(),
    };
    let engine = MatchingEngine::with_config(&table, config);
    let results = engine.match_note(&note);
    let problems = annotate_results(results);

    let rendered = match format {
        OutputFormat::Text => render_text_report(&problems, args.include_unmatched),
        OutputFormat::Json => render_json_report(&problems)?,
        OutputFormat::Tsv => render_tsv_report(&problems, args.include_unmatched),
    };

    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("cannot write report to {}", path.display()))?,
        None => print!("{rendered}"),
    }

    Ok(())
}

/// Render the numbered problem list.
///
/// Unmatched candidates are omitted unless `include_unmatched` is set,
/// in which case they carry an explicit "no code found" marker. A note
/// with no matches renders as the header alone.
#[must_use]
pub fn render_text_report(problems: &[Problem], include_unmatched: bool) -> String {
    let mut out = String::from("# CMS-Ready Problem List\n");
    let mut n = 0;

    for p in problems {
        match &p.result.entry {
            Some(entry) => {
                n += 1;
                out.push_str(&format!(
                    "{n}. {} — {}.  {} ({})\n",
                    friendly_description(p),
                    p.annotation.evidence,
                    entry.description,
                    entry.code,
                ));
            }
            None if include_unmatched => {
                n += 1;
                out.push_str(&format!(
                    "{n}. {} — no code found\n",
                    p.result.candidate.text
                ));
            }
            None => {}
        }
    }

    out
}

/// Candidate text plus the detected modifier, when one was detected.
fn friendly_description(p: &Problem) -> String {
    match p.annotation.modifier {
        Modifier::Unspecified => p.result.candidate.text.clone(),
        modifier => format!("{}, {}", p.result.candidate.text, modifier),
    }
}

fn render_json_report(problems: &[Problem]) -> anyhow::Result<String> {
    let output: Vec<serde_json::Value> = problems
        .iter()
        .map(|p| {
            serde_json::json!({
                "candidate": {
                    "text": p.result.candidate.text,
                    "offset": p.result.candidate.offset,
                    "index": p.result.candidate.index,
                },
                "matched": p.result.is_matched(),
                "code": p.result.entry.as_ref().map(|e| e.code.0.clone()),
                "description": p.result.entry.as_ref().map(|e| e.description.clone()),
                "short_description": p.result.entry.as_ref().and_then(|e| e.short_description.clone()),
                "score": {
                    "composite": p.result.score.composite,
                    "token_coverage": p.result.score.token_coverage,
                    "token_jaccard": p.result.score.token_jaccard,
                    "edit_ratio": p.result.score.edit_ratio,
                    "confidence": format!("{:?}", p.result.score.confidence),
                },
                "modifier": p.annotation.modifier.to_string(),
                "evidence": match &p.annotation.evidence {
                    Evidence::Supported(s) => serde_json::json!(s),
                    Evidence::NoSupportingData => serde_json::Value::Null,
                },
                "no_supporting_data": p.annotation.evidence == Evidence::NoSupportingData,
            })
        })
        .collect();

    let mut rendered = serde_json::to_string_pretty(&output)?;
    rendered.push('\n');
    Ok(rendered)
}

fn render_tsv_report(problems: &[Problem], include_unmatched: bool) -> String {
    let mut out =
        String::from("rank\tcandidate\tcode\tdescription\tscore\tconfidence\tmodifier\tevidence\n");
    let mut n = 0;

    for p in problems {
        let (code, description) = match &p.result.entry {
            Some(entry) => (entry.code.0.as_str(), entry.description.as_str()),
            None if include_unmatched => ("", ""),
            None => continue,
        };
        n += 1;
        out.push_str(&format!(
            "{n}\t{}\t{code}\t{description}\t{:.4}\t{:?}\t{}\t{}\n",
            p.result.candidate.text,
            p.result.score.composite,
            p.result.score.confidence,
            p.annotation.modifier,
            p.annotation.evidence,
        ));
    }

    out
}
