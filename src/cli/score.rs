//! Score command - rank the code table against a single phrase.
//!
//! Useful for understanding why a note phrase did or did not match:
//! shows the top entries with the full component score breakdown.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::{OutputFormat, DEFAULT_TABLE_PATH};
use crate::core::candidate::Candidate;
use crate::matching::engine::{
    MatchingConfig, MatchingEngine, ScoredEntry, ScoringWeights, DEFAULT_MIN_SCORE,
};
use crate::parsing::abbrev::expand_abbreviations;
use crate::table::store::CodeTable;
use crate::utils::text::normalize_whitespace;

#[derive(Args)]
pub struct ScoreArgs {
    /// Phrase to score against the code table
    #[arg(required = true)]
    pub phrase: String,

    /// Path to the code table file (CSV, or TSV by extension)
    #[arg(long, default_value = DEFAULT_TABLE_PATH)]
    pub table: PathBuf,

    /// Number of entries to show
    #[arg(short = 'n', long, default_value = "5")]
    pub max_matches: usize,

    /// Acceptance threshold to annotate against (0.0 - 1.0)
    #[arg(long, default_value_t = DEFAULT_MIN_SCORE)]
    pub threshold: f64,
}

/// Execute the score subcommand
///
/// # Errors
///
/// Returns an error if the code table cannot be loaded.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let table = CodeTable::load_from_file(&args.table)
        .with_context(|| format!("cannot load code table from {}", args.table.display()))?;

    if verbose {
        eprintln!("Loaded code table with {} entries", table.len());
    }

    let config = MatchingConfig {
        min_score: args.threshold,
        scoring_weights: ScoringWeights::default(),
    };
    let engine = MatchingEngine::with_config(&table, config);

    // Prepare the phrase the way the convert pipeline prepares a
    // candidate: abbreviations expanded, whitespace normalized
    let phrase = normalize_whitespace(&expand_abbreviations(&args.phrase));
    let candidate = Candidate::new(phrase, 0, 0);
    let ranked = engine.top_matches(&candidate, args.max_matches);

    match format {
        OutputFormat::Text => print_text_results(&args.phrase, &ranked, args.threshold),
        OutputFormat::Json => print_json_results(&ranked)?,
        OutputFormat::Tsv => print_tsv_results(&ranked),
    }

    Ok(())
}

fn print_text_results(phrase: &str, ranked: &[ScoredEntry], threshold: f64) {
    println!("Scoring \"{phrase}\" (threshold {threshold:.2})");

    if ranked.is_empty() {
        println!("  (code table is empty)");
        return;
    }

    for (i, scored) in ranked.iter().enumerate() {
        let accepted = if scored.score.composite >= threshold {
            ""
        } else {
            "  [below threshold]"
        };
        println!(
            "\n#{} {} ({}){accepted}",
            i + 1,
            scored.entry.description,
            scored.entry.code,
        );
        println!(
            "   Score: {:.1}% = {:.1}% coverage, {:.1}% jaccard, {:.1}% edit ({:?})",
            scored.score.composite * 100.0,
            scored.score.token_coverage * 100.0,
            scored.score.token_jaccard * 100.0,
            scored.score.edit_ratio * 100.0,
            scored.score.confidence,
        );
    }
}

fn print_json_results(ranked: &[ScoredEntry]) -> anyhow::Result<()> {
    let output: Vec<serde_json::Value> = ranked
        .iter()
        .map(|s| {
            serde_json::json!({
                "code": s.entry.code.0,
                "description": s.entry.description,
                "score": {
                    "composite": s.score.composite,
                    "token_coverage": s.score.token_coverage,
                    "token_jaccard": s.score.token_jaccard,
                    "edit_ratio": s.score.edit_ratio,
                    "confidence": format!("{:?}", s.score.confidence),
                },
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_results(ranked: &[ScoredEntry]) {
    println!("rank\tcode\tdescription\tscore\tcoverage\tjaccard\tedit\tconfidence");
    for (i, s) in ranked.iter().enumerate() {
        println!(
            "{}\t{}\t{}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:?}",
            i + 1,
            s.entry.code,
            s.entry.description,
            s.score.composite,
            s.score.token_coverage,
            s.score.token_jaccard,
            s.score.edit_ratio,
            s.score.confidence,
        );
    }
}
