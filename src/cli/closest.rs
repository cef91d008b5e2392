//! Match command - closest catalog entry for whole strings.
//!
//! Each text is compared as a whole against every catalog entry, trying every
//! synonym reading. No flags are involved.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::catalog::store::Catalog;
use crate::cli::OutputFormat;
use crate::core::types::MatchResult;

/// Arguments for the match command
#[derive(Args)]
pub struct MatchArgs {
    /// Catalog file built with `catalog build`
    #[arg(long, required = true)]
    pub catalog: PathBuf,

    /// Texts to match
    #[arg(required_unless_present = "input")]
    pub texts: Vec<String>,

    /// File with one text per line, matched after the positional texts
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Execute the match command
///
/// # Errors
///
/// Returns an error if the catalog or the input file cannot be read.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: MatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = Catalog::load(&args.catalog)
        .with_context(|| format!("Failed to load catalog from {}", args.catalog.display()))?;

    let mut texts = args.texts.clone();
    if let Some(path) = &args.input {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        texts.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    if verbose {
        eprintln!(
            "Matching {} texts against {} catalog entries",
            texts.len(),
            catalog.len()
        );
    }

    let results: Vec<MatchResult> = texts.iter().map(|t| catalog.closest_match(t)).collect();

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = texts
                .iter()
                .zip(&results)
                .map(|(text, m)| {
                    serde_json::json!({
                        "text": text,
                        "value": m.value,
                        "score": m.score,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("text\tvalue\tscore");
            for (text, m) in texts.iter().zip(&results) {
                println!("{}\t{}\t{:.6}", text, m.value, m.score);
            }
        }
        OutputFormat::Text => {
            for (text, m) in texts.iter().zip(&results) {
                if m.score > 0.0 {
                    println!("{text}\n  -> {} (score {:.4})", m.value, m.score);
                } else {
                    println!("{text}\n  -> no match");
                }
            }
        }
    }

    Ok(())
}
