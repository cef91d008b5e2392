use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};

use crate::catalog::store::Catalog;
use crate::cli::OutputFormat;
use crate::core::types::SynonymPair;
use crate::parsing::{tsv, values};

#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommands,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// Build a catalog from a list of reference values
    Build {
        /// Reference values: one per line, or a CSV/TSV table with --column
        #[arg(long, required = true)]
        values: PathBuf,

        /// Column holding the values when --values is a table
        #[arg(long)]
        column: Option<String>,

        /// Synonym table (from, to), CSV or TSV
        #[arg(long)]
        synonyms: Option<PathBuf>,

        /// Output catalog file
        #[arg(short, long, required = true)]
        output: PathBuf,
    },

    /// Show the entries of a built catalog
    Show {
        /// Catalog file
        #[arg(required = true)]
        catalog: PathBuf,
    },
}

pub fn run(args: CatalogArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        CatalogCommands::Build {
            values,
            column,
            synonyms,
            output,
        } => run_build(
            &values,
            column.as_deref(),
            synonyms.as_deref(),
            &output,
            format,
            verbose,
        ),
        CatalogCommands::Show { catalog } => run_show(&catalog, format, verbose),
    }
}

fn run_build(
    values_path: &Path,
    column: Option<&str>,
    synonyms_path: Option<&Path>,
    output: &Path,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let reference_values = values::parse_values_file(values_path, column)
        .with_context(|| format!("Failed to read reference values from {}", values_path.display()))?;

    let synonyms: Vec<SynonymPair> = match synonyms_path {
        Some(path) => tsv::parse_synonyms_file(path)
            .with_context(|| format!("Failed to read synonyms from {}", path.display()))?,
        None => Vec::new(),
    };

    if verbose {
        eprintln!(
            "Read {} reference values and {} synonyms",
            reference_values.len(),
            synonyms.len()
        );
    }

    let catalog = Catalog::build(reference_values, synonyms)?;
    catalog
        .save(output)
        .with_context(|| format!("Failed to write catalog to {}", output.display()))?;

    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "output": output.display().to_string(),
                "entries": catalog.len(),
                "tokens": catalog.vocabulary().len(),
                "synonyms": catalog.synonyms().len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Tsv => {
            println!("output\tentries\ttokens\tsynonyms");
            println!(
                "{}\t{}\t{}\t{}",
                output.display(),
                catalog.len(),
                catalog.vocabulary().len(),
                catalog.synonyms().len()
            );
        }
        OutputFormat::Text => {
            println!(
                "Built catalog with {} entries ({} distinct words, {} synonyms)",
                catalog.len(),
                catalog.vocabulary().len(),
                catalog.synonyms().len()
            );
            println!("Written to {}", output.display());
        }
    }

    Ok(())
}

fn run_show(path: &Path, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let catalog = Catalog::load(path)
        .with_context(|| format!("Failed to load catalog from {}", path.display()))?;

    match format {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = catalog
                .entries()
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "value": e.value,
                        "word_count": e.word_count,
                        "weight_sum": e.weight_sum,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "entries": entries,
                "synonyms": catalog.synonyms(),
                "tokens": catalog.vocabulary().len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("value\tword_count\tweight_sum");
            for e in catalog.entries() {
                println!("{}\t{}\t{}", e.value, e.word_count, e.weight_sum);
            }
        }
        OutputFormat::Text => {
            let value_width = catalog
                .values()
                .map(|v| v.len().min(50))
                .max()
                .unwrap_or(5)
                .max(5);

            println!("Catalog ({} entries)\n", catalog.len());
            println!(
                "{:<value_w$} {:>6} {:>8}",
                "Value",
                "Words",
                "Weight",
                value_w = value_width
            );
            println!("{}", "-".repeat(value_width + 16));
            for e in catalog.entries() {
                println!(
                    "{:<value_w$} {:>6} {:>8}",
                    truncate(&e.value, value_width),
                    e.word_count,
                    e.weight_sum,
                    value_w = value_width
                );
            }

            if !catalog.synonyms().is_empty() {
                println!("\nSynonyms ({}):", catalog.synonyms().len());
                for pair in catalog.synonyms() {
                    println!("  {} -> {}", pair.from, pair.to);
                }
            }

            if verbose {
                let tokens: Vec<&str> = catalog.vocabulary().tokens().collect();
                println!("\nVocabulary ({} words): {}", tokens.len(), tokens.join(" "));
            }
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Acme", 10), "Acme");
        assert_eq!(truncate("Acme Capital Funding", 10), "Acme Ca...");
    }
}
