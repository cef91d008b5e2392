//! Extract command - locate the entity in every document of a folder.
//!
//! Documents are processed in parallel; results are reported sorted by
//! document id.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::core::types::MatchResult;
use crate::matching::locator::Locator;
use crate::parsing::documents;
use crate::parsing::labels::{self, Labels};

/// Arguments for the extract command
#[derive(Args)]
pub struct ExtractArgs {
    /// Locator file built with `locator build`
    #[arg(long, required = true)]
    pub locator: PathBuf,

    /// Folder of documents (plain text or .gz)
    #[arg(required = true)]
    pub documents: PathBuf,

    /// Write the found labels to this CSV file (id,value)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the extract command
///
/// # Errors
///
/// Returns an error if the locator, the documents or the output file cannot
/// be read or written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ExtractArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let locator = Locator::load(&args.locator)
        .with_context(|| format!("Failed to load locator from {}", args.locator.display()))?;

    let docs = documents::read_documents(&args.documents).with_context(|| {
        format!("Failed to read documents from {}", args.documents.display())
    })?;

    if verbose {
        eprintln!(
            "Extracting from {} documents with a {}-entry catalog",
            docs.len(),
            locator.catalog().len()
        );
    }

    let texts: Vec<&str> = docs.iter().map(|d| d.text.as_str()).collect();
    let results = locator.extract_batch(&texts);

    let found: Labels = docs
        .iter()
        .zip(&results)
        .filter_map(|(doc, result)| result.as_ref().map(|m| (doc.id.clone(), m.value.clone())))
        .collect();

    if verbose {
        eprintln!("Found an entity in {} of {} documents", found.len(), docs.len());
    }

    if let Some(path) = &args.output {
        labels::write_labels_file(path, &found)
            .with_context(|| format!("Failed to write labels to {}", path.display()))?;
    }

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = docs
                .iter()
                .zip(&results)
                .map(|(doc, result)| {
                    serde_json::json!({
                        "id": doc.id,
                        "value": result.as_ref().map(|m| &m.value),
                        "score": result.as_ref().map(|m| m.score),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("id\tvalue\tscore");
            for (doc, result) in docs.iter().zip(&results) {
                match result {
                    Some(MatchResult { value, score }) => {
                        println!("{}\t{}\t{:.6}", doc.id, value, score);
                    }
                    None => println!("{}\t\t", doc.id),
                }
            }
        }
        OutputFormat::Text => {
            for (doc, result) in docs.iter().zip(&results) {
                match result {
                    Some(m) => println!("{}: {} (score {:.4})", doc.id, m.value, m.score),
                    None => println!("{}: not found", doc.id),
                }
            }
            println!(
                "\nFound {} of {} documents",
                found.len(),
                docs.len()
            );
        }
    }

    Ok(())
}
