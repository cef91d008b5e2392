//! Score command - accuracy of predicted labels against a ground truth.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::OutputFormat;
use crate::evaluation::AccuracyReport;
use crate::parsing::labels;

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// Predicted labels (id,value), e.g. written by `extract -o`
    #[arg(long, required = true)]
    pub predictions: PathBuf,

    /// Ground-truth labels (id,value); `|` separates multiple entities
    #[arg(long, required = true)]
    pub truth: PathBuf,
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if either label file cannot be read.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let predictions = labels::parse_labels_file(&args.predictions).with_context(|| {
        format!("Failed to read predictions from {}", args.predictions.display())
    })?;
    let truth = labels::parse_labels_file(&args.truth)
        .with_context(|| format!("Failed to read truth from {}", args.truth.display()))?;

    let report = AccuracyReport::compare(&predictions, &truth);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "total": report.total,
                "compared": report.compared(),
                "missing": report.missing,
                "errors": report.errors(),
                "error_percent": report.error_percent(),
                "mismatches": report.mismatches,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("total\tcompared\tmissing\terrors\terror_percent");
            println!(
                "{}\t{}\t{}\t{}\t{:.2}",
                report.total,
                report.compared(),
                report.missing,
                report.errors(),
                report.error_percent()
            );
        }
        OutputFormat::Text => {
            if verbose {
                for m in &report.mismatches {
                    println!("{} | {} | {}", m.id, m.predicted, m.expected);
                }
                if !report.mismatches.is_empty() {
                    println!();
                }
            }
            println!("Compared: {}", report.compared());
            println!("Missing:  {}", report.missing);
            println!("Errors:   {}", report.errors());
            println!("Error:    {:.2}% of {}", report.error_percent(), report.total);
        }
    }

    Ok(())
}
