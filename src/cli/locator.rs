use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Subcommand};

use crate::catalog::store::Catalog;
use crate::cli::OutputFormat;
use crate::matching::locator::{Locator, LocatorConfig};
use crate::parsing::tsv;

#[derive(Args)]
pub struct LocatorArgs {
    #[command(subcommand)]
    pub command: LocatorCommands,
}

#[derive(Subcommand)]
pub enum LocatorCommands {
    /// Build a locator from a catalog and a flag configuration
    Build {
        /// Catalog file built with `catalog build`
        #[arg(long, required = true)]
        catalog: PathBuf,

        /// JSON configuration: seed, before, after, remove, replacements
        #[arg(long, required = true)]
        config: PathBuf,

        /// Extra global replacements (trigger, from, to), CSV or TSV
        #[arg(long)]
        replacements: Option<PathBuf>,

        /// Output locator file
        #[arg(short, long, required = true)]
        output: PathBuf,
    },

    /// Show the normalized flags of a built locator
    Show {
        /// Locator file
        #[arg(required = true)]
        locator: PathBuf,
    },
}

pub fn run(args: LocatorArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    match args.command {
        LocatorCommands::Build {
            catalog,
            config,
            replacements,
            output,
        } => run_build(
            &catalog,
            &config,
            replacements.as_deref(),
            &output,
            format,
            verbose,
        ),
        LocatorCommands::Show { locator } => run_show(&locator, format),
    }
}

/// Read a JSON locator configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid configuration.
pub fn load_config(path: &Path) -> anyhow::Result<LocatorConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read locator config {}", path.display()))?;
    let config: LocatorConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid locator config {}", path.display()))?;
    Ok(config)
}

fn run_build(
    catalog_path: &Path,
    config_path: &Path,
    replacements_path: Option<&Path>,
    output: &Path,
    format: OutputFormat,
    verbose: bool,
) -> anyhow::Result<()> {
    let catalog = Catalog::load(catalog_path)
        .with_context(|| format!("Failed to load catalog from {}", catalog_path.display()))?;

    let mut config = load_config(config_path)?;
    if let Some(path) = replacements_path {
        let extra = tsv::parse_replacements_file(path)
            .with_context(|| format!("Failed to read replacements from {}", path.display()))?;
        config.replacements.extend(extra);
    }

    if verbose {
        eprintln!(
            "Config: {} before, {} after, {} remove flags, {} replacements",
            config.before.len(),
            config.after.len(),
            config.remove.len(),
            config.replacements.len()
        );
    }

    let locator = Locator::new(Arc::new(catalog), &config)?;
    locator
        .save(output)
        .with_context(|| format!("Failed to write locator to {}", output.display()))?;

    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "output": output.display().to_string(),
                "entries": locator.catalog().len(),
                "flags": locator.flags(),
                "replacements": locator.replacements().len(),
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Tsv => {
            println!("output\tentries\tflags\treplacements");
            println!(
                "{}\t{}\t{}\t{}",
                output.display(),
                locator.catalog().len(),
                flag_count(&locator),
                locator.replacements().len()
            );
        }
        OutputFormat::Text => {
            println!(
                "Built locator over {} entries with {} flags and {} replacements",
                locator.catalog().len(),
                flag_count(&locator),
                locator.replacements().len()
            );
            println!("Written to {}", output.display());
        }
    }

    Ok(())
}

fn run_show(path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let locator = Locator::load(path)
        .with_context(|| format!("Failed to load locator from {}", path.display()))?;
    let flags = locator.flags();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "seed": locator.seed(),
                "flags": flags,
                "replacements": locator.replacements(),
                "entries": locator.catalog().len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            println!("kind\tflag");
            for (kind, list) in [
                ("before", &flags.before),
                ("after", &flags.after),
                ("remove", &flags.remove),
            ] {
                for flag in list {
                    println!("{kind}\t{flag}");
                }
            }
        }
        OutputFormat::Text => {
            println!("Locator over {} catalog entries", locator.catalog().len());
            if let Some(seed) = locator.seed() {
                println!("Seed: {seed}");
            }
            println!("Before flags: {}", flags.before.join(" | "));
            println!("After flags:  {}", flags.after.join(" | "));
            println!("Remove flags: {}", flags.remove.join(" | "));
            for r in locator.replacements() {
                println!("Replace {:?} with {:?} when {:?} is present", r.from, r.to, r.trigger);
            }
        }
    }

    Ok(())
}

fn flag_count(locator: &Locator) -> usize {
    let flags = locator.flags();
    flags.before.len() + flags.after.len() + flags.remove.len()
}
