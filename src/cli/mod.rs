//! Command-line interface for entity-locator.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **catalog**: Build a catalog from a reference list, or show a built one
//! - **locator**: Build a locator from a catalog and a JSON flag configuration
//! - **match**: Find the closest catalog entry for whole strings
//! - **extract**: Locate the entity in every document of a folder
//! - **score**: Compare predicted labels against a ground truth
//!
//! ## Usage
//!
//! ```text
//! # Build a catalog from a list of issuer names and synonyms
//! entity-locator catalog build --values issuers.txt --synonyms synonyms.tsv -o issuers.catalog
//!
//! # Closest match for a string
//! entity-locator match --catalog issuers.catalog "acme cap funding"
//!
//! # Build a locator and run it over a folder of prospectuses
//! entity-locator locator build --catalog issuers.catalog --config flags.json -o issuers.locator
//! entity-locator extract --locator issuers.locator prospectuses/ -o predictions.csv
//!
//! # Accuracy against hand-made labels
//! entity-locator score --predictions predictions.csv --truth labels.csv
//! ```

use clap::{Parser, Subcommand};

pub mod catalog;
pub mod closest;
pub mod extract;
pub mod locator;
pub mod score;

#[derive(Parser)]
#[command(name = "entity-locator")]
#[command(version)]
#[command(about = "Locate known entity names inside free-form documents")]
#[command(
    long_about = "entity-locator finds which entry of a closed catalog of names (issuers, guarantors, ...) a document mentions.\n\nIt compares word sequences against the catalog, order-aware and synonym-aware, and uses flag strings such as \"issued by\" to decide where in the document the entity is named.\n\nSpelling mistakes are not corrected."
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
    /// Build or inspect a reference catalog
    Catalog(catalog::CatalogArgs),

    /// Build a flag-guided locator
    Locator(locator::LocatorArgs),

    /// Find the closest catalog entry for each text
    Match(closest::MatchArgs),

    /// Locate the entity in every document of a folder
    Extract(extract::ExtractArgs),

    /// Compare predicted labels against a ground truth
    Score(score::ScoreArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Dispatch a parsed command line
///
/// # Errors
///
/// Returns the error of the command that ran.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Catalog(args) => catalog::run(args, cli.format, cli.verbose),
        Commands::Locator(args) => locator::run(args, cli.format, cli.verbose),
        Commands::Match(args) => closest::run(args, cli.format, cli.verbose),
        Commands::Extract(args) => extract::run(args, cli.format, cli.verbose),
        Commands::Score(args) => score::run(args, cli.format, cli.verbose),
    }
}
