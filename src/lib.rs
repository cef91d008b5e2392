//! # entity-locator
//!
//! A library for locating a known entity name (an issuer, a guarantor, ...)
//! inside free-form document text.
//!
//! Documents rarely spell an entity exactly the way a reference list does:
//! stop words come and go, abbreviations replace words, and the name sits
//! somewhere inside a long paragraph. `entity-locator` compares word sequences
//! against a closed catalog of reference names, order-aware and
//! synonym-aware, and uses nearby flag strings ("issued by", "as issuer") to
//! decide which part of a document names the entity.
//!
//! ## Features
//!
//! - **Sub-span signatures**: every contiguous run of catalog words counts,
//!   longer shared runs weigh quadratically more
//! - **Synonyms**: word-level substitutions tried as alternative readings
//! - **Flag-guided extraction**: spans right before or after a flag, or
//!   excluded right after a remove flag
//! - **Global replacements**: text-wide substitutions enabled by a trigger phrase
//! - **Persistence**: versioned binary catalogs and locators
//!
//! No spelling correction is attempted: a misspelled word is simply unknown.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use entity_locator::{Catalog, Locator, LocatorConfig, SynonymPair};
//!
//! let catalog = Catalog::build(
//!     ["Acme Capital Funding", "Beta Bank plc"],
//!     [SynonymPair::new("capital", "cap")],
//! )
//! .unwrap();
//!
//! // Closest catalog entry for a whole string
//! let best = catalog.closest_match("acme cap funding");
//! println!("{}: {:.3}", best.value, best.score);
//!
//! // Entity next to a flag inside a document
//! let config = LocatorConfig {
//!     after: vec!["issued by".to_string()],
//!     before: vec!["as issuer".to_string()],
//!     ..LocatorConfig::default()
//! };
//! let locator = Locator::new(Arc::new(catalog), &config).unwrap();
//! let issuer = locator.extract("The notes are issued by Beta Bank plc, London branch.");
//! assert_eq!(issuer.as_deref(), Some("Beta Bank plc"));
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Normalization, vocabulary and signatures
//! - [`catalog`]: Reference catalog and closest-match queries
//! - [`matching`]: Scoring and the flag-guided locator
//! - [`parsing`]: Loaders for reference lists, synonyms, labels and documents
//! - [`evaluation`]: Accuracy of predictions against a ground truth
//! - [`persistence`]: Versioned binary artifacts
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod evaluation;
pub mod matching;
pub mod parsing;
pub mod persistence;

// Re-export commonly used types for convenience
pub use catalog::store::{Catalog, CatalogError};
pub use core::types::*;
pub use matching::locator::{Locator, LocatorConfig, LocatorError};
