//! Scoring and flag-guided extraction.
//!
//! - [`scoring`]: the k²-weighted overlap score between two signatures
//! - [`stream`]: the marked token walk and candidate assembly used by the locator
//! - [`Locator`]: finds the catalog entity mentioned near flag strings in text
//!
//! ## Extraction
//!
//! The locator rewrites the normalized text so every flag carries a marker
//! token, walks the tokens into spans of known words separated by distances,
//! then scores each span found next to a marker against the catalog:
//!
//! ```text
//! ranking = best entry score / (distance + 1) × words in the catalog value
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use entity_locator::{Catalog, Locator, LocatorConfig, SynonymPair};
//!
//! let catalog = Catalog::build(["Acme Capital Funding", "Beta Bank plc"], Vec::<SynonymPair>::new())
//!     .unwrap();
//! let config = LocatorConfig {
//!     after: vec!["issued by".to_string()],
//!     ..LocatorConfig::default()
//! };
//! let locator = Locator::new(Arc::new(catalog), &config).unwrap();
//!
//! let found = locator.extract("Notes issued by Acme Capital Funding today");
//! assert_eq!(found.as_deref(), Some("Acme Capital Funding"));
//! ```

pub mod locator;
pub mod scoring;
pub mod stream;

pub use locator::{FlagKind, FlagSet, Locator, LocatorConfig, LocatorError};
