//! Reference catalog of known entity names.
//!
//! A [`Catalog`](store::Catalog) is built once from an ordered list of
//! reference values and an ordered list of synonym pairs. It owns the shared
//! vocabulary, one precomputed signature per value and the normalized synonym
//! table, and answers closest-match queries.
//!
//! ## Example
//!
//! ```rust,no_run
//! use entity_locator::{Catalog, SynonymPair};
//! use std::path::Path;
//!
//! let catalog = Catalog::build(
//!     ["Acme Capital Funding", "Beta Bank plc"],
//!     [SynonymPair::new("capital", "cap")],
//! )
//! .unwrap();
//!
//! let best = catalog.closest_match("acme cap funding");
//! println!("{} ({:.3})", best.value, best.score);
//!
//! // Persist for later runs
//! catalog.save(Path::new("issuers.catalog")).unwrap();
//! ```

pub mod store;

pub use store::{Catalog, CatalogError, ReferenceEntry};
