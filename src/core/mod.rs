//! Core text representation shared by the catalog and the locator.
//!
//! - [`normalize`](normalize::normalize): the string cleanup applied to every input
//! - [`Vocabulary`](vocabulary::Vocabulary): token → index table built from the catalog
//! - [`Signature`](signature::Signature): length-bucketed contiguous sub-spans of a sequence
//! - [`SignatureEncoder`](signature::SignatureEncoder): text → signature over a vocabulary
//! - [`SynonymPair`], [`GlobalReplacement`], [`MatchResult`]: shared value types
//!
//! ## Unknown tokens
//!
//! Tokens missing from the vocabulary encode as [`UNKNOWN`] (−1). Adjacent
//! unknowns collapse into one before a signature is built, so
//! `"acme qq rr funding"` and `"acme qq funding"` produce the same signature.

pub mod normalize;
pub mod signature;
pub mod types;
pub mod vocabulary;

pub use types::{GlobalReplacement, MatchResult, Span, SynonymPair, TokenIndex, UNKNOWN};
