use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::normalize::{normalize, pad, unpad};
use crate::core::signature::{Signature, SignatureEncoder};
use crate::core::types::{count_to_f64, MatchResult, SynonymPair};
use crate::core::vocabulary::Vocabulary;
use crate::matching::scoring::{best_index, entry_score, weight_sum};
use crate::persistence::{self, PersistError};

/// Artifact kind written by [`Catalog::save`]
pub const CATALOG_FORMAT: &str = "catalog";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog has no reference values")]
    Empty,

    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// One reference name with its precomputed signature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// The literal catalog string, as supplied
    pub value: String,

    pub signature: Signature,

    /// Non-empty tokens of the normalized value
    pub word_count: f64,

    /// Σ k² × |spans of length k|, the normalizer for match scores
    pub weight_sum: f64,
}

/// The reference catalog: vocabulary, entry signatures and synonyms.
///
/// Built once, immutable afterwards and safe to share across threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    vocabulary: Vocabulary,

    /// Entries in insertion order, duplicates collapsed to their first occurrence
    entries: Vec<ReferenceEntry>,

    /// Normalized synonym pairs, duplicates collapsed
    synonyms: Vec<SynonymPair>,
}

impl Catalog {
    /// Build a catalog from reference values and synonym pairs
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` if `values` yields nothing.
    pub fn build<I, S, P>(values: I, synonyms: P) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        P: IntoIterator,
        P::Item: Into<SynonymPair>,
    {
        let mut seen = HashSet::new();
        let values: Vec<String> = values
            .into_iter()
            .map(Into::into)
            .filter(|v| seen.insert(v.clone()))
            .collect();

        if values.is_empty() {
            return Err(CatalogError::Empty);
        }

        let vocabulary = Vocabulary::build(&values);

        let entries = {
            let encoder = SignatureEncoder::new(&vocabulary);
            values
                .into_iter()
                .map(|value| {
                    let encoded = encoder.encode(&value);
                    let weight_sum = weight_sum(&encoded.signature);
                    if weight_sum <= 0.0 {
                        warn!("Reference value {:?} has no indexable words", value);
                    }
                    ReferenceEntry {
                        value,
                        signature: encoded.signature,
                        word_count: encoded.word_count,
                        weight_sum,
                    }
                })
                .collect::<Vec<_>>()
        };

        let mut seen_pairs = HashSet::new();
        let mut pairs = Vec::new();
        for pair in synonyms {
            let pair: SynonymPair = pair.into();
            let pair = SynonymPair::new(normalize(&pair.from), normalize(&pair.to));
            if pair.from.is_empty() {
                warn!("Ignoring synonym with an empty source phrase: {:?}", pair);
                continue;
            }
            if seen_pairs.insert(pair.clone()) {
                pairs.push(pair);
            }
        }

        info!(
            "Built catalog: {} entries, {} tokens, {} synonyms",
            entries.len(),
            vocabulary.len(),
            pairs.len()
        );

        Ok(Self {
            vocabulary,
            entries,
            synonyms: pairs,
        })
    }

    /// Score a test signature against every entry, in catalog order.
    ///
    /// `test_word_count` defaults to the longest span of `test`. A zero word
    /// count scores 0 everywhere.
    pub fn score_against_all(&self, test: &Signature, test_word_count: Option<f64>) -> Vec<f64> {
        let test_word_count = test_word_count.unwrap_or_else(|| count_to_f64(test.max_span_len()));

        self.entries
            .iter()
            .map(|entry| {
                entry_score(
                    &entry.signature,
                    entry.weight_sum,
                    entry.word_count,
                    test,
                    test_word_count,
                )
            })
            .collect()
    }

    /// Normalized `words` plus one variant per applicable synonym
    pub fn alternatives(&self, words: &str) -> BTreeSet<String> {
        self.expand_synonyms(&normalize(words))
    }

    /// Synonym variants of an already-normalized string, the string itself included.
    ///
    /// Synonyms replace whole words only: `cap` never rewrites `capital`.
    pub(crate) fn expand_synonyms(&self, normalized: &str) -> BTreeSet<String> {
        let padded = pad(normalized);
        let mut result = BTreeSet::new();
        result.insert(normalized.to_string());
        for pair in &self.synonyms {
            let from = pad(&pair.from);
            if padded.contains(&from) {
                result.insert(unpad(&padded.replace(&from, &pad(&pair.to))));
            }
        }
        result
    }

    /// Catalog entry closest to `words`.
    ///
    /// Each synonym alternative picks its first best-scoring entry; the
    /// alternatives are then ranked by score, then by value, both descending.
    /// Unrelated or empty text yields a score of 0.
    pub fn closest_match(&self, words: &str) -> MatchResult {
        let encoder = SignatureEncoder::new(&self.vocabulary);
        let mut best: Option<(f64, &str)> = None;

        for alternative in self.alternatives(words) {
            let encoded = encoder.encode(&alternative);
            let scores = self.score_against_all(&encoded.signature, Some(encoded.word_count));
            let Some((index, score)) = best_index(&scores) else {
                continue;
            };
            let value = self.entries[index].value.as_str();
            debug!("Alternative {:?} -> {:?} ({:.4})", alternative, value, score);

            let better = best.map_or(true, |(best_score, best_value)| {
                score
                    .total_cmp(&best_score)
                    .then_with(|| value.cmp(best_value))
                    .is_gt()
            });
            if better {
                best = Some((score, value));
            }
        }

        let (score, value) = best.unwrap_or_else(|| {
            (0.0, self.entries.first().map_or("", |e| e.value.as_str()))
        });
        MatchResult {
            score,
            value: value.to_string(),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ReferenceEntry> {
        self.entries.get(index)
    }

    /// Reference values in catalog order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.value.as_str())
    }

    pub fn synonyms(&self) -> &[SynonymPair] {
        &self.synonyms
    }

    /// Number of entries in the catalog
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a built catalog
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to a versioned binary artifact
    pub fn to_bytes(&self) -> Result<Vec<u8>, CatalogError> {
        Ok(persistence::to_bytes(CATALOG_FORMAT, self)?)
    }

    /// Restore from bytes produced by [`Catalog::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CatalogError> {
        let catalog: Self = persistence::from_bytes(CATALOG_FORMAT, bytes)?;
        catalog.validated()
    }

    /// Write the catalog to `path`
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        Ok(persistence::save(CATALOG_FORMAT, self, path)?)
    }

    /// Load a catalog written by [`Catalog::save`]
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let catalog: Self = persistence::load(CATALOG_FORMAT, path)?;
        catalog.validated()
    }

    pub(crate) fn validated(self) -> Result<Self, CatalogError> {
        if self.entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(self)
    }

    /// The same catalog with every entry dropped, as a corrupt artifact would hold
    #[cfg(test)]
    pub(crate) fn without_entries(mut self) -> Self {
        self.entries.clear();
        self
    }
}
