use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::catalog::store::{Catalog, CatalogError};
use crate::core::normalize::{normalize, pad, unpad};
use crate::core::signature::Signature;
use crate::core::types::{count_to_f64, GlobalReplacement, MatchResult};
use crate::matching::scoring::best_index;
use crate::matching::stream::{self, BACK_TOKEN, DISCARD_TOKEN, FORWARD_TOKEN};
use crate::persistence::{self, PersistError};

/// Artifact kind written by [`Locator::save`]
pub const LOCATOR_FORMAT: &str = "locator";

/// Runs of back markers, possibly separated by whitespace
static BACK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:-\s*)+").expect("BACK_RUNS is a valid regex"));

/// Which list a flag came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Before,
    After,
    Remove,
}

impl fmt::Display for FlagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => write!(f, "before"),
            Self::After => write!(f, "after"),
            Self::Remove => write!(f, "remove"),
        }
    }
}

#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("The {kind} flag {raw:?} is empty after normalization")]
    EmptyFlag { kind: FlagKind, raw: String },

    #[error("The replacement source {raw:?} is empty after normalization")]
    EmptyReplacement { raw: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// User-facing locator configuration, as read from JSON
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Label placed at the head of every walked stream
    pub seed: Option<String>,

    /// The entity is expected just before these strings
    pub before: Vec<String>,

    /// The entity is expected just after these strings
    pub after: Vec<String>,

    /// Text right after these strings is ignored
    pub remove: Vec<String>,

    /// Substitutions applied to the whole text when their trigger is present
    pub replacements: Vec<GlobalReplacement>,
}

/// Normalized flag strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSet {
    pub before: Vec<String>,
    pub after: Vec<String>,
    pub remove: Vec<String>,
}

impl FlagSet {
    fn from_config(config: &LocatorConfig) -> Result<Self, LocatorError> {
        Ok(Self {
            before: normalize_flags(&config.before, FlagKind::Before)?,
            after: normalize_flags(&config.after, FlagKind::After)?,
            remove: normalize_flags(&config.remove, FlagKind::Remove)?,
        })
    }
}

fn normalize_flags(flags: &[String], kind: FlagKind) -> Result<Vec<String>, LocatorError> {
    flags
        .iter()
        .map(|raw| {
            let flag = normalize(raw);
            if flag.is_empty() {
                Err(LocatorError::EmptyFlag {
                    kind,
                    raw: raw.clone(),
                })
            } else {
                Ok(flag)
            }
        })
        .collect()
}

/// Finds the catalog entity mentioned near flag strings in free text.
///
/// Holds the catalog through an [`Arc`]; a locator is immutable and can be
/// shared between threads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Locator {
    catalog: Arc<Catalog>,
    seed: Option<String>,
    flags: FlagSet,
    replacements: Vec<GlobalReplacement>,
}

impl Locator {
    /// Create a locator over `catalog`
    ///
    /// # Errors
    ///
    /// Returns `LocatorError::EmptyFlag` if a flag normalizes to nothing, or
    /// `LocatorError::EmptyReplacement` if a replacement source does.
    pub fn new(catalog: Arc<Catalog>, config: &LocatorConfig) -> Result<Self, LocatorError> {
        let flags = FlagSet::from_config(config)?;

        let replacements = config
            .replacements
            .iter()
            .map(|r| {
                let from = normalize(&r.from);
                if from.is_empty() {
                    return Err(LocatorError::EmptyReplacement {
                        raw: r.from.clone(),
                    });
                }
                Ok(GlobalReplacement::new(normalize(&r.trigger), from, normalize(&r.to)))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            catalog,
            seed: config.seed.clone(),
            flags,
            replacements,
        })
    }

    /// Catalog value of the best candidate found in `text`
    pub fn extract(&self, text: &str) -> Option<String> {
        self.extract_scored(text).map(|m| m.value)
    }

    /// Best candidate found in `text` with its ranking score.
    ///
    /// Ranking = best entry score / (distance to flag + 1) × words in the
    /// catalog value, so close flags and long, specific names win. Ties keep
    /// the first candidate in (distance, tokens) order.
    pub fn extract_scored(&self, text: &str) -> Option<MatchResult> {
        let working = self.working_text(text);
        let elements = stream::walk(&working, self.catalog.vocabulary(), self.seed.as_deref());
        let candidates = stream::candidates(&elements);

        let mut best: Option<(f64, usize)> = None;
        for candidate in &candidates {
            let signature = Signature::from_tokens(&candidate.tokens);
            let scores = self.catalog.score_against_all(&signature, None);
            let Some((index, score)) = best_index(&scores) else {
                continue;
            };
            let value = &self.catalog.entries()[index].value;
            let ranking = score / distance_to_f64(candidate.distance + 1)
                * count_to_f64(value.split_whitespace().count());
            debug!(
                "Candidate {:?} at distance {} -> {:?} (score {:.4}, ranking {:.4})",
                candidate.tokens, candidate.distance, value, score, ranking
            );

            if best.map_or(true, |(best_ranking, _)| ranking > best_ranking) {
                best = Some((ranking, index));
            }
        }

        best.map(|(score, index)| MatchResult {
            score,
            value: self.catalog.entries()[index].value.clone(),
        })
    }

    /// Run [`Locator::extract_scored`] over many texts in parallel, keeping input order
    pub fn extract_batch<T>(&self, texts: &[T]) -> Vec<Option<MatchResult>>
    where
        T: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.extract_scored(text.as_ref()))
            .collect()
    }

    /// Normalized text, globally replaced, synonym-expanded and flag-marked.
    ///
    /// Triggers, replacements and flags match whole words only.
    fn working_text(&self, text: &str) -> String {
        let mut text = pad(&normalize(text));
        for replacement in &self.replacements {
            if text.contains(&pad(&replacement.trigger)) {
                text = text.replace(&pad(&replacement.from), &pad(&replacement.to));
            }
        }

        // Alternatives share one working string, so a flag in one reading can
        // pick up a span from its neighbour.
        let alternatives = self
            .catalog
            .expand_synonyms(&unpad(&text))
            .into_iter()
            .collect::<Vec<_>>()
            .join(" ");
        let mut working = pad(&alternatives);

        for flag in &self.flags.before {
            working = working.replace(&pad(flag), &format!(" {BACK_TOKEN} {flag} "));
        }
        for flag in &self.flags.after {
            working = working.replace(&pad(flag), &format!(" {flag} {FORWARD_TOKEN} "));
        }
        for flag in &self.flags.remove {
            working = working.replace(&pad(flag), &format!(" {flag} {DISCARD_TOKEN} "));
        }

        BACK_RUNS
            .replace_all(&working, format!(" {BACK_TOKEN} ").as_str())
            .into_owned()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    pub fn flags(&self) -> &FlagSet {
        &self.flags
    }

    pub fn replacements(&self) -> &[GlobalReplacement] {
        &self.replacements
    }

    /// Serialize to a versioned binary artifact, catalog included
    pub fn to_bytes(&self) -> Result<Vec<u8>, LocatorError> {
        Ok(persistence::to_bytes(LOCATOR_FORMAT, self)?)
    }

    /// Restore from bytes produced by [`Locator::to_bytes`]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LocatorError> {
        let locator: Self = persistence::from_bytes(LOCATOR_FORMAT, bytes)?;
        locator.validated()
    }

    /// Write the locator to `path`
    pub fn save(&self, path: &Path) -> Result<(), LocatorError> {
        Ok(persistence::save(LOCATOR_FORMAT, self, path)?)
    }

    /// Load a locator written by [`Locator::save`]
    pub fn load(path: &Path) -> Result<Self, LocatorError> {
        let locator: Self = persistence::load(LOCATOR_FORMAT, path)?;
        locator.validated()
    }

    fn validated(self) -> Result<Self, LocatorError> {
        if self.catalog.is_empty() {
            return Err(CatalogError::Empty.into());
        }
        Ok(self)
    }
}

#[inline]
fn distance_to_f64(distance: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        distance as f64
    }
}
