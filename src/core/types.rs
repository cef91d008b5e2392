use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Position of a token in the [`Vocabulary`](crate::core::vocabulary::Vocabulary)
pub type TokenIndex = i32;

/// Index used for tokens that are not part of the vocabulary
pub const UNKNOWN: TokenIndex = -1;

/// A contiguous run of encoded tokens
pub type Span = SmallVec<[TokenIndex; 8]>;

/// An ordered synonym substitution: wherever `from` occurs, `to` is also a valid reading
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SynonymPair {
    pub from: String,
    pub to: String,
}

impl SynonymPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for SynonymPair {
    fn from((from, to): (A, B)) -> Self {
        Self::new(from, to)
    }
}

/// Text-wide substitution applied only when `trigger` appears somewhere in the text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalReplacement {
    pub trigger: String,
    pub from: String,
    pub to: String,
}

impl GlobalReplacement {
    pub fn new(
        trigger: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            trigger: trigger.into(),
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Best catalog value found for a query, with its score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f64,
    pub value: String,
}

/// Convert a count to f64 for scoring
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}
