//! Word-order-aware signatures.
//!
//! A [`Signature`] holds every distinct contiguous sub-span of an encoded word
//! sequence, bucketed by span length. Two sequences that share long runs of
//! words share many long spans, which the scorer weights quadratically.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::core::normalize::normalize;
use crate::core::types::{count_to_f64, Span, TokenIndex, UNKNOWN};
use crate::core::vocabulary::Vocabulary;

/// Length-bucketed set of distinct contiguous token spans
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    buckets: BTreeMap<usize, HashSet<Span>>,
}

impl Signature {
    /// Enumerate every contiguous sub-span of `tokens`.
    ///
    /// Quadratic in `tokens.len()`; inputs are name-sized.
    pub fn from_tokens(tokens: &[TokenIndex]) -> Self {
        let mut buckets: BTreeMap<usize, HashSet<Span>> = BTreeMap::new();
        for start in 0..tokens.len() {
            for end in start..tokens.len() {
                buckets
                    .entry(end - start + 1)
                    .or_default()
                    .insert(Span::from_slice(&tokens[start..=end]));
            }
        }
        Self { buckets }
    }

    /// Spans of length `len`
    pub fn bucket(&self, len: usize) -> Option<&HashSet<Span>> {
        self.buckets.get(&len)
    }

    /// Buckets in increasing span length
    pub fn buckets(&self) -> impl Iterator<Item = (usize, &HashSet<Span>)> {
        self.buckets.iter().map(|(len, spans)| (*len, spans))
    }

    /// Longest span length present, 0 for an empty signature
    pub fn max_span_len(&self) -> usize {
        self.buckets.keys().next_back().copied().unwrap_or(0)
    }

    /// Total number of distinct spans
    pub fn span_count(&self) -> usize {
        self.buckets.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// A word sequence encoded against a vocabulary
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    pub signature: Signature,

    /// Non-empty tokens in the normalized text, before unknown runs are collapsed
    pub word_count: f64,
}

/// Turns text into [`Signature`]s over a shared [`Vocabulary`]
#[derive(Debug, Clone, Copy)]
pub struct SignatureEncoder<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> SignatureEncoder<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Normalize and encode `words`
    pub fn encode(&self, words: &str) -> Encoded {
        let (tokens, word_count) = self.tokens(words);
        Encoded {
            signature: Signature::from_tokens(&tokens),
            word_count: count_to_f64(word_count),
        }
    }

    /// Token indices of `words` with unknown runs collapsed, and the raw word count
    pub fn tokens(&self, words: &str) -> (Vec<TokenIndex>, usize) {
        let normalized = normalize(words);
        let mut tokens: Vec<TokenIndex> = normalized
            .split(' ')
            .filter(|w| !w.is_empty())
            .map(|w| self.vocabulary.lookup(w))
            .collect();
        let word_count = tokens.len();

        tokens.dedup_by(|a, b| *a == UNKNOWN && *b == UNKNOWN);
        (tokens, word_count)
    }
}
