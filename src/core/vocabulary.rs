use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::normalize::normalize;
use crate::core::types::{TokenIndex, UNKNOWN};

/// Token → index table shared by every catalog entry and every query.
///
/// Indices follow first-seen order over the reference values. The table is
/// append-only while it is built and never changes afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Tokens in index order
    tokens: Vec<String>,

    /// Index: token -> position in `tokens`
    lookup: HashMap<String, TokenIndex>,
}

impl Vocabulary {
    /// Build the vocabulary from reference values
    pub fn build<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Self::default();
        for value in values {
            for token in normalize(value.as_ref()).split(' ') {
                vocabulary.insert(token);
            }
        }
        vocabulary
    }

    fn insert(&mut self, token: &str) {
        if token.is_empty() || self.lookup.contains_key(token) {
            return;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let index = self.tokens.len() as TokenIndex;
        self.lookup.insert(token.to_string(), index);
        self.tokens.push(token.to_string());
    }

    /// Index of a normalized token, or [`UNKNOWN`]
    pub fn lookup(&self, token: &str) -> TokenIndex {
        self.get(token).unwrap_or(UNKNOWN)
    }

    /// Index of a normalized token, if present
    pub fn get(&self, token: &str) -> Option<TokenIndex> {
        self.lookup.get(token).copied()
    }

    /// Token stored at `index`
    pub fn token(&self, index: TokenIndex) -> Option<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.tokens.get(i))
            .map(String::as_str)
    }

    /// Tokens in index order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let vocab = Vocabulary::build(["Acme Capital Funding", "Beta Capital plc"]);
        assert_eq!(vocab.len(), 5);
        assert_eq!(vocab.lookup("acme"), 0);
        assert_eq!(vocab.lookup("capital"), 1);
        assert_eq!(vocab.lookup("funding"), 2);
        assert_eq!(vocab.lookup("beta"), 3);
        assert_eq!(vocab.lookup("plc"), 4);
    }

    #[test]
    fn test_unknown_token() {
        let vocab = Vocabulary::build(["Acme Capital Funding"]);
        assert_eq!(vocab.lookup("zeta"), UNKNOWN);
        assert_eq!(vocab.get("zeta"), None);
        assert_eq!(vocab.lookup(""), UNKNOWN);
    }

    #[test]
    fn test_tokens_are_normalized() {
        let vocab = Vocabulary::build(["The Bank of ACME & Co."]);
        let tokens: Vec<&str> = vocab.tokens().collect();
        assert_eq!(tokens, vec!["bank", "acme", "co"]);
        assert_eq!(vocab.token(1), Some("acme"));
        assert_eq!(vocab.token(UNKNOWN), None);
        assert_eq!(vocab.token(42), None);
    }

    #[test]
    fn test_deterministic() {
        let values = ["Gamma Trust", "Delta Holdings", "Gamma Holdings"];
        let a = Vocabulary::build(values);
        let b = Vocabulary::build(values);
        assert_eq!(a.tokens().collect::<Vec<_>>(), b.tokens().collect::<Vec<_>>());
    }

    #[test]
    fn test_empty() {
        let vocab = Vocabulary::build(Vec::<String>::new());
        assert!(vocab.is_empty());
        assert_eq!(vocab.lookup("acme"), UNKNOWN);
    }
}
