//! Flag-marked token stream and candidate assembly.
//!
//! The locator rewrites its working text so that every flag is followed (or
//! preceded) by a one-character marker token, then walks the tokens into a
//! sequence of [`Element`]s: runs of vocabulary words become spans, unknown
//! words count down the distance to the nearest flag, and markers stay in
//! place. [`candidates`] reads spans back off that sequence next to the
//! markers.

use std::collections::BTreeSet;

use crate::core::types::{Span, TokenIndex};
use crate::core::vocabulary::Vocabulary;

/// Marker token inserted before each before-flag
pub const BACK_TOKEN: &str = "-";

/// Marker token inserted after each after-flag
pub const FORWARD_TOKEN: &str = "+";

/// Marker token inserted after each remove-flag
pub const DISCARD_TOKEN: &str = "*";

/// Kind of flag marker found in the stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Entity expected after the flag
    Forward,
    /// Entity expected before the flag
    Back,
    /// The slots after the flag are ignored
    Discard,
}

impl Marker {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            FORWARD_TOKEN => Some(Self::Forward),
            BACK_TOKEN => Some(Self::Back),
            DISCARD_TOKEN => Some(Self::Discard),
            _ => None,
        }
    }
}

/// One slot of the walked token stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Seed label placed at the head of the stream
    Label(String),
    /// Consecutive vocabulary tokens
    Span(Span),
    Marker(Marker),
    /// Non-positive count of unknown tokens since the last span or marker
    Distance(i64),
}

/// A span found next to a flag, with its distance to that flag
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Candidate {
    pub distance: u64,
    pub tokens: Span,
}

/// Walk whitespace tokens of `text` into an element sequence.
///
/// A span still pending when the stream ends is dropped.
pub fn walk(text: &str, vocabulary: &Vocabulary, seed: Option<&str>) -> Vec<Element> {
    let mut elements: Vec<Element> = seed
        .map(|label| vec![Element::Label(label.to_string())])
        .unwrap_or_default();
    let mut pending: Vec<TokenIndex> = Vec::new();

    for token in text.split_whitespace() {
        if let Some(index) = vocabulary.get(token) {
            pending.push(index);
            continue;
        }

        if let Some(marker) = Marker::from_token(token) {
            flush(&mut elements, &mut pending);
            if marker == Marker::Back && !matches!(elements.last(), Some(Element::Distance(_))) {
                elements.push(Element::Distance(0));
            }
            elements.push(Element::Marker(marker));
            if marker == Marker::Forward {
                elements.push(Element::Distance(0));
            }
            continue;
        }

        if !flush(&mut elements, &mut pending) {
            match elements.last_mut() {
                Some(Element::Distance(distance)) => *distance -= 1,
                _ => elements.push(Element::Distance(-1)),
            }
        }
    }

    elements
}

/// Push the pending span followed by a fresh distance. Returns false if nothing was pending.
fn flush(elements: &mut Vec<Element>, pending: &mut Vec<TokenIndex>) -> bool {
    if pending.is_empty() {
        return false;
    }
    elements.push(Element::Span(Span::from_slice(pending)));
    elements.push(Element::Distance(-1));
    pending.clear();
    true
}

/// Read the candidate spans off a walked element sequence.
///
/// - a back marker at position > 2 yields the span two slots before it, at
///   the distance just before it;
/// - a forward marker yields the span after the distance that follows it;
/// - a discard marker skips the slot right after it.
///
/// Slots that do not hold the expected span or distance yield nothing.
pub fn candidates(elements: &[Element]) -> BTreeSet<Candidate> {
    let mut found = BTreeSet::new();
    let len = elements.len();
    let mut x = 0;

    while x < len {
        match &elements[x] {
            Element::Marker(Marker::Discard) if x + 2 < len => {
                x += 2;
                continue;
            }
            Element::Marker(Marker::Back) if x > 2 => {
                if let (Element::Span(tokens), Element::Distance(distance)) =
                    (&elements[x - 2], &elements[x - 1])
                {
                    found.insert(Candidate {
                        distance: distance.unsigned_abs(),
                        tokens: tokens.clone(),
                    });
                }
            }
            Element::Marker(Marker::Forward) if x + 2 < len => {
                let candidate = match (&elements[x + 1], &elements[x + 2], elements.get(x + 3)) {
                    (Element::Distance(distance), Element::Span(tokens), _) => {
                        Some((distance.unsigned_abs(), tokens))
                    }
                    (Element::Distance(_), _, _) => None,
                    (_, Element::Distance(distance), Some(Element::Span(tokens))) => {
                        Some((distance.unsigned_abs(), tokens))
                    }
                    (_, Element::Distance(_), _) => None,
                    (_, Element::Span(tokens), _) => Some((0, tokens)),
                    _ => None,
                };
                if let Some((distance, tokens)) = candidate {
                    found.insert(Candidate {
                        distance,
                        tokens: tokens.clone(),
                    });
                }
            }
            _ => {}
        }
        x += 1;
    }

    found
}
