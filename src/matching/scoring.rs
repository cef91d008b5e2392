use crate::core::signature::Signature;
use crate::core::types::count_to_f64;

/// Weight of one shared span of length `len`.
///
/// Quadratic, so a shared run of three words outweighs three shared single words.
#[inline]
pub fn span_weight(len: usize) -> f64 {
    let len = count_to_f64(len);
    len * len
}

/// Σ over span lengths k of k² × (number of distinct spans of length k)
pub fn weight_sum(signature: &Signature) -> f64 {
    signature
        .buckets()
        .map(|(len, spans)| span_weight(len) * count_to_f64(spans.len()))
        .sum()
}

/// Weighted size of the bucket-wise intersection of `entry` and `test`
pub fn shared_weight(entry: &Signature, test: &Signature) -> f64 {
    entry
        .buckets()
        .map(|(len, spans)| {
            let shared = test
                .bucket(len)
                .map_or(0, |test_spans| spans.intersection(test_spans).count());
            span_weight(len) * count_to_f64(shared)
        })
        .sum()
}

/// Word-count agreement folded into (0, 1]: 1 only when both counts are equal.
///
/// Returns 0 when either count is not positive.
pub fn length_agreement(a: f64, b: f64) -> f64 {
    if a <= 0.0 || b <= 0.0 {
        return 0.0;
    }
    let ratio = a / b;
    if ratio > 1.0 {
        1.0 / ratio
    } else {
        ratio
    }
}

/// Probability-like score that `test` denotes a catalog entry.
///
/// The shared weight is normalized by the entry's own `entry_weight_sum` (kept
/// raw when that sum is zero) and scaled by the word-count agreement.
pub fn entry_score(
    entry: &Signature,
    entry_weight_sum: f64,
    entry_word_count: f64,
    test: &Signature,
    test_word_count: f64,
) -> f64 {
    if test_word_count <= 0.0 {
        return 0.0;
    }

    let shared = shared_weight(entry, test);
    let normalized = if entry_weight_sum > 0.0 {
        shared / entry_weight_sum
    } else {
        shared
    };

    normalized * length_agreement(entry_word_count, test_word_count)
}

/// Index and value of the first maximum in `scores`
pub fn best_index(scores: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &score) in scores.iter().enumerate() {
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }
    best
}
