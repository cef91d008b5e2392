//! Accuracy of predicted labels against a ground truth.
//!
//! No fuzzy comparison: a value containing `|` is split into a set of
//! entities, and a prediction is correct when both sets are equal regardless
//! of order.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::types::count_to_f64;
use crate::parsing::labels::Labels;

/// A prediction that disagrees with the truth
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    pub id: String,
    pub predicted: String,
    pub expected: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AccuracyReport {
    /// Documents in the ground truth
    pub total: usize,

    /// Truth documents without a prediction
    pub missing: usize,

    /// Predictions whose entity set differs from the truth
    pub mismatches: Vec<Mismatch>,
}

impl AccuracyReport {
    /// Compare every ground-truth label with its prediction
    pub fn compare(predictions: &Labels, truth: &Labels) -> Self {
        let mut report = Self {
            total: truth.len(),
            ..Self::default()
        };

        for (id, expected) in truth {
            let Some(predicted) = predictions.get(id) else {
                report.missing += 1;
                continue;
            };
            if entity_set(predicted) != entity_set(expected) {
                report.mismatches.push(Mismatch {
                    id: id.clone(),
                    predicted: predicted.clone(),
                    expected: expected.clone(),
                });
            }
        }

        report
    }

    pub fn errors(&self) -> usize {
        self.mismatches.len()
    }

    /// Predictions that were compared
    pub fn compared(&self) -> usize {
        self.total - self.missing
    }

    /// Mismatches as a percentage of the ground truth size
    pub fn error_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count_to_f64(self.errors()) / count_to_f64(self.total) * 100.0
    }
}

fn entity_set(value: &str) -> BTreeSet<&str> {
    value.split('|').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> Labels {
        pairs
            .iter()
            .map(|(id, value)| ((*id).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn test_compare_counts() {
        let truth = labels(&[
            ("XS1", "Acme Capital Funding"),
            ("XS2", "Beta Bank plc"),
            ("XS3", "Acme Capital Funding|Beta Bank plc"),
            ("XS4", "Gamma Holdings"),
        ]);
        let predictions = labels(&[
            ("XS1", "Acme Capital Funding"),
            ("XS2", "Acme Capital Funding"),
            ("XS3", "Beta Bank plc|Acme Capital Funding"),
            ("XS9", "Unrelated"),
        ]);

        let report = AccuracyReport::compare(&predictions, &truth);
        assert_eq!(report.total, 4);
        assert_eq!(report.missing, 1);
        assert_eq!(report.compared(), 3);
        assert_eq!(report.errors(), 1);
        assert_eq!(report.mismatches[0].id, "XS2");
        assert!((report.error_percent() - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_pipe_sets_are_exact() {
        let truth = labels(&[("XS1", "Acme|Beta")]);
        let predictions = labels(&[("XS1", "Acme")]);
        let report = AccuracyReport::compare(&predictions, &truth);
        assert_eq!(report.errors(), 1);
    }

    #[test]
    fn test_empty_truth() {
        let report = AccuracyReport::compare(&labels(&[("XS1", "Acme")]), &Labels::new());
        assert_eq!(report.total, 0);
        assert!(report.error_percent().abs() < f64::EPSILON);
    }
}
