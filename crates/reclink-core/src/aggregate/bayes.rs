//! Naive Bayes aggregation
//!
//! Each field yields a probability: its raw score clamped into
//! `[low, high]`, or `low`/`high` outright under a conservative/greedy null
//! policy. Probabilities combine pairwise:
//!
//! ```text
//! combined = a·b / (a·b + (1 - a)·(1 - b))
//! ```
//!
//! Moderate fields are skipped. If every field is skipped the result is
//! [`BayesAggregator::NOT_SCORED`], which callers must treat as "no evidence".

use super::{Aggregator, FieldOutcome};
use crate::spec::{BayesParams, FieldMatchSpec, ScoreMode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BayesAggregator;

impl BayesAggregator {
    /// Sentinel outside [0, 1]: no field has been scored
    pub const NOT_SCORED: f64 = 2.0;

    pub fn new() -> Self {
        Self
    }

    pub fn is_not_scored(score: f64) -> bool {
        score == Self::NOT_SCORED
    }

    /// Fuse two independent probability estimates
    pub fn combine(a: f64, b: f64) -> f64 {
        (a * b) / ((a * b) + ((1.0 - a) * (1.0 - b)))
    }
}

impl Aggregator for BayesAggregator {
    type Params = BayesParams;

    fn mode(&self) -> ScoreMode {
        ScoreMode::Bayes
    }

    fn start(&self) -> f64 {
        Self::NOT_SCORED
    }

    fn accumulate(&self, total: f64, spec: &FieldMatchSpec<BayesParams>, outcome: FieldOutcome) -> f64 {
        let params = spec.params();
        let score = match outcome {
            FieldOutcome::Conservative => params.low,
            FieldOutcome::Greedy => params.high,
            FieldOutcome::Moderate => return total,
            FieldOutcome::Measured(raw) => params.clamp(raw),
        };

        if Self::is_not_scored(total) {
            score
        } else {
            Self::combine(total, score)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MeasureKind;

    fn field(high: f64, low: f64) -> FieldMatchSpec<BayesParams> {
        FieldMatchSpec::new(
            "f",
            "ref",
            MeasureKind::JaroWinklerSimilarity,
            BayesParams::new(high, low),
        )
    }

    #[test]
    fn test_two_greedy_fields() {
        let a = field(0.9, 0.1);
        let b = field(0.9, 0.1);
        let score = BayesAggregator.aggregate([(&a, FieldOutcome::Greedy), (&b, FieldOutcome::Greedy)]);
        let expected = (0.9 * 0.9) / ((0.9 * 0.9) + (0.1 * 0.1));
        assert!((score - expected).abs() < 1e-12);
        assert!((score - 0.9878).abs() < 1e-4);
    }

    #[test]
    fn test_first_field_seeds_total() {
        let a = field(0.9, 0.1);
        assert_eq!(BayesAggregator.aggregate([(&a, FieldOutcome::Conservative)]), 0.1);
    }

    #[test]
    fn test_raw_score_is_clamped() {
        let a = field(0.8, 0.3);
        assert_eq!(BayesAggregator.aggregate([(&a, FieldOutcome::Measured(1.0))]), 0.8);
        assert_eq!(BayesAggregator.aggregate([(&a, FieldOutcome::Measured(0.0))]), 0.3);
        assert_eq!(BayesAggregator.aggregate([(&a, FieldOutcome::Measured(0.55))]), 0.55);
    }

    #[test]
    fn test_all_moderate_stays_not_scored() {
        let a = field(0.9, 0.1);
        let b = field(0.9, 0.1);
        let score = BayesAggregator.aggregate([(&a, FieldOutcome::Moderate), (&b, FieldOutcome::Moderate)]);
        assert!(BayesAggregator::is_not_scored(score));
        assert_eq!(score, 2.0);
    }

    #[test]
    fn test_moderate_is_skipped() {
        let a = field(0.9, 0.1);
        let b = field(0.7, 0.2);
        let with = BayesAggregator.aggregate([
            (&a, FieldOutcome::Greedy),
            (&b, FieldOutcome::Moderate),
            (&b, FieldOutcome::Greedy),
        ]);
        let without = BayesAggregator.aggregate([(&a, FieldOutcome::Greedy), (&b, FieldOutcome::Greedy)]);
        assert_eq!(with, without);
    }

    #[test]
    fn test_neutral_evidence_is_identity() {
        assert!((BayesAggregator::combine(0.5, 0.73) - 0.73).abs() < 1e-12);
    }
}
