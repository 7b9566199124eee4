//! Score aggregation
//!
//! Folds per-field outcomes into one scalar. One [`Aggregator`] per score
//! mode, chosen when the session compiles:
//!
//! | Mode           | Start        | Conservative  | Greedy       | Moderate     |
//! |----------------|--------------|---------------|--------------|--------------|
//! | fellegi-sunter | `base_score` | + unmatch     | + match      | no change    |
//! | bayes          | `NOT_SCORED` | `low`         | `high`       | skipped      |
//! | multiply       | 1.0          | × 0·weight    | × 1·weight   | skipped      |
//! | sum            | 0.0          | + 0·weight    | + 1·weight   | + 0·weight   |
//!
//! Moderate skips the field under bayes and multiply but contributes zero
//! under sum.

mod bayes;
mod fellegi_sunter;
mod multiply;
mod sum;

pub use bayes::BayesAggregator;
pub use fellegi_sunter::FellegiSunterAggregator;
pub use multiply::MultiplyAggregator;
pub use sum::SumAggregator;

use serde::Serialize;

use crate::measure::{MeasureRegistry, Orientation};
use crate::spec::{FieldMatchSpec, NullHandling, ScoreMode, WeightedParams};

/// How one field came out for one document
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "score", rename_all = "kebab-case")]
pub enum FieldOutcome {
    /// Null policy: confident non-match
    Conservative,
    /// Null policy: confident match
    Greedy,
    /// Null policy: neutral
    Moderate,
    /// Raw measure score
    Measured(f64),
}

/// Resolve the null policy for one field and, if none applies, run the measure.
///
/// The reference value is the left operand.
pub fn evaluate<P>(
    spec: &FieldMatchSpec<P>,
    document_value: &str,
    registry: &MeasureRegistry,
) -> FieldOutcome {
    match spec.null_policy(document_value) {
        Some(NullHandling::Conservative) => FieldOutcome::Conservative,
        Some(NullHandling::Greedy) => FieldOutcome::Greedy,
        Some(NullHandling::Moderate) => FieldOutcome::Moderate,
        Some(NullHandling::Off) | None => {
            let measure = registry.get(spec.measure());
            FieldOutcome::Measured(measure.compare(spec.reference_value(), document_value))
        }
    }
}

/// One score fusion strategy
pub trait Aggregator: Send + Sync {
    /// Per-field numeric parameters this strategy reads
    type Params: Send + Sync;

    fn mode(&self) -> ScoreMode;

    /// Running total before any field is seen
    fn start(&self) -> f64;

    /// Fold one field's outcome into the running total
    fn accumulate(
        &self,
        total: f64,
        spec: &FieldMatchSpec<Self::Params>,
        outcome: FieldOutcome,
    ) -> f64;

    /// Fold a whole sequence of outcomes
    fn aggregate<'a, I>(&self, fields: I) -> f64
    where
        Self: Sized,
        Self::Params: 'a,
        I: IntoIterator<Item = (&'a FieldMatchSpec<Self::Params>, FieldOutcome)>,
    {
        fields
            .into_iter()
            .fold(self.start(), |total, (spec, outcome)| {
                self.accumulate(total, spec, outcome)
            })
    }
}

/// Multiply/sum score for a measured field: raw, or 1/0 when a threshold is set
pub(crate) fn weighted_score(params: &WeightedParams, orientation: Orientation, raw: f64) -> f64 {
    if !params.binarizes() {
        return raw;
    }
    if orientation.is_match(raw, params.threshold) {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::MeasureKind;

    fn spec(reference: &str) -> FieldMatchSpec<WeightedParams> {
        FieldMatchSpec::new(
            "name",
            reference,
            MeasureKind::NormalizedLevenshteinSimilarity,
            WeightedParams::default(),
        )
    }

    #[test]
    fn test_evaluate_measures_when_both_present() {
        let registry = MeasureRegistry::new();
        let outcome = evaluate(&spec("Smith"), "  smith ", &registry);
        assert_eq!(outcome, FieldOutcome::Measured(1.0));
    }

    #[test]
    fn test_evaluate_off_measures_empty_values() {
        let registry = MeasureRegistry::new();
        let outcome = evaluate(&spec("Smith"), "", &registry);
        assert_eq!(outcome, FieldOutcome::Measured(0.0));
    }

    #[test]
    fn test_evaluate_applies_policy_without_measuring() {
        let registry = MeasureRegistry::new();
        let s = spec("").with_null_handling(NullHandling::Greedy, Some(NullHandling::Moderate));
        assert_eq!(evaluate(&s, "x", &registry), FieldOutcome::Greedy);
        assert_eq!(evaluate(&s, "", &registry), FieldOutcome::Moderate);
        assert_eq!(registry.cached(), 0);
    }

    #[test]
    fn test_weighted_score_binarizes() {
        let params = WeightedParams::new(1.0, 0.8);
        assert_eq!(weighted_score(&params, Orientation::Similarity, 0.85), 1.0);
        assert_eq!(weighted_score(&params, Orientation::Similarity, 0.5), 0.0);
        assert_eq!(weighted_score(&params, Orientation::Distance, 0.5), 1.0);

        let raw = WeightedParams::default();
        assert_eq!(weighted_score(&raw, Orientation::Distance, 3.0), 3.0);
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let json = serde_json::to_value(FieldOutcome::Measured(0.5)).unwrap();
        assert_eq!(json["outcome"], "measured");
        assert_eq!(json["score"], 0.5);

        let json = serde_json::to_value(FieldOutcome::Moderate).unwrap();
        assert_eq!(json["outcome"], "moderate");
    }
}
