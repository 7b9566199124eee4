//! Weighted sum aggregation

use super::{weighted_score, Aggregator, FieldOutcome};
use crate::spec::{FieldMatchSpec, ScoreMode, WeightedParams};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SumAggregator;

impl SumAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl Aggregator for SumAggregator {
    type Params = WeightedParams;

    fn mode(&self) -> ScoreMode {
        ScoreMode::Sum
    }

    fn start(&self) -> f64 {
        0.0
    }

    fn accumulate(
        &self,
        total: f64,
        spec: &FieldMatchSpec<WeightedParams>,
        outcome: FieldOutcome,
    ) -> f64 {
        let params = spec.params();
        // Moderate counts as a zero contribution here, unlike bayes/multiply
        let score = match outcome {
            FieldOutcome::Conservative | FieldOutcome::Moderate => 0.0,
            FieldOutcome::Greedy => 1.0,
            FieldOutcome::Measured(raw) => {
                weighted_score(params, spec.measure().orientation(), raw)
            }
        };
        total + score * params.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::MultiplyAggregator;
    use crate::measure::MeasureKind;

    fn field(measure: MeasureKind, weight: f64, threshold: f64) -> FieldMatchSpec<WeightedParams> {
        FieldMatchSpec::new("f", "ref", measure, WeightedParams::new(weight, threshold))
    }

    #[test]
    fn test_weighted_sum() {
        let a = field(MeasureKind::JaroWinklerSimilarity, 2.0, 0.0);
        let b = field(MeasureKind::JaroWinklerSimilarity, 0.5, 0.0);
        let score = SumAggregator.aggregate([
            (&a, FieldOutcome::Measured(0.5)),
            (&b, FieldOutcome::Greedy),
        ]);
        assert!((score - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_distance_threshold() {
        let a = field(MeasureKind::Levenshtein, 3.0, 1.0);
        assert_eq!(SumAggregator.aggregate([(&a, FieldOutcome::Measured(1.0))]), 3.0);
        assert_eq!(SumAggregator.aggregate([(&a, FieldOutcome::Measured(2.0))]), 0.0);
    }

    #[test]
    fn test_conservative_contributes_zero() {
        let a = field(MeasureKind::Levenshtein, 3.0, 0.0);
        assert_eq!(SumAggregator.aggregate([(&a, FieldOutcome::Conservative)]), 0.0);
    }

    #[test]
    fn test_moderate_asymmetry_with_multiply() {
        let a = field(MeasureKind::JaroWinklerSimilarity, 1.0, 0.0);
        let m = field(MeasureKind::JaroWinklerSimilarity, 1.0, 0.0);

        let sum_without = SumAggregator.aggregate([(&a, FieldOutcome::Measured(0.8))]);
        let sum_with = SumAggregator.aggregate([
            (&a, FieldOutcome::Measured(0.8)),
            (&m, FieldOutcome::Moderate),
        ]);
        // Moderate takes part in sum with a zero score
        assert_eq!(sum_with, sum_without);
        assert_eq!(sum_with, 0.8);

        let product_without = MultiplyAggregator.aggregate([(&a, FieldOutcome::Measured(0.8))]);
        let product_with = MultiplyAggregator.aggregate([
            (&a, FieldOutcome::Measured(0.8)),
            (&m, FieldOutcome::Moderate),
        ]);
        // and is left out of the product entirely, instead of zeroing it
        assert_eq!(product_with, product_without);
        assert_eq!(product_with, 0.8);

        // Conservative, by contrast, zeroes the product
        let product_conservative = MultiplyAggregator.aggregate([
            (&a, FieldOutcome::Measured(0.8)),
            (&m, FieldOutcome::Conservative),
        ]);
        assert_eq!(product_conservative, 0.0);
    }
}
