//! Product aggregation: every field must agree (AND semantics)

use super::{weighted_score, Aggregator, FieldOutcome};
use crate::spec::{FieldMatchSpec, ScoreMode, WeightedParams};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MultiplyAggregator;

impl MultiplyAggregator {
    pub fn new() -> Self {
        Self
    }
}

impl Aggregator for MultiplyAggregator {
    type Params = WeightedParams;

    fn mode(&self) -> ScoreMode {
        ScoreMode::Multiply
    }

    fn start(&self) -> f64 {
        1.0
    }

    fn accumulate(
        &self,
        total: f64,
        spec: &FieldMatchSpec<WeightedParams>,
        outcome: FieldOutcome,
    ) -> f64 {
        let params = spec.params();
        let score = match outcome {
            FieldOutcome::Conservative => 0.0,
            FieldOutcome::Greedy => 1.0,
            FieldOutcome::Moderate => return total,
            FieldOutcome::Measured(raw) => {
                weighted_score(params, spec.measure().orientation(), raw)
            }
        };
        total * score * params.weight
    }
}
