//! Fellegi-Sunter weight-of-evidence aggregation
//!
//! Starts from `base_score` and adds each field's log10 likelihood ratio:
//! the match weight when the field agrees, the unmatch weight (usually
//! negative) when it does not. The total is unbounded in both directions,
//! hence the base score.

use super::{Aggregator, FieldOutcome};
use crate::spec::{FellegiSunterParams, FieldMatchSpec, ScoreMode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FellegiSunterAggregator {
    base_score: f64,
}

impl FellegiSunterAggregator {
    pub fn new(base_score: f64) -> Self {
        Self { base_score }
    }
}

impl Aggregator for FellegiSunterAggregator {
    type Params = FellegiSunterParams;

    fn mode(&self) -> ScoreMode {
        ScoreMode::FellegiSunter
    }

    fn start(&self) -> f64 {
        self.base_score
    }

    fn accumulate(
        &self,
        total: f64,
        spec: &FieldMatchSpec<FellegiSunterParams>,
        outcome: FieldOutcome,
    ) -> f64 {
        let params = spec.params();
        match outcome {
            FieldOutcome::Conservative => total + params.unmatch_weight(),
            FieldOutcome::Greedy => total + params.match_weight(),
            FieldOutcome::Moderate => total,
            FieldOutcome::Measured(score) => {
                if spec.measure().orientation().is_match(score, params.threshold()) {
                    total + params.match_weight()
                } else {
                    total + params.unmatch_weight()
                }
            }
        }
    }
}
