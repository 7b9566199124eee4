//! Field match specifications
//!
//! One [`FieldMatchSpec`] per configured field comparison. The numeric
//! parameters depend on the score mode, so the spec is generic over them:
//! [`FellegiSunterParams`], [`BayesParams`] or [`WeightedParams`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::measure::MeasureKind;

/// Score fusion strategy identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreMode {
    FellegiSunter,
    Bayes,
    Multiply,
    Sum,
}

impl ScoreMode {
    pub const ALL: [ScoreMode; 4] = [
        Self::FellegiSunter,
        Self::Bayes,
        Self::Multiply,
        Self::Sum,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FellegiSunter => "fellegi-sunter",
            Self::Bayes => "bayes",
            Self::Multiply => "multiply",
            Self::Sum => "sum",
        }
    }
}

impl FromStr for ScoreMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ConfigError::InvalidScoreMode(s.to_string()))
    }
}

impl fmt::Display for ScoreMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score mode plus its session-level parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "score_mode", rename_all = "kebab-case")]
pub enum AggregationMode {
    FellegiSunter { base_score: f64 },
    Bayes,
    Multiply,
    Sum,
}

impl AggregationMode {
    pub fn score_mode(&self) -> ScoreMode {
        match self {
            Self::FellegiSunter { .. } => ScoreMode::FellegiSunter,
            Self::Bayes => ScoreMode::Bayes,
            Self::Multiply => ScoreMode::Multiply,
            Self::Sum => ScoreMode::Sum,
        }
    }
}

/// What to do when the document value, the reference value, or both are empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullHandling {
    /// Compare normally, even over empty strings
    #[default]
    Off,
    /// Confident non-match
    Conservative,
    /// Confident match
    Greedy,
    /// Neutral; skipped or zero depending on score mode
    Moderate,
}

impl NullHandling {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Conservative => "conservative",
            Self::Greedy => "greedy",
            Self::Moderate => "moderate",
        }
    }
}

impl FromStr for NullHandling {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "conservative" => Ok(Self::Conservative),
            "greedy" => Ok(Self::Greedy),
            "moderate" => Ok(Self::Moderate),
            other => Err(ConfigError::InvalidNullHandling(other.to_string())),
        }
    }
}

impl fmt::Display for NullHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fellegi-Sunter parameters.
///
/// Weights are derived once from the m/u probabilities:
/// `match = log10(m / u)`, `unmatch = log10((1 - m) / (1 - u))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FellegiSunterParams {
    m_value: f64,
    u_value: f64,
    threshold: f64,
    match_weight: f64,
    unmatch_weight: f64,
}

impl FellegiSunterParams {
    pub fn new(m_value: f64, u_value: f64, threshold: f64) -> Self {
        Self {
            m_value,
            u_value,
            threshold,
            match_weight: (m_value / u_value).log10(),
            unmatch_weight: ((1.0 - m_value) / (1.0 - u_value)).log10(),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn match_weight(&self) -> f64 {
        self.match_weight
    }

    pub fn unmatch_weight(&self) -> f64 {
        self.unmatch_weight
    }
}

/// Bayes calibration bounds; raw scores are clamped into `[low, high]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BayesParams {
    pub high: f64,
    pub low: f64,
}

impl BayesParams {
    pub fn new(high: f64, low: f64) -> Self {
        Self { high, low }
    }

    /// Clamp without panicking on inverted bounds: `high` wins ties
    pub fn clamp(&self, score: f64) -> f64 {
        let mut score = score;
        if score > self.high {
            score = self.high;
        }
        if score < self.low {
            score = self.low;
        }
        score
    }
}

/// Multiply/Sum parameters. A zero threshold disables binarization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightedParams {
    pub weight: f64,
    pub threshold: f64,
}

impl WeightedParams {
    pub const DEFAULT_WEIGHT: f64 = 1.0;
    pub const NO_THRESHOLD: f64 = 0.0;

    pub fn new(weight: f64, threshold: f64) -> Self {
        Self { weight, threshold }
    }

    pub fn binarizes(&self) -> bool {
        self.threshold != Self::NO_THRESHOLD
    }
}

impl Default for WeightedParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WEIGHT, Self::NO_THRESHOLD)
    }
}

/// One configured field comparison. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatchSpec<P> {
    field: String,
    reference_value: String,
    measure: MeasureKind,
    null_handling: NullHandling,
    null_handling_both: Option<NullHandling>,
    params: P,
}

impl<P> FieldMatchSpec<P> {
    pub fn new(
        field: impl Into<String>,
        reference_value: impl Into<String>,
        measure: MeasureKind,
        params: P,
    ) -> Self {
        Self {
            field: field.into(),
            reference_value: reference_value.into(),
            measure,
            null_handling: NullHandling::Off,
            null_handling_both: None,
            params,
        }
    }

    /// Set the policy for one empty side, and optionally a separate one for both empty
    pub fn with_null_handling(mut self, one: NullHandling, both: Option<NullHandling>) -> Self {
        self.null_handling = one;
        self.null_handling_both = both;
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn reference_value(&self) -> &str {
        &self.reference_value
    }

    pub fn measure(&self) -> MeasureKind {
        self.measure
    }

    pub fn null_handling(&self) -> NullHandling {
        self.null_handling
    }

    pub fn null_handling_both(&self) -> Option<NullHandling> {
        self.null_handling_both
    }

    pub fn params(&self) -> &P {
        &self.params
    }

    /// Policy that applies for this document value, if any side is empty.
    ///
    /// Emptiness is checked on the raw values, before normalization.
    pub fn null_policy(&self, document_value: &str) -> Option<NullHandling> {
        match (document_value.is_empty(), self.reference_value.is_empty()) {
            (true, true) => Some(self.null_handling_both.unwrap_or(self.null_handling)),
            (true, false) | (false, true) => Some(self.null_handling),
            (false, false) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> FieldMatchSpec<WeightedParams> {
        FieldMatchSpec::new(
            "surname",
            "smith",
            MeasureKind::JaroWinklerSimilarity,
            WeightedParams::default(),
        )
    }

    #[test]
    fn test_score_mode_from_str() {
        assert_eq!("fellegi-sunter".parse::<ScoreMode>().unwrap(), ScoreMode::FellegiSunter);
        assert_eq!("sum".parse::<ScoreMode>().unwrap(), ScoreMode::Sum);
        assert_eq!(
            "median".parse::<ScoreMode>().unwrap_err(),
            ConfigError::InvalidScoreMode("median".into())
        );
    }

    #[test]
    fn test_aggregation_mode_serde() {
        let mode = AggregationMode::FellegiSunter { base_score: 5.0 };
        let json = serde_json::to_value(mode).unwrap();
        assert_eq!(json["score_mode"], "fellegi-sunter");
        assert_eq!(json["base_score"], 5.0);
        assert_eq!(mode.score_mode(), ScoreMode::FellegiSunter);
    }

    #[test]
    fn test_null_handling_from_str() {
        assert_eq!("greedy".parse::<NullHandling>().unwrap(), NullHandling::Greedy);
        assert!("lenient".parse::<NullHandling>().is_err());
        assert_eq!(NullHandling::default(), NullHandling::Off);
    }

    #[test]
    fn test_fellegi_sunter_weights() {
        let params = FellegiSunterParams::new(0.9, 0.1, 0.8);
        assert!((params.match_weight() - 9f64.log10()).abs() < 1e-12);
        assert!((params.unmatch_weight() - (1.0f64 / 9.0).log10()).abs() < 1e-12);
        assert_eq!(params.threshold(), 0.8);
    }

    #[test]
    fn test_bayes_clamp() {
        let params = BayesParams::new(0.9, 0.3);
        assert_eq!(params.clamp(1.0), 0.9);
        assert_eq!(params.clamp(0.0), 0.3);
        assert_eq!(params.clamp(0.5), 0.5);
    }

    #[test]
    fn test_weighted_defaults() {
        let params = WeightedParams::default();
        assert_eq!(params.weight, 1.0);
        assert!(!params.binarizes());
        assert!(WeightedParams::new(1.0, 0.5).binarizes());
    }

    #[test]
    fn test_null_policy_neither_empty() {
        let spec = spec().with_null_handling(NullHandling::Greedy, None);
        assert_eq!(spec.null_policy("smyth"), None);
    }

    #[test]
    fn test_null_policy_one_empty() {
        let spec = spec().with_null_handling(NullHandling::Conservative, Some(NullHandling::Greedy));
        assert_eq!(spec.null_policy(""), Some(NullHandling::Conservative));
    }

    #[test]
    fn test_null_policy_both_empty_falls_back() {
        let spec = FieldMatchSpec::new("x", "", MeasureKind::Levenshtein, WeightedParams::default())
            .with_null_handling(NullHandling::Moderate, None);
        assert_eq!(spec.null_policy(""), Some(NullHandling::Moderate));

        let spec = spec.with_null_handling(NullHandling::Moderate, Some(NullHandling::Greedy));
        assert_eq!(spec.null_policy(""), Some(NullHandling::Greedy));
        // Reference empty, document present: single-side policy
        assert_eq!(spec.null_policy("abc"), Some(NullHandling::Moderate));
    }

    #[test]
    fn test_null_policy_whitespace_is_not_empty() {
        let spec = spec().with_null_handling(NullHandling::Greedy, None);
        assert_eq!(spec.null_policy("  "), None);
    }
}
