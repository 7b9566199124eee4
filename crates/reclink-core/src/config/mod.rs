//! Session configuration
//!
//! Turns a generic JSON payload into typed field specs. Validation runs in
//! this order and stops at the first fault:
//!
//! 1. `matchers` present, then `score_mode` present
//! 2. `score_mode` is one of fellegi-sunter, bayes, multiply, sum
//! 3. fellegi-sunter also needs `base_score`
//! 4. each matcher entry: field, value, matcher, then the mode's own keys
//!    (fellegi-sunter: threshold, m_value, u_value; bayes: high, low)
//!
//! # Example
//!
//! ```rust
//! use reclink_core::config::SessionConfig;
//! use reclink_core::ScoreMode;
//! use serde_json::json;
//!
//! let config = SessionConfig::from_value(&json!({
//!     "score_mode": "sum",
//!     "matchers": [
//!         {"field": "surname", "value": "Smith", "matcher": "jaro-winkler-similarity"}
//!     ]
//! }))
//! .unwrap();
//! assert_eq!(config.mode().score_mode(), ScoreMode::Sum);
//! assert_eq!(config.matchers().len(), 1);
//! ```

mod entry;
pub mod keys;

pub use entry::{parse_entries, MatchParams};
pub(crate) use entry::text;

use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::spec::{
    AggregationMode, BayesParams, FellegiSunterParams, FieldMatchSpec, ScoreMode, WeightedParams,
};

/// Field specs, typed by the score mode that produced them.
///
/// The variant fixes the score mode, so a session can never report one mode
/// and fold with another.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedMatchers {
    FellegiSunter {
        base_score: f64,
        specs: Vec<FieldMatchSpec<FellegiSunterParams>>,
    },
    Bayes(Vec<FieldMatchSpec<BayesParams>>),
    Multiply(Vec<FieldMatchSpec<WeightedParams>>),
    Sum(Vec<FieldMatchSpec<WeightedParams>>),
}

impl ParsedMatchers {
    pub fn mode(&self) -> AggregationMode {
        match self {
            Self::FellegiSunter { base_score, .. } => AggregationMode::FellegiSunter {
                base_score: *base_score,
            },
            Self::Bayes(_) => AggregationMode::Bayes,
            Self::Multiply(_) => AggregationMode::Multiply,
            Self::Sum(_) => AggregationMode::Sum,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::FellegiSunter { specs, .. } => specs.len(),
            Self::Bayes(specs) => specs.len(),
            Self::Multiply(specs) | Self::Sum(specs) => specs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Field names in configuration order
    pub fn fields(&self) -> Vec<&str> {
        match self {
            Self::FellegiSunter { specs, .. } => specs.iter().map(|s| s.field()).collect(),
            Self::Bayes(specs) => specs.iter().map(|s| s.field()).collect(),
            Self::Multiply(specs) | Self::Sum(specs) => specs.iter().map(|s| s.field()).collect(),
        }
    }
}

/// Parse matcher entries for `mode`
pub fn parse(mode: AggregationMode, entries: &[Value]) -> Result<ParsedMatchers> {
    let score_mode = mode.score_mode();
    Ok(match mode {
        AggregationMode::FellegiSunter { base_score } => ParsedMatchers::FellegiSunter {
            base_score,
            specs: parse_entries(score_mode, entries)?,
        },
        AggregationMode::Bayes => ParsedMatchers::Bayes(parse_entries(score_mode, entries)?),
        AggregationMode::Multiply => ParsedMatchers::Multiply(parse_entries(score_mode, entries)?),
        AggregationMode::Sum => ParsedMatchers::Sum(parse_entries(score_mode, entries)?),
    })
}

/// A validated session payload
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    matchers: ParsedMatchers,
}

impl SessionConfig {
    /// Validate and parse a JSON session payload
    pub fn from_value(payload: &Value) -> Result<Self> {
        let params = payload
            .as_object()
            .ok_or_else(|| ConfigError::InvalidPayload("expected a JSON object".into()))?;
        Self::from_map(params)
    }

    /// Parse a session payload from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let payload: Value =
            serde_json::from_str(json).map_err(|e| ConfigError::InvalidPayload(e.to_string()))?;
        Self::from_value(&payload)
    }

    pub fn from_map(params: &Map<String, Value>) -> Result<Self> {
        let matchers = params
            .get(keys::MATCHERS)
            .ok_or(ConfigError::MissingSessionProperty(keys::MATCHERS))?;
        let score_mode = params
            .get(keys::SCORE_MODE)
            .ok_or(ConfigError::MissingSessionProperty(keys::SCORE_MODE))?;

        let score_mode: ScoreMode = text(score_mode).parse()?;
        let mode = match score_mode {
            ScoreMode::FellegiSunter => {
                let base_score = params
                    .get(keys::BASE_SCORE)
                    .ok_or(ConfigError::MissingSessionProperty(keys::BASE_SCORE))?;
                AggregationMode::FellegiSunter {
                    base_score: entry::to_number(keys::BASE_SCORE, base_score)?,
                }
            }
            ScoreMode::Bayes => AggregationMode::Bayes,
            ScoreMode::Multiply => AggregationMode::Multiply,
            ScoreMode::Sum => AggregationMode::Sum,
        };

        let entries = matchers
            .as_array()
            .ok_or_else(|| ConfigError::InvalidMatchers("expected a list".into()))?;

        Ok(Self {
            matchers: parse(mode, entries)?,
        })
    }

    /// Score mode, as carried by the parsed matchers
    pub fn mode(&self) -> AggregationMode {
        self.matchers.mode()
    }

    pub fn matchers(&self) -> &ParsedMatchers {
        &self.matchers
    }

    pub fn into_matchers(self) -> ParsedMatchers {
        self.matchers
    }
}

impl From<ParsedMatchers> for SessionConfig {
    fn from(matchers: ParsedMatchers) -> Self {
        Self { matchers }
    }
}
