//! Record Linkage Scoring Core
//!
//! Scores how likely a document describes the same real-world entity as a
//! set of reference values. Each configured field is compared with a named
//! string measure, empty values are routed through a null-handling policy,
//! and the per-field outcomes are fused into one scalar.
//!
//! # Score modes
//!
//! - `fellegi-sunter` - sum of log10 likelihood ratios from m/u probabilities
//! - `bayes` - naive Bayes combination of clamped probabilities
//! - `multiply` - weighted product (AND semantics)
//! - `sum` - weighted sum
//!
//! # Features
//!
//! - `parallel` - Score document batches on the rayon pool
//!
//! # Example
//!
//! ```rust
//! use reclink_core::ScoringSession;
//! use serde_json::json;
//!
//! let session = ScoringSession::compile(&json!({
//!     "score_mode": "fellegi-sunter",
//!     "base_score": 0,
//!     "matchers": [{
//!         "field": "surname", "value": "Smith",
//!         "matcher": "normalized-levenshtein-similarity",
//!         "threshold": 0.5, "m_value": 0.9, "u_value": 0.1
//!     }]
//! }))
//! .unwrap();
//!
//! let score = session.score(&json!({"surname": "smith"}));
//! assert!((score - 0.954_242_509).abs() < 1e-6);
//! ```

pub mod aggregate;
pub mod config;
pub mod error;
pub mod measure;
pub mod session;
pub mod spec;

// Re-export main types at crate root
pub use aggregate::{
    Aggregator, BayesAggregator, FellegiSunterAggregator, FieldOutcome, MultiplyAggregator,
    SumAggregator,
};
pub use config::{ParsedMatchers, SessionConfig};
pub use error::{ConfigError, Result};
pub use measure::{Measure, MeasureConfig, MeasureKind, MeasureRegistry, Orientation};
pub use session::{DocumentSource, Explanation, FieldExplanation, ScoringSession};
pub use spec::{
    AggregationMode, BayesParams, FellegiSunterParams, FieldMatchSpec, NullHandling, ScoreMode,
    WeightedParams,
};
