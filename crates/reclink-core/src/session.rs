//! Compiled scoring sessions
//!
//! A [`ScoringSession`] is built once from a configuration payload and then
//! scores any number of documents. The aggregator is picked at compile time,
//! so the per-document path never looks at the mode string again.
//!
//! Sessions are `Send + Sync`; one session can be shared by every worker
//! thread scoring its own partition of documents.
//!
//! ```rust
//! use std::collections::HashMap;
//! use reclink_core::ScoringSession;
//! use serde_json::json;
//!
//! let session = ScoringSession::compile(&json!({
//!     "score_mode": "multiply",
//!     "matchers": [
//!         {"field": "surname", "value": "Smith", "matcher": "normalized-levenshtein-similarity"}
//!     ]
//! }))
//! .unwrap();
//!
//! let doc = HashMap::from([("surname".to_string(), "SMITH ".to_string())]);
//! assert_eq!(session.score(&doc), 1.0);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, trace};

#[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
use rayon::prelude::*;

use crate::aggregate::{
    evaluate, Aggregator, BayesAggregator, FellegiSunterAggregator, FieldOutcome,
    MultiplyAggregator, SumAggregator,
};
use crate::config::{self, ParsedMatchers, SessionConfig};
use crate::error::Result;
use crate::measure::{MeasureKind, MeasureRegistry};
use crate::spec::{AggregationMode, FieldMatchSpec, ScoreMode};

/// Batches at least this large are scored on the rayon pool
#[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
const PARALLEL_THRESHOLD: usize = 256;

/// Field lookup for one document. `None` means the field is absent.
pub trait DocumentSource {
    fn field_value(&self, field: &str) -> Option<String>;
}

impl DocumentSource for HashMap<String, String> {
    fn field_value(&self, field: &str) -> Option<String> {
        self.get(field).cloned()
    }
}

impl DocumentSource for BTreeMap<String, String> {
    fn field_value(&self, field: &str) -> Option<String> {
        self.get(field).cloned()
    }
}

impl DocumentSource for Map<String, Value> {
    fn field_value(&self, field: &str) -> Option<String> {
        match self.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(config::text(value)),
        }
    }
}

impl DocumentSource for Value {
    fn field_value(&self, field: &str) -> Option<String> {
        self.as_object().and_then(|doc| doc.field_value(field))
    }
}

/// Per-field breakdown of one score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldExplanation {
    pub field: String,
    pub measure: MeasureKind,
    pub outcome: FieldOutcome,
    /// Running total after this field
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explanation {
    pub mode: ScoreMode,
    pub score: f64,
    pub fields: Vec<FieldExplanation>,
}

/// Object-safe view of a typed aggregator plus its field specs
trait Pipeline: Send + Sync {
    fn len(&self) -> usize;
    fn fields(&self) -> Vec<&str>;
    fn score(&self, doc: &dyn DocumentSource, registry: &MeasureRegistry) -> f64;
    fn explain(&self, doc: &dyn DocumentSource, registry: &MeasureRegistry) -> Explanation;
}

struct Compiled<A: Aggregator> {
    aggregator: A,
    specs: Vec<FieldMatchSpec<A::Params>>,
}

impl<A: Aggregator> Compiled<A> {
    fn outcome(
        spec: &FieldMatchSpec<A::Params>,
        doc: &dyn DocumentSource,
        registry: &MeasureRegistry,
    ) -> FieldOutcome {
        let value = doc.field_value(spec.field()).unwrap_or_default();
        let outcome = evaluate(spec, &value, registry);
        trace!(field = spec.field(), measure = %spec.measure(), ?outcome, "field scored");
        outcome
    }
}

impl<A: Aggregator> Pipeline for Compiled<A> {
    fn len(&self) -> usize {
        self.specs.len()
    }

    fn fields(&self) -> Vec<&str> {
        self.specs.iter().map(|spec| spec.field()).collect()
    }

    fn score(&self, doc: &dyn DocumentSource, registry: &MeasureRegistry) -> f64 {
        self.specs.iter().fold(self.aggregator.start(), |total, spec| {
            let outcome = Self::outcome(spec, doc, registry);
            self.aggregator.accumulate(total, spec, outcome)
        })
    }

    fn explain(&self, doc: &dyn DocumentSource, registry: &MeasureRegistry) -> Explanation {
        let mut total = self.aggregator.start();
        let mut fields = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let outcome = Self::outcome(spec, doc, registry);
            total = self.aggregator.accumulate(total, spec, outcome);
            fields.push(FieldExplanation {
                field: spec.field().to_string(),
                measure: spec.measure(),
                outcome,
                total,
            });
        }
        Explanation {
            mode: self.aggregator.mode(),
            score: total,
            fields,
        }
    }
}

/// A validated configuration bound to its aggregator and measure cache
pub struct ScoringSession {
    mode: AggregationMode,
    registry: Arc<MeasureRegistry>,
    pipeline: Box<dyn Pipeline>,
}

impl ScoringSession {
    /// Validate and compile a JSON session payload
    pub fn compile(payload: &Value) -> Result<Self> {
        Ok(Self::from_config(SessionConfig::from_value(payload)?))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_config(SessionConfig::from_json(json)?))
    }

    /// Compile with a fresh measure cache
    pub fn from_config(config: SessionConfig) -> Self {
        Self::with_registry(config, Arc::new(MeasureRegistry::new()))
    }

    /// Compile against an existing measure cache
    pub fn with_registry(config: SessionConfig, registry: Arc<MeasureRegistry>) -> Self {
        let mode = config.mode();
        let pipeline: Box<dyn Pipeline> = match config.into_matchers() {
            ParsedMatchers::FellegiSunter { base_score, specs } => Box::new(Compiled {
                aggregator: FellegiSunterAggregator::new(base_score),
                specs,
            }),
            ParsedMatchers::Bayes(specs) => Box::new(Compiled {
                aggregator: BayesAggregator,
                specs,
            }),
            ParsedMatchers::Multiply(specs) => Box::new(Compiled {
                aggregator: MultiplyAggregator,
                specs,
            }),
            ParsedMatchers::Sum(specs) => Box::new(Compiled {
                aggregator: SumAggregator,
                specs,
            }),
        };

        info!(
            mode = %mode.score_mode(),
            fields = pipeline.len(),
            "scoring session compiled"
        );

        Self {
            mode,
            registry,
            pipeline,
        }
    }

    /// Score one document
    pub fn score(&self, doc: &dyn DocumentSource) -> f64 {
        self.pipeline.score(doc, &self.registry)
    }

    /// Score one document and report how each field contributed
    pub fn explain(&self, doc: &dyn DocumentSource) -> Explanation {
        self.pipeline.explain(doc, &self.registry)
    }

    /// Score many documents, in input order
    #[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
    pub fn score_batch<D: DocumentSource + Sync>(&self, documents: &[D]) -> Vec<f64> {
        if documents.len() >= PARALLEL_THRESHOLD {
            documents.par_iter().map(|doc| self.score(doc)).collect()
        } else {
            self.score_sequential(documents)
        }
    }

    /// Score many documents, in input order
    #[cfg(any(target_arch = "wasm32", not(feature = "parallel")))]
    pub fn score_batch<D: DocumentSource + Sync>(&self, documents: &[D]) -> Vec<f64> {
        self.score_sequential(documents)
    }

    fn score_sequential<D: DocumentSource>(&self, documents: &[D]) -> Vec<f64> {
        documents.iter().map(|doc| self.score(doc)).collect()
    }

    /// The host's own relevance score is never an input
    pub fn needs_score(&self) -> bool {
        false
    }

    pub fn mode(&self) -> AggregationMode {
        self.mode
    }

    pub fn registry(&self) -> &Arc<MeasureRegistry> {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.pipeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipeline.len() == 0
    }

    /// Configured field names, in scoring order
    pub fn fields(&self) -> Vec<&str> {
        self.pipeline.fields()
    }
}

impl std::fmt::Debug for ScoringSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringSession")
            .field("mode", &self.mode)
            .field("fields", &self.fields())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{FellegiSunterParams, WeightedParams};
    use serde_json::json;

    fn doc(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_json_document_source() {
        let value = json!({"name": "Ann", "age": 42, "missing": null});
        assert_eq!(value.field_value("name"), Some("Ann".into()));
        assert_eq!(value.field_value("age"), Some("42".into()));
        assert_eq!(value.field_value("missing"), None);
        assert_eq!(value.field_value("absent"), None);
        assert_eq!(json!([1, 2]).field_value("name"), None);
    }

    #[test]
    fn test_absent_field_is_empty() {
        let session = ScoringSession::compile(&json!({
            "score_mode": "sum",
            "matchers": [{"field": "city", "value": "Oslo", "matcher": "levenshtein",
                          "null_handling": "greedy"}]
        }))
        .unwrap();
        assert_eq!(session.score(&doc(&[])), 1.0);
        assert_eq!(session.score(&doc(&[("city", "")])), 1.0);
    }

    #[test]
    fn test_explain_matches_score() {
        let session = ScoringSession::compile(&json!({
            "score_mode": "fellegi-sunter",
            "base_score": 0,
            "matchers": [
                {"field": "first", "value": "anna", "matcher": "jaro-winkler-similarity",
                 "threshold": 0.9, "m_value": 0.9, "u_value": 0.1},
                {"field": "last", "value": "berg", "matcher": "levenshtein",
                 "threshold": 1, "m_value": 0.8, "u_value": 0.2}
            ]
        }))
        .unwrap();
        let d = doc(&[("first", "Anna"), ("last", "burg")]);
        let explanation = session.explain(&d);

        assert_eq!(explanation.mode, ScoreMode::FellegiSunter);
        assert_eq!(explanation.score, session.score(&d));
        assert_eq!(explanation.fields.len(), 2);
        assert_eq!(explanation.fields[0].outcome, FieldOutcome::Measured(1.0));
        assert_eq!(explanation.fields[1].outcome, FieldOutcome::Measured(1.0));
        assert_eq!(explanation.fields[1].total, explanation.score);
    }

    #[test]
    fn test_session_surface() {
        let session = ScoringSession::from_json(
            r#"{"score_mode": "bayes", "matchers": [
                {"field": "a", "value": "x", "matcher": "cosine-similarity", "high": 0.9, "low": 0.1}
            ]}"#,
        )
        .unwrap();
        assert!(!session.needs_score());
        assert_eq!(session.mode(), AggregationMode::Bayes);
        assert_eq!(session.fields(), vec!["a"]);
        assert_eq!(session.len(), 1);
        assert!(!session.is_empty());
    }

    #[test]
    fn test_score_batch_preserves_order() {
        let session = ScoringSession::compile(&json!({
            "score_mode": "sum",
            "matchers": [{"field": "k", "value": "abc", "matcher": "levenshtein"}]
        }))
        .unwrap();
        let docs = vec![doc(&[("k", "abc")]), doc(&[("k", "abd")]), doc(&[("k", "xyz")])];
        assert_eq!(session.score_batch(&docs), vec![0.0, 1.0, 3.0]);
    }

    #[test]
    fn test_mode_matches_aggregator() {
        let specs = vec![FieldMatchSpec::new(
            "k",
            "abc",
            MeasureKind::Levenshtein,
            FellegiSunterParams::new(0.9, 0.1, 1.0),
        )];
        let session = ScoringSession::from_config(SessionConfig::from(
            ParsedMatchers::FellegiSunter {
                base_score: 5.0,
                specs,
            },
        ));
        assert_eq!(session.mode(), AggregationMode::FellegiSunter { base_score: 5.0 });

        let explanation = session.explain(&doc(&[("k", "abc")]));
        assert_eq!(explanation.mode, session.mode().score_mode());
        assert!((explanation.score - (5.0 + 9f64.log10())).abs() < 1e-12);

        let session = ScoringSession::from_config(SessionConfig::from(ParsedMatchers::Sum(vec![
            FieldMatchSpec::new("k", "abc", MeasureKind::Levenshtein, WeightedParams::default()),
        ])));
        assert_eq!(session.mode(), AggregationMode::Sum);
        assert_eq!(session.explain(&doc(&[("k", "abd")])).mode, ScoreMode::Sum);
        assert_eq!(session.score(&doc(&[("k", "abd")])), 1.0);
    }

    #[test]
    fn test_shared_registry() {
        let registry = Arc::new(MeasureRegistry::new());
        let config = SessionConfig::from_value(&json!({
            "score_mode": "sum",
            "matchers": [{"field": "k", "value": "abc", "matcher": "levenshtein"}]
        }))
        .unwrap();
        let session = ScoringSession::with_registry(config, Arc::clone(&registry));
        session.score(&doc(&[("k", "abd")]));
        assert_eq!(registry.cached(), 1);
    }
}
