//! MeasureRegistry - memoized measure construction

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;
use tracing::debug;

use super::algorithms::{
    Cosine, Damerau, JaroWinkler, Jaccard, Levenshtein, LongestCommonSubsequence, MetricLcs,
    NGram, NormalizedLcs, NormalizedLevenshtein, OptimalStringAlignment, QGram,
    RatcliffObershelp, SorensenDice, StringDistance, StringSimilarity,
};
use super::kind::{MeasureKind, Orientation};
use super::normalize;
use crate::error::Result;

/// Construction parameters shared by every measure in a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasureConfig {
    /// Shingle length for cosine, jaccard, dice and qgram
    pub shingle_size: usize,
    /// Gram length for the Kondrak n-gram distance
    pub ngram_size: usize,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            shingle_size: 3,
            ngram_size: 2,
        }
    }
}

/// The scalar-producing half of a measure, tagged by orientation
#[derive(Clone)]
enum Scorer {
    Similarity(Arc<dyn StringSimilarity>),
    Distance(Arc<dyn StringDistance>),
}

impl Scorer {
    fn data_ptr(&self) -> *const () {
        match self {
            Self::Similarity(s) => Arc::as_ptr(s) as *const (),
            Self::Distance(d) => Arc::as_ptr(d) as *const (),
        }
    }
}

/// A constructed measure. Cheap to clone; clones share the comparator.
#[derive(Clone)]
pub struct Measure {
    kind: MeasureKind,
    scorer: Scorer,
}

impl Measure {
    fn build(kind: MeasureKind, config: &MeasureConfig) -> Self {
        let k = config.shingle_size;
        let scorer = match kind {
            MeasureKind::CosineSimilarity => Scorer::Similarity(Arc::new(Cosine::new(k))),
            MeasureKind::DiceSimilarity => Scorer::Similarity(Arc::new(SorensenDice::new(k))),
            MeasureKind::JaccardSimilarity => Scorer::Similarity(Arc::new(Jaccard::new(k))),
            MeasureKind::JaroWinklerSimilarity => Scorer::Similarity(Arc::new(JaroWinkler)),
            MeasureKind::NormalizedLevenshteinSimilarity => {
                Scorer::Similarity(Arc::new(NormalizedLevenshtein))
            }
            MeasureKind::NormalizedLcsSimilarity => {
                Scorer::Similarity(Arc::new(NormalizedLcs::default()))
            }
            MeasureKind::RatcliffObershelp => Scorer::Similarity(Arc::new(RatcliffObershelp)),

            MeasureKind::Levenshtein => Scorer::Distance(Arc::new(Levenshtein)),
            MeasureKind::NormalizedLevenshteinDistance => {
                Scorer::Distance(Arc::new(NormalizedLevenshtein))
            }
            MeasureKind::DamerauLevenshtein => Scorer::Distance(Arc::new(Damerau)),
            MeasureKind::OptimalStringAlignment => {
                Scorer::Distance(Arc::new(OptimalStringAlignment))
            }
            MeasureKind::JaroWinklerDistance => Scorer::Distance(Arc::new(JaroWinkler)),
            MeasureKind::LongestCommonSubsequence => {
                Scorer::Distance(Arc::new(LongestCommonSubsequence))
            }
            MeasureKind::NormalizedLcsDistance => {
                Scorer::Distance(Arc::new(NormalizedLcs::default()))
            }
            MeasureKind::MetricLcs => Scorer::Distance(Arc::new(MetricLcs)),
            MeasureKind::NGram => Scorer::Distance(Arc::new(NGram::new(config.ngram_size))),
            MeasureKind::QGram => Scorer::Distance(Arc::new(QGram::new(k))),
            MeasureKind::CosineDistance => Scorer::Distance(Arc::new(Cosine::new(k))),
            MeasureKind::DiceDistance => Scorer::Distance(Arc::new(SorensenDice::new(k))),
            MeasureKind::JaccardDistance => Scorer::Distance(Arc::new(Jaccard::new(k))),
        };
        Self { kind, scorer }
    }

    pub fn kind(&self) -> MeasureKind {
        self.kind
    }

    pub fn orientation(&self) -> Orientation {
        match self.scorer {
            Scorer::Similarity(_) => Orientation::Similarity,
            Scorer::Distance(_) => Orientation::Distance,
        }
    }

    /// Compare two strings after trimming and lower-casing both
    pub fn compare(&self, left: &str, right: &str) -> f64 {
        let left = normalize(left);
        let right = normalize(right);
        match &self.scorer {
            Scorer::Similarity(s) => s.similarity(&left, &right),
            Scorer::Distance(d) => d.distance(&left, &right),
        }
    }

    /// Orientation-aware threshold test
    #[inline]
    pub fn is_match(&self, score: f64, threshold: f64) -> bool {
        self.orientation().is_match(score, threshold)
    }

    /// Whether both handles point at the same constructed comparator
    pub fn same_instance(&self, other: &Measure) -> bool {
        std::ptr::eq(self.scorer.data_ptr(), other.scorer.data_ptr())
    }
}

impl fmt::Debug for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Measure")
            .field("kind", &self.kind)
            .field("orientation", &self.orientation())
            .finish()
    }
}

/// Thread-safe, lazily populated measure table.
///
/// At most one [`Measure`] is constructed per name for the registry's
/// lifetime, even under concurrent first use.
pub struct MeasureRegistry {
    config: MeasureConfig,
    cache: RwLock<AHashMap<MeasureKind, Measure>>,
}

impl Default for MeasureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasureRegistry {
    /// Create a registry with default measure parameters
    pub fn new() -> Self {
        Self::with_config(MeasureConfig::default())
    }

    pub fn with_config(config: MeasureConfig) -> Self {
        Self {
            config,
            cache: RwLock::new(AHashMap::new()),
        }
    }

    /// Look up a measure by configuration name
    pub fn resolve(&self, name: &str) -> Result<Measure> {
        let kind = name.parse::<MeasureKind>()?;
        Ok(self.get(kind))
    }

    /// Get the measure for `kind`, constructing it on first use
    pub fn get(&self, kind: MeasureKind) -> Measure {
        if let Some(measure) = self.cache.read().get(&kind) {
            return measure.clone();
        }

        // Re-check under the write lock: another thread may have won the race
        let mut cache = self.cache.write();
        cache
            .entry(kind)
            .or_insert_with(|| {
                debug!(measure = %kind, "constructing measure");
                Measure::build(kind, &self.config)
            })
            .clone()
    }

    /// Normalize, compare and return the raw scalar
    pub fn match_score(&self, name: &str, left: &str, right: &str) -> Result<f64> {
        Ok(self.resolve(name)?.compare(left, right))
    }

    /// True only for recognized distance-oriented names.
    ///
    /// Pure classification: nothing is constructed.
    pub fn is_distance_oriented(&self, name: &str) -> bool {
        name.parse::<MeasureKind>()
            .map(|kind| kind.is_distance())
            .unwrap_or(false)
    }

    /// True only for recognized similarity-oriented names
    pub fn is_similarity_oriented(&self, name: &str) -> bool {
        name.parse::<MeasureKind>()
            .map(|kind| kind.is_similarity())
            .unwrap_or(false)
    }

    /// Number of measures constructed so far
    pub fn cached(&self) -> usize {
        self.cache.read().len()
    }
}

impl fmt::Debug for MeasureRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeasureRegistry")
            .field("config", &self.config)
            .field("cached", &self.cached())
            .finish()
    }
}
