//! Measure catalogue

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// How a measure's scalar should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// Higher is closer, typically in [0, 1]
    Similarity,
    /// Lower is closer, >= 0 and not always bounded above
    Distance,
}

impl Orientation {
    /// Whether `score` counts as a match against `threshold`.
    ///
    /// Similarity matches at or above the threshold, distance at or below.
    #[inline]
    pub fn is_match(self, score: f64, threshold: f64) -> bool {
        match self {
            Self::Similarity => score >= threshold,
            Self::Distance => score <= threshold,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Similarity => write!(f, "similarity"),
            Self::Distance => write!(f, "distance"),
        }
    }
}

/// Every measure name the registry recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeasureKind {
    // Similarity-oriented
    CosineSimilarity,
    DiceSimilarity,
    JaccardSimilarity,
    JaroWinklerSimilarity,
    NormalizedLevenshteinSimilarity,
    NormalizedLcsSimilarity,
    RatcliffObershelp,

    // Distance-oriented
    Levenshtein,
    NormalizedLevenshteinDistance,
    DamerauLevenshtein,
    OptimalStringAlignment,
    JaroWinklerDistance,
    LongestCommonSubsequence,
    NormalizedLcsDistance,
    MetricLcs,
    #[serde(rename = "ngram")]
    NGram,
    #[serde(rename = "qgram")]
    QGram,
    CosineDistance,
    DiceDistance,
    JaccardDistance,
}

impl MeasureKind {
    pub const ALL: [MeasureKind; 20] = [
        Self::CosineSimilarity,
        Self::DiceSimilarity,
        Self::JaccardSimilarity,
        Self::JaroWinklerSimilarity,
        Self::NormalizedLevenshteinSimilarity,
        Self::NormalizedLcsSimilarity,
        Self::RatcliffObershelp,
        Self::Levenshtein,
        Self::NormalizedLevenshteinDistance,
        Self::DamerauLevenshtein,
        Self::OptimalStringAlignment,
        Self::JaroWinklerDistance,
        Self::LongestCommonSubsequence,
        Self::NormalizedLcsDistance,
        Self::MetricLcs,
        Self::NGram,
        Self::QGram,
        Self::CosineDistance,
        Self::DiceDistance,
        Self::JaccardDistance,
    ];

    /// Configuration identifier, e.g. `"jaro-winkler-similarity"`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CosineSimilarity => "cosine-similarity",
            Self::DiceSimilarity => "dice-similarity",
            Self::JaccardSimilarity => "jaccard-similarity",
            Self::JaroWinklerSimilarity => "jaro-winkler-similarity",
            Self::NormalizedLevenshteinSimilarity => "normalized-levenshtein-similarity",
            Self::NormalizedLcsSimilarity => "normalized-lcs-similarity",
            Self::RatcliffObershelp => "ratcliff-obershelp",
            Self::Levenshtein => "levenshtein",
            Self::NormalizedLevenshteinDistance => "normalized-levenshtein-distance",
            Self::DamerauLevenshtein => "damerau-levenshtein",
            Self::OptimalStringAlignment => "optimal-string-alignment",
            Self::JaroWinklerDistance => "jaro-winkler-distance",
            Self::LongestCommonSubsequence => "longest-common-subsequence",
            Self::NormalizedLcsDistance => "normalized-lcs-distance",
            Self::MetricLcs => "metric-lcs",
            Self::NGram => "ngram",
            Self::QGram => "qgram",
            Self::CosineDistance => "cosine-distance",
            Self::DiceDistance => "dice-distance",
            Self::JaccardDistance => "jaccard-distance",
        }
    }

    /// Orientation, fixed per name
    pub fn orientation(&self) -> Orientation {
        match self {
            Self::CosineSimilarity
            | Self::DiceSimilarity
            | Self::JaccardSimilarity
            | Self::JaroWinklerSimilarity
            | Self::NormalizedLevenshteinSimilarity
            | Self::NormalizedLcsSimilarity
            | Self::RatcliffObershelp => Orientation::Similarity,

            Self::Levenshtein
            | Self::NormalizedLevenshteinDistance
            | Self::DamerauLevenshtein
            | Self::OptimalStringAlignment
            | Self::JaroWinklerDistance
            | Self::LongestCommonSubsequence
            | Self::NormalizedLcsDistance
            | Self::MetricLcs
            | Self::NGram
            | Self::QGram
            | Self::CosineDistance
            | Self::DiceDistance
            | Self::JaccardDistance => Orientation::Distance,
        }
    }

    pub fn is_distance(&self) -> bool {
        self.orientation() == Orientation::Distance
    }

    pub fn is_similarity(&self) -> bool {
        self.orientation() == Orientation::Similarity
    }
}

impl FromStr for MeasureKind {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| ConfigError::UnknownMeasure(name.to_string()))
    }
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
