//! String measures
//!
//! Twenty named comparison measures behind one scalar-producing interface.
//! Each name has a fixed [`Orientation`]:
//!
//! - **Similarity** (higher = closer): cosine-similarity, dice-similarity,
//!   jaccard-similarity, jaro-winkler-similarity,
//!   normalized-levenshtein-similarity, normalized-lcs-similarity,
//!   ratcliff-obershelp
//! - **Distance** (lower = closer): levenshtein,
//!   normalized-levenshtein-distance, damerau-levenshtein,
//!   optimal-string-alignment, jaro-winkler-distance,
//!   longest-common-subsequence, normalized-lcs-distance, metric-lcs, ngram,
//!   qgram, cosine-distance, dice-distance, jaccard-distance
//!
//! Operands are always trimmed and lower-cased before comparison.
//!
//! # Example
//!
//! ```rust
//! use reclink_core::measure::MeasureRegistry;
//!
//! let registry = MeasureRegistry::new();
//! let jw = registry.resolve("jaro-winkler-similarity").unwrap();
//! assert_eq!(jw.compare(" Smith", "SMITH "), 1.0);
//! assert!(registry.is_distance_oriented("levenshtein"));
//! ```

pub mod algorithms;
mod kind;
mod registry;

pub use algorithms::{StringDistance, StringSimilarity};
pub use kind::{MeasureKind, Orientation};
pub use registry::{Measure, MeasureConfig, MeasureRegistry};

/// Trim surrounding whitespace and lower-case (locale independent)
#[inline]
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Hello World\n"), "hello world");
        assert_eq!(normalize("   "), "");
        // Turkish dotted capital I maps the same way regardless of locale
        assert_eq!(normalize("İ"), "i\u{307}");
    }
}
