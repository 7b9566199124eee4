//! Property tests for measures and the registry
//!
//! Checks that hold for every catalogue name: orientation is fixed by the
//! name, resolution is cached, and identical operands score as closest.

use proptest::prelude::*;
use reclink_core::measure::algorithms::{NormalizedLcs, StringDistance, StringSimilarity};
use reclink_core::{MeasureKind, MeasureRegistry, Orientation};

fn arb_measure() -> impl Strategy<Value = MeasureKind> {
    proptest::sample::select(MeasureKind::ALL.to_vec())
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn test_normalized_lcs_complement(a in "\\PC{1,24}", b in "\\PC{1,24}") {
        let lcs = NormalizedLcs::default();
        let total = lcs.similarity(&a, &b) + lcs.distance(&a, &b);
        prop_assert!((total - 1.0).abs() < 1e-12, "sum was {}", total);
    }

    #[test]
    fn test_normalized_lcs_complement_through_registry(a in "[a-zA-Z ]{1,16}", b in "[a-zA-Z ]{1,16}") {
        let registry = MeasureRegistry::new();
        let sim = registry.match_score("normalized-lcs-similarity", &a, &b).unwrap();
        let dist = registry.match_score("normalized-lcs-distance", &a, &b).unwrap();
        prop_assert!((sim + dist - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_is_idempotent(kind in arb_measure()) {
        let registry = MeasureRegistry::new();
        let first = registry.resolve(kind.as_str()).unwrap();
        let second = registry.resolve(kind.as_str()).unwrap();
        prop_assert!(first.same_instance(&second));
        prop_assert_eq!(registry.cached(), 1);
    }

    #[test]
    fn test_orientation_is_a_function_of_name(kind in arb_measure()) {
        let one = MeasureRegistry::new();
        let other = MeasureRegistry::new();
        let name = kind.as_str();

        prop_assert_eq!(one.is_distance_oriented(name), other.is_distance_oriented(name));
        prop_assert_eq!(one.is_distance_oriented(name), kind.orientation() == Orientation::Distance);
        prop_assert_ne!(one.is_distance_oriented(name), one.is_similarity_oriented(name));
    }

    #[test]
    fn test_identical_operands_are_closest(kind in arb_measure(), s in "[a-z]{3,12}") {
        let registry = MeasureRegistry::new();
        let measure = registry.get(kind);
        let score = measure.compare(&s, &s.to_uppercase());
        match kind.orientation() {
            Orientation::Similarity => prop_assert!((score - 1.0).abs() < 1e-12, "{} gave {}", kind, score),
            Orientation::Distance => prop_assert!(score.abs() < 1e-12, "{} gave {}", kind, score),
        }
    }

    #[test]
    fn test_unknown_names_have_no_orientation(name in "[a-z]{1,6}-[0-9]{1,3}") {
        let registry = MeasureRegistry::new();
        prop_assert!(registry.resolve(&name).is_err());
        prop_assert!(!registry.is_distance_oriented(&name));
        prop_assert!(!registry.is_similarity_oriented(&name));
    }
}
