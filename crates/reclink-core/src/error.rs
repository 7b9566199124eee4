//! Configuration error types
//!
//! Every error here is raised while a session compiles. Once a
//! [`ScoringSession`](crate::ScoringSession) exists, scoring a document
//! cannot fail.

use thiserror::Error;

use crate::spec::ScoreMode;

/// Errors raised while validating and parsing a scoring session payload
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// `score_mode` is not one of the recognized identifiers
    #[error(
        "invalid score_mode '{0}': expected one of fellegi-sunter, bayes, multiply or sum"
    )]
    InvalidScoreMode(String),

    /// A session-level property is absent
    #[error("missing parameter [{0}]")]
    MissingSessionProperty(&'static str),

    /// A per-matcher property required by the score mode is absent
    #[error("invalid matcher configuration for {mode} (matcher #{index}): missing [{property}] property")]
    MissingFieldProperty {
        index: usize,
        mode: ScoreMode,
        property: &'static str,
    },

    /// The measure name is not in the registry catalogue
    #[error("the matcher [{0}] is not supported")]
    UnknownMeasure(String),

    /// A numeric property is neither a number nor a numeric string
    #[error("property [{property}] must be numeric, got {value}")]
    InvalidNumber {
        property: &'static str,
        value: String,
    },

    /// A numeric property lies outside the range its mode allows
    #[error("property [{property}] is out of range: {value} (expected {expected})")]
    OutOfRange {
        property: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// A null handling policy name is not recognized
    #[error("invalid null handling '{0}': expected one of off, conservative, greedy or moderate")]
    InvalidNullHandling(String),

    /// `matchers` is not a list of objects
    #[error("invalid matchers: {0}")]
    InvalidMatchers(String),

    /// The payload is not a JSON object
    #[error("invalid session payload: {0}")]
    InvalidPayload(String),
}

impl ConfigError {
    /// The property this error names, if it names one
    pub fn property(&self) -> Option<&'static str> {
        match self {
            Self::MissingSessionProperty(property) => Some(property),
            Self::MissingFieldProperty { property, .. } => Some(property),
            Self::InvalidNumber { property, .. } => Some(property),
            Self::OutOfRange { property, .. } => Some(property),
            _ => None,
        }
    }
}

/// Result type for session configuration
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offender() {
        let err = ConfigError::InvalidScoreMode("median".into());
        assert!(err.to_string().contains("'median'"));

        let err = ConfigError::MissingFieldProperty {
            index: 2,
            mode: ScoreMode::FellegiSunter,
            property: "m_value",
        };
        assert_eq!(
            err.to_string(),
            "invalid matcher configuration for fellegi-sunter (matcher #2): missing [m_value] property"
        );
        assert_eq!(err.property(), Some("m_value"));
    }

    #[test]
    fn test_out_of_range_message() {
        let err = ConfigError::OutOfRange {
            property: "u_value",
            value: 0.0,
            expected: "a probability strictly between 0 and 1",
        };
        assert_eq!(
            err.to_string(),
            "property [u_value] is out of range: 0 (expected a probability strictly between 0 and 1)"
        );
        assert_eq!(err.property(), Some("u_value"));
    }

    #[test]
    fn test_property_is_none_for_unknown_measure() {
        let err = ConfigError::UnknownMeasure("soundex".into());
        assert_eq!(err.property(), None);
        assert_eq!(err.to_string(), "the matcher [soundex] is not supported");
    }
}
