//! Per-matcher entry parsing

use serde_json::{Map, Value};

use super::keys;
use crate::error::{ConfigError, Result};
use crate::measure::MeasureKind;
use crate::spec::{
    BayesParams, FellegiSunterParams, FieldMatchSpec, NullHandling, ScoreMode, WeightedParams,
};

type Entry = Map<String, Value>;

/// Mode-specific numeric parameters read from a matcher entry
pub trait MatchParams: Sized {
    /// Keys that must be present beyond field, value and matcher
    const REQUIRED: &'static [&'static str];

    fn from_entry(entry: &Entry) -> Result<Self>;
}

impl MatchParams for FellegiSunterParams {
    const REQUIRED: &'static [&'static str] = &[keys::THRESHOLD, keys::M_VALUE, keys::U_VALUE];

    /// m and u must be open-interval probabilities so both log10 weights stay finite
    fn from_entry(entry: &Entry) -> Result<Self> {
        let m_value = open_probability(keys::M_VALUE, required_number(entry, keys::M_VALUE)?)?;
        let u_value = open_probability(keys::U_VALUE, required_number(entry, keys::U_VALUE)?)?;
        Ok(Self::new(
            m_value,
            u_value,
            required_number(entry, keys::THRESHOLD)?,
        ))
    }
}

impl MatchParams for BayesParams {
    const REQUIRED: &'static [&'static str] = &[keys::HIGH, keys::LOW];

    /// Clamped scores must stay inside [0, 1], clear of the not-scored sentinel
    fn from_entry(entry: &Entry) -> Result<Self> {
        let high = closed_probability(keys::HIGH, required_number(entry, keys::HIGH)?)?;
        let low = closed_probability(keys::LOW, required_number(entry, keys::LOW)?)?;
        if low > high {
            return Err(ConfigError::OutOfRange {
                property: keys::LOW,
                value: low,
                expected: "at most high",
            });
        }
        Ok(Self::new(high, low))
    }
}

impl MatchParams for WeightedParams {
    const REQUIRED: &'static [&'static str] = &[];

    fn from_entry(entry: &Entry) -> Result<Self> {
        Ok(Self::new(
            number(entry, keys::WEIGHT)?.unwrap_or(Self::DEFAULT_WEIGHT),
            number(entry, keys::THRESHOLD)?.unwrap_or(Self::NO_THRESHOLD),
        ))
    }
}

/// Parse every entry for `mode`, failing on the first invalid one
pub fn parse_entries<P: MatchParams>(
    mode: ScoreMode,
    entries: &[Value],
) -> Result<Vec<FieldMatchSpec<P>>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let entry = raw.as_object().ok_or_else(|| {
                ConfigError::InvalidMatchers(format!("matcher #{index} is not an object"))
            })?;
            parse_entry(mode, index, entry)
        })
        .collect()
}

fn parse_entry<P: MatchParams>(
    mode: ScoreMode,
    index: usize,
    entry: &Entry,
) -> Result<FieldMatchSpec<P>> {
    check_required(mode, index, entry, P::REQUIRED)?;

    let field = text_of(entry, keys::FIELD);
    let value = text_of(entry, keys::VALUE);
    let measure: MeasureKind = text_of(entry, keys::MATCHER).parse()?;

    // null_handling_both only counts alongside null_handling
    let (one, both) = match entry.get(keys::NULL_HANDLING) {
        Some(policy) => {
            let one: NullHandling = text(policy).parse()?;
            let both = entry
                .get(keys::NULL_HANDLING_BOTH)
                .map(|p| text(p).parse::<NullHandling>())
                .transpose()?;
            (one, both)
        }
        None => (NullHandling::Off, None),
    };

    let params = P::from_entry(entry)?;
    Ok(FieldMatchSpec::new(field, value, measure, params).with_null_handling(one, both))
}

fn check_required(
    mode: ScoreMode,
    index: usize,
    entry: &Entry,
    mode_keys: &[&'static str],
) -> Result<()> {
    let universal = [keys::FIELD, keys::VALUE, keys::MATCHER];
    for &property in universal.iter().chain(mode_keys) {
        if !entry.contains_key(property) {
            return Err(ConfigError::MissingFieldProperty {
                index,
                mode,
                property,
            });
        }
    }
    Ok(())
}

/// Text form of a scalar; null reads as empty
pub(crate) fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Number or numeric string
pub(crate) fn to_number(property: &'static str, value: &Value) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ConfigError::InvalidNumber {
        property,
        value: value.to_string(),
    })
}

fn text_of(entry: &Entry, property: &str) -> String {
    entry.get(property).map(text).unwrap_or_default()
}

fn number(entry: &Entry, property: &'static str) -> Result<Option<f64>> {
    entry
        .get(property)
        .map(|value| to_number(property, value))
        .transpose()
}

fn required_number(entry: &Entry, property: &'static str) -> Result<f64> {
    match entry.get(property) {
        Some(value) => to_number(property, value),
        None => to_number(property, &Value::Null),
    }
}

fn open_probability(property: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 && value < 1.0 {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            property,
            value,
            expected: "a probability strictly between 0 and 1",
        })
    }
}

fn closed_probability(property: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange {
            property,
            value,
            expected: "a probability between 0 and 1",
        })
    }
}
