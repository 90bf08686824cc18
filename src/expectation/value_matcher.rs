use std::fmt::{self, Display};

use regex::Regex;
use serde_json::{Number, Value};

/// Predicate applied to the value found at a JSON path.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueMatcher {
    EqualTo(Value),
    NotEqualTo(Value),
    /// Numeric comparison, exact when both sides are integers. A non-numeric
    /// value never matches.
    GreaterThan(Number),
    NotNull,
    /// The whole string must match, as if the pattern were anchored.
    MatchesPattern(String),
    /// Non-empty array, object or string.
    NotEmpty,
}

impl ValueMatcher {
    pub fn equal_to(value: impl Into<Value>) -> Self {
        ValueMatcher::EqualTo(value.into())
    }

    pub fn not_equal_to(value: impl Into<Value>) -> Self {
        ValueMatcher::NotEqualTo(value.into())
    }

    pub fn greater_than(bound: impl Into<Number>) -> Self {
        ValueMatcher::GreaterThan(bound.into())
    }

    pub fn matches_pattern(pattern: impl Into<String>) -> Self {
        ValueMatcher::MatchesPattern(pattern.into())
    }

    /// `Err` carries a reason the check could not run at all, such as an
    /// invalid pattern.
    pub fn matches(&self, actual: &Value) -> Result<bool, String> {
        match self {
            ValueMatcher::EqualTo(expected) => Ok(actual == expected),
            ValueMatcher::NotEqualTo(expected) => Ok(actual != expected),
            ValueMatcher::GreaterThan(bound) => Ok(greater_than(actual, bound)),
            ValueMatcher::NotNull => Ok(!actual.is_null()),
            ValueMatcher::MatchesPattern(pattern) => {
                let regex = Regex::new(&format!("^(?:{})$", pattern))
                    .map_err(|e| format!("invalid pattern '{}': {}", pattern, e))?;
                Ok(actual.as_str().is_some_and(|s| regex.is_match(s)))
            }
            ValueMatcher::NotEmpty => Ok(match actual {
                Value::Array(items) => !items.is_empty(),
                Value::Object(fields) => !fields.is_empty(),
                Value::String(s) => !s.is_empty(),
                _ => false,
            }),
        }
    }
}

fn greater_than(actual: &Value, bound: &Number) -> bool {
    let Value::Number(actual) = actual else {
        return false;
    };

    match (as_integer(actual), as_integer(bound)) {
        (Some(a), Some(b)) => a > b,
        _ => match (actual.as_f64(), bound.as_f64()) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        },
    }
}

fn as_integer(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

impl Display for ValueMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueMatcher::EqualTo(value) => write!(f, "equal to {}", value),
            ValueMatcher::NotEqualTo(value) => write!(f, "not equal to {}", value),
            ValueMatcher::GreaterThan(bound) => write!(f, "greater than {}", bound),
            ValueMatcher::NotNull => write!(f, "not null"),
            ValueMatcher::MatchesPattern(pattern) => write!(f, "matching /{}/", pattern),
            ValueMatcher::NotEmpty => write!(f, "not empty"),
        }
    }
}
