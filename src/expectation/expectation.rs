use std::fmt::{self, Display};

use crate::{
    expectation::value_matcher::ValueMatcher, harness::response_capture::ResponseCapture,
    json_path::json_path::JsonPath,
};

const MISSING: &str = "<missing>";

#[derive(Debug, Clone, PartialEq)]
pub enum HeaderMatcher {
    Equals(String),
    Contains(String),
}

/// A single declarative check against a captured response.
#[derive(Debug, Clone, PartialEq)]
pub enum Expectation {
    Status(u16),
    /// Response parameters such as `charset` are only checked when the expected
    /// value names them.
    ContentType(String),
    Header {
        name: String,
        matcher: HeaderMatcher,
    },
    Body {
        path: String,
        matcher: ValueMatcher,
    },
}

/// Expected and actual renderings of a failed check.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    pub expected: String,
    pub actual: String,
}

impl Expectation {
    pub fn status(code: u16) -> Self {
        Expectation::Status(code)
    }

    pub fn content_type(media_type: impl Into<String>) -> Self {
        Expectation::ContentType(media_type.into())
    }

    pub fn header_equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Expectation::Header {
            name: name.into(),
            matcher: HeaderMatcher::Equals(value.into()),
        }
    }

    pub fn header_contains(name: impl Into<String>, value: impl Into<String>) -> Self {
        Expectation::Header {
            name: name.into(),
            matcher: HeaderMatcher::Contains(value.into()),
        }
    }

    pub fn body(path: impl Into<String>, matcher: ValueMatcher) -> Self {
        Expectation::Body {
            path: path.into(),
            matcher,
        }
    }

    pub fn evaluate(&self, capture: &ResponseCapture) -> Result<(), Mismatch> {
        match self {
            Expectation::Status(expected) => {
                let actual = capture.status();
                check(actual == *expected, expected, actual)
            }
            Expectation::ContentType(expected) => match capture.content_type() {
                Some(actual) => check(content_type_matches(expected, actual), expected, actual),
                None => check(false, expected, MISSING),
            },
            Expectation::Header { name, matcher } => {
                let actual = capture.header(name);
                let (holds, expected) = match matcher {
                    HeaderMatcher::Equals(v) => (actual == Some(v.as_str()), format!("'{}'", v)),
                    HeaderMatcher::Contains(v) => (
                        actual.is_some_and(|a| a.contains(v.as_str())),
                        format!("containing '{}'", v),
                    ),
                };
                let actual = actual
                    .map(|a| format!("'{}'", a))
                    .unwrap_or_else(|| MISSING.to_string());
                check(holds, expected, actual)
            }
            Expectation::Body { path, matcher } => evaluate_body(capture, path, matcher),
        }
    }
}

fn evaluate_body(capture: &ResponseCapture, path: &str, matcher: &ValueMatcher) -> Result<(), Mismatch> {
    let fail = |actual: String| {
        Err(Mismatch {
            expected: matcher.to_string(),
            actual,
        })
    };

    let json_path = match JsonPath::parse(path) {
        Ok(json_path) => json_path,
        Err(e) => return fail(e.to_string()),
    };
    let json = match capture.json() {
        Ok(json) => json,
        Err(e) => return fail(e.to_string()),
    };
    let value = match json_path.resolve(json) {
        Ok(value) => value,
        Err(e) => return fail(e.to_string()),
    };

    match matcher.matches(value) {
        Ok(true) => Ok(()),
        Ok(false) => fail(value.to_string()),
        Err(reason) => fail(reason),
    }
}

/// Media types compare case-insensitively. Parameters are compared only when
/// the expected value names some, and then as an unordered set.
fn content_type_matches(expected: &str, actual: &str) -> bool {
    let (expected_type, expected_params) = parse_media_type(expected);
    let (actual_type, actual_params) = parse_media_type(actual);

    expected_type == actual_type && (expected_params.is_empty() || expected_params == actual_params)
}

fn parse_media_type(raw: &str) -> (String, Vec<(String, String)>) {
    let mut parts = raw.split(';');
    let media_type = parts.next().unwrap_or_default().trim().to_ascii_lowercase();

    let mut params: Vec<(String, String)> = parts
        .filter_map(|param| {
            let (name, value) = param.split_once('=')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim().trim_matches('"');
            // charset values are case-insensitive, other parameter values are not
            let value = if name == "charset" {
                value.to_ascii_lowercase()
            } else {
                value.to_string()
            };
            Some((name, value))
        })
        .collect();
    params.sort();

    (media_type, params)
}

fn check(holds: bool, expected: impl Display, actual: impl Display) -> Result<(), Mismatch> {
    if holds {
        Ok(())
    } else {
        Err(Mismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

impl Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Status(code) => write!(f, "status code {}", code),
            Expectation::ContentType(media_type) => write!(f, "content type {}", media_type),
            Expectation::Header { name, matcher } => match matcher {
                HeaderMatcher::Equals(v) => write!(f, "header '{}' equal to '{}'", name, v),
                HeaderMatcher::Contains(v) => write!(f, "header '{}' containing '{}'", name, v),
            },
            Expectation::Body { path, matcher } => {
                let path = if path.trim().is_empty() { "$" } else { path.as_str() };
                write!(f, "body '{}' {}", path, matcher)
            }
        }
    }
}
