//! A deliberately small JSON-path dialect.
//!
//! Supported forms: `$` (or an empty string) for the whole document, `field`,
//! `$.field`, `owner.login`, `[0].name` and `items[2][0].id`. Wildcards,
//! filters and slices are not supported.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use serde_json::Value;

use crate::json_path::error::JsonPathError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Field(String),
    Index(usize),
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => write!(f, "{}", name),
            Segment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    raw: String,
    segments: Vec<Segment>,
}

impl JsonPath {
    pub fn parse(raw: &str) -> Result<Self, JsonPathError> {
        let trimmed = raw.trim();
        let rest = match trimmed.strip_prefix('$') {
            Some("") => "",
            Some(after_root) => match after_root.strip_prefix('.') {
                Some("") => return Err(invalid(raw, "empty segment after '$.'")),
                Some(rest) => rest,
                None if after_root.starts_with('[') => after_root,
                None => return Err(invalid(raw, "expected '.' or '[' after '$'")),
            },
            None => trimmed,
        };

        let mut segments = Vec::new();
        if !rest.is_empty() {
            for part in rest.split('.') {
                parse_part(part, raw, &mut segments)?;
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Walks `root` segment by segment. A field lookup on a non-object or an
    /// index lookup on a non-array counts as not found.
    pub fn resolve<'a>(&self, root: &'a Value) -> Result<&'a Value, JsonPathError> {
        let mut current = root;
        let mut walked = String::new();

        for segment in &self.segments {
            if matches!(segment, Segment::Field(_)) && !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(&segment.to_string());

            let next = match segment {
                Segment::Field(name) => current.as_object().and_then(|o| o.get(name)),
                Segment::Index(index) => current.as_array().and_then(|a| a.get(*index)),
            };

            current = next.ok_or_else(|| JsonPathError::NotFound {
                path: self.raw.clone(),
                segment: walked.clone(),
            })?;
        }

        Ok(current)
    }
}

impl FromStr for JsonPath {
    type Err = JsonPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JsonPath::parse(s)
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.raw.trim().is_empty() {
            write!(f, "$")
        } else {
            write!(f, "{}", self.raw)
        }
    }
}

fn invalid(raw: &str, reason: &str) -> JsonPathError {
    JsonPathError::Invalid {
        path: raw.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_part(part: &str, raw: &str, segments: &mut Vec<Segment>) -> Result<(), JsonPathError> {
    let reject = |reason: &str| invalid(raw, reason);

    if part.is_empty() {
        return Err(reject("empty segment"));
    }

    let (name, mut brackets) = match part.find('[') {
        Some(start) => (&part[..start], &part[start..]),
        None => (part, ""),
    };

    if name.contains(']') {
        return Err(reject("unexpected ']'"));
    }
    if !name.is_empty() {
        segments.push(Segment::Field(name.to_string()));
    }

    while !brackets.is_empty() {
        let end = brackets.find(']').ok_or_else(|| reject("unclosed '['"))?;
        let index = brackets[1..end]
            .trim()
            .parse::<usize>()
            .map_err(|_| reject("array index must be a non-negative integer"))?;
        segments.push(Segment::Index(index));

        brackets = &brackets[end + 1..];
        if !brackets.is_empty() && !brackets.starts_with('[') {
            return Err(reject("unexpected characters after ']'"));
        }
    }

    Ok(())
}
