//! Tagged lookup key for "id or label" path segments.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// How a record is addressed: by numeric id or by its label
/// (module `name`, turn `turn`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    ById(i64),
    ByLabel(String),
}

impl FromStr for LookupKey {
    type Err = Infallible;

    /// Segments made only of ASCII digits that fit an i64 are ids; anything
    /// else (including `-1`, `007x`, or overflowing digits) is a label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(id) = s.parse::<i64>() {
                return Ok(LookupKey::ById(id));
            }
        }
        Ok(LookupKey::ByLabel(s.to_string()))
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::ById(id) => write!(f, "id {id}"),
            LookupKey::ByLabel(label) => write!(f, "'{label}'"),
        }
    }
}
