use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scalar field value extracted from a tabular record.
///
/// This is the common currency between record types and the table-view
/// engine: filtering compares display strings, sorting compares values with
/// [`FieldValue::compare`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// A UTF-8 string.
    Str(String),
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A boolean value.
    Bool(bool),
    /// A UTC timestamp.
    Time(DateTime<Utc>),
}

impl FieldValue {
    /// Returns a human-readable display string for the value.
    ///
    /// This is the string the filter matches against and the string a
    /// presentation layer would render in a cell.
    pub fn display_string(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Time(t) => t.to_rfc3339(),
        }
    }

    /// Returns a string representation of the value type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Time(_) => "time",
        }
    }

    /// Total ordering over field values.
    ///
    /// Same-type values compare naturally (lexicographic for strings,
    /// numeric for numbers, chronological for timestamps). `Int` and `Float`
    /// compare numerically across variants. Mixed types otherwise order by a
    /// fixed variant rank so sorting never panics on heterogeneous columns.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Time(a), Self::Time(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            #[allow(clippy::cast_precision_loss)]
            (Self::Int(a), Self::Float(b)) => {
                (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            #[allow(clippy::cast_precision_loss)]
            (Self::Float(a), Self::Int(b)) => {
                a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal)
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Int(_) | Self::Float(_) => 1,
            Self::Time(_) => 2,
            Self::Str(_) => 3,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        Self::Time(t)
    }
}

/// A record that can flow through the table-view engine.
///
/// Implementations expose named fields as [`FieldValue`]s; the engine never
/// needs to know the concrete record shape beyond its id and the fields a
/// query names.
pub trait Tabular {
    /// The record's unique id.
    fn id(&self) -> &str;

    /// Look up a field by name. Returns `None` for unknown fields.
    fn field(&self, key: &str) -> Option<FieldValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_strings() {
        assert_eq!(FieldValue::Str("abc".into()).display_string(), "abc");
        assert_eq!(FieldValue::Int(42).display_string(), "42");
        assert_eq!(FieldValue::Bool(true).display_string(), "true");
    }

    #[test]
    fn string_comparison_is_lexicographic() {
        let a = FieldValue::Str("apple".into());
        let b = FieldValue::Str("banana".into());
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn numeric_comparison_crosses_variants() {
        let a = FieldValue::Int(2);
        let b = FieldValue::Float(10.5);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
    }

    #[test]
    fn time_comparison_is_chronological() {
        let early = FieldValue::Time("2024-01-01T00:00:00Z".parse().unwrap());
        let late = FieldValue::Time("2024-06-01T00:00:00Z".parse().unwrap());
        assert_eq!(early.compare(&late), Ordering::Less);
    }
}
