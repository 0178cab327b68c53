//! Document filtering.
//!
//! A [`Query`] holds two blocks of field predicates, both keyed by top-level
//! document field name:
//!
//! - `match`: deep equality, with "subset" semantics for objects and
//!   "contains" semantics when a scalar is compared against an array.
//! - `like`: case-insensitive substring search for strings.
//!
//! A document passes when every field in both blocks passes. Fields missing
//! from the document fail.
//!
//! ```text
//! {"match": {"category": "Electronics"}, "like": {"name": "pro"}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A filter applied by `Collection::scan_all`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Deep-equality predicates, per field.
    #[serde(rename = "match", default, skip_serializing_if = "Map::is_empty")]
    pub match_fields: Map<String, Value>,
    /// Case-insensitive containment predicates, per field.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub like: Map<String, Value>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `match` predicate on `field`.
    pub fn matching(mut self, field: impl Into<String>, value: Value) -> Self {
        self.match_fields.insert(field.into(), value);
        self
    }

    /// Add a `like` predicate on `field`.
    pub fn like(mut self, field: impl Into<String>, value: Value) -> Self {
        self.like.insert(field.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.match_fields.is_empty() && self.like.is_empty()
    }

    /// Check whether `doc` satisfies every predicate.
    ///
    /// `match` fields are evaluated before `like` fields; evaluation stops at
    /// the first failing field.
    pub fn accepts(&self, doc: &Value) -> bool {
        if self.is_empty() {
            return true;
        }
        let Value::Object(fields) = doc else {
            return false;
        };

        let field_passes = |block: &Map<String, Value>, pred: fn(&Value, &Value) -> bool| {
            block
                .iter()
                .all(|(name, wanted)| fields.get(name).is_some_and(|v| pred(v, wanted)))
        };

        field_passes(&self.match_fields, matches) && field_passes(&self.like, like)
    }
}

/// Deep equality between a document value and a query value.
///
/// - Scalar query: contained in an array document, otherwise strictly equal.
/// - Array query: array document of the same length, matching index by index.
/// - Object query: object document holding every query key with a matching value.
///   Extra document keys are ignored.
pub fn matches(doc: &Value, query: &Value) -> bool {
    match query {
        Value::Array(wanted) => match doc {
            Value::Array(items) => {
                items.len() == wanted.len()
                    && items.iter().zip(wanted).all(|(item, w)| matches(item, w))
            }
            _ => false,
        },
        Value::Object(wanted) => match doc {
            Value::Object(fields) => wanted
                .iter()
                .all(|(key, w)| fields.get(key).is_some_and(|v| matches(v, w))),
            _ => false,
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            scalar_matches(doc, query)
        }
    }
}

/// Case-insensitive similarity between a document value and a query value.
///
/// - String query: substring of a string document, or of any string element
///   of an array document.
/// - Other scalars: same as [`matches`].
/// - Object query: object document, recursing per key. Arrays never match.
/// - Array query: not supported, never matches.
pub fn like(doc: &Value, query: &Value) -> bool {
    match query {
        Value::String(needle) => {
            let needle = needle.to_lowercase();
            match doc {
                Value::String(text) => text.to_lowercase().contains(&needle),
                Value::Array(items) => items
                    .iter()
                    .filter_map(Value::as_str)
                    .any(|text| text.to_lowercase().contains(&needle)),
                _ => false,
            }
        }
        Value::Object(wanted) => match doc {
            Value::Object(fields) => wanted
                .iter()
                .all(|(key, w)| fields.get(key).is_some_and(|v| like(v, w))),
            _ => false,
        },
        Value::Array(_) => false,
        Value::Null | Value::Bool(_) | Value::Number(_) => scalar_matches(doc, query),
    }
}

fn scalar_matches(doc: &Value, wanted: &Value) -> bool {
    match doc {
        Value::Array(items) => items.iter().any(|item| strict_eq(item, wanted)),
        _ => strict_eq(doc, wanted),
    }
}

/// Equality without coercion between types. Numbers compare by value, so
/// `1` and `1.0` are equal.
fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                x.as_f64() == y.as_f64()
            }
        }
        _ => a == b,
    }
}
