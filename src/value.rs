//! Tagged values returned by benchmark candidates.
//!
//! Every candidate materializes its output into a [`Value`] so that results
//! produced by different pipeline styles (hand-rolled loops, iterator chains,
//! itertools, rayon) can be compared structurally. Mappings are backed by
//! `BTreeMap`, which keeps the canonical serialization deterministic.

use serde::Serialize;
use std::collections::BTreeMap;

/// A scalar or a plain nested container.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Build a mapping from key/value pairs.
    pub fn map<K, I>(entries: I) -> Value
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Canonical pretty-printed JSON form. Non-finite floats serialize as
    /// `null`, so two candidates that both overflow compare equal.
    pub fn canonical(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| String::from("null"))
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Number of elements for containers, 0 for scalars.
    pub fn len(&self) -> usize {
        match self {
            Value::Seq(items) => items.len(),
            Value::Map(fields) => fields.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Value {
        Value::Seq(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Value {
        v.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Value {
        Value::Seq(iter.into_iter().collect())
    }
}

/// Walk a container, visiting every element. For elements that are mappings,
/// also descend into the fields named in `nested`. Returns the number of
/// elements visited.
///
/// Consumers call this between timed iterations to force a full traversal of
/// lazy or partially-built results.
pub fn consume(value: &Value, nested: &[&str]) -> usize {
    let mut visited = 0;
    match value {
        Value::Seq(items) => {
            for item in items {
                visited += 1 + descend(item, nested);
            }
        }
        Value::Map(fields) => {
            for item in fields.values() {
                visited += 1 + descend(item, nested);
            }
        }
        _ => {}
    }
    visited
}

fn descend(item: &Value, nested: &[&str]) -> usize {
    let mut visited = 0;
    if let Value::Map(fields) = item {
        for name in nested {
            if let Some(sub) = fields.get(*name) {
                visited += consume(sub, &[]);
            }
        }
    }
    visited
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_scalars() {
        assert_eq!(Value::Null.canonical(), "null");
        assert_eq!(Value::Int(42).canonical(), "42");
        assert_eq!(Value::Str("hi".into()).canonical(), "\"hi\"");
        assert_eq!(Value::Bool(true).canonical(), "true");
    }

    #[test]
    fn test_canonical_non_finite_float_is_null() {
        assert_eq!(Value::Float(f64::INFINITY).canonical(), "null");
        assert_eq!(Value::Float(f64::NAN).canonical(), "null");
    }

    #[test]
    fn test_canonical_map_key_order_is_deterministic() {
        let a = Value::map([("b", Value::Int(2)), ("a", Value::Int(1))]);
        let b = Value::map([("a", Value::Int(1)), ("b", Value::Int(2))]);
        assert_eq!(a.canonical(), b.canonical());
        assert!(a.canonical().find("\"a\"").unwrap() < a.canonical().find("\"b\"").unwrap());
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some(7i64)), Value::Int(7));
    }

    #[test]
    fn test_collect_into_seq() {
        let v: Value = (0..3).map(Value::Int).collect();
        assert_eq!(v, Value::Seq(vec![Value::Int(0), Value::Int(1), Value::Int(2)]));
    }

    #[test]
    fn test_consume_counts_nested_elements() {
        let order = Value::map([
            ("id", Value::Int(1)),
            (
                "items",
                Value::Seq(vec![Value::Int(10), Value::Int(20), Value::Int(30)]),
            ),
        ]);
        let orders = Value::Seq(vec![order.clone(), order]);

        // Two top-level elements, three items under each.
        assert_eq!(consume(&orders, &["items"]), 8);
        assert_eq!(consume(&orders, &[]), 2);
        assert_eq!(consume(&Value::Int(5), &[]), 0);
    }
}
