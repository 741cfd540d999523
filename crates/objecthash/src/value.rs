//! The closed value model that the hasher dispatches over.

use crate::digest::Digest;
use crate::error::{ObjectHashError, Result};
use crate::redact::redaction_marker;
use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fmt;

/// A JSON-like value, extended with sets and redacted subtrees.
///
/// `Set` is stored as a plain sequence and may contain duplicates; only the
/// hash imposes set semantics, by collapsing elements with equal digests.
/// Values are trees: there is no way to build a cycle, and recursion depth
/// while hashing equals nesting depth.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Dict(BTreeMap<String, Value>),
    Set(Vec<Value>),
    /// A subtree replaced by its digest.
    Redacted(Digest),
}

/// Which of the supported kinds a value is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    String,
    List,
    Dict,
    Set,
    Redacted,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::List => "list",
            ValueKind::Dict => "dict",
            ValueKind::Set => "set",
            ValueKind::Redacted => "redacted",
        };
        f.write_str(name)
    }
}

/// How JSON numbers are mapped onto `Int` and `Float`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonMode {
    /// Every number becomes a `Float`, so `1` and `1.0` hash the same.
    #[default]
    Common,
    /// Integer literals stay `Int`; only fractional or exponent literals
    /// become `Float`.
    Python,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
            Value::List(_) => ValueKind::List,
            Value::Dict(_) => ValueKind::Dict,
            Value::Set(_) => ValueKind::Set,
            Value::Redacted(_) => ValueKind::Redacted,
        }
    }

    /// True for the scalar kinds (everything that is not a container).
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Value::List(_) | Value::Dict(_) | Value::Set(_))
    }

    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Set(items.into_iter().map(Into::into).collect())
    }

    pub fn dict<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<Value>,
    {
        Value::Dict(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Convert a decoded JSON tree.
    ///
    /// Objects become `Dict`, arrays `List`, strings `String`. Numbers follow
    /// `mode`.
    pub fn from_json(json: serde_json::Value, mode: JsonMode) -> Result<Self> {
        Ok(match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => number_to_value(&n, mode)?,
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| Value::from_json(item, mode))
                    .collect::<Result<_>>()?,
            ),
            serde_json::Value::Object(map) => Value::Dict(
                map.into_iter()
                    .map(|(k, v)| Ok((k, Value::from_json(v, mode)?)))
                    .collect::<Result<_>>()?,
            ),
        })
    }

    /// Turn every `Int` into the `Float` of the same value.
    ///
    /// This is what a JSON round trip does to numbers, applied in memory, so
    /// the result hashes like common JSON. Sets keep their kind.
    pub fn commonize(self) -> Self {
        match self {
            Value::Int(i) => Value::Float(i as f64),
            Value::List(items) => Value::List(items.into_iter().map(Value::commonize).collect()),
            Value::Set(items) => Value::Set(items.into_iter().map(Value::commonize).collect()),
            Value::Dict(entries) => Value::Dict(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, v.commonize()))
                    .collect(),
            ),
            other => other,
        }
    }
}

fn number_to_value(n: &serde_json::Number, mode: JsonMode) -> Result<Value> {
    // Numbers keep their literal text, so Python mode types them the way
    // the literal is spelled: `-0` is the integer zero and integers wider
    // than 64 bits stay integers.
    let literal = n.to_string();
    if mode == JsonMode::Python && !literal.contains(['.', 'e', 'E']) {
        if let Ok(i) = literal.parse::<i128>() {
            return Ok(Value::Int(i));
        }
    }
    n.as_f64().map(Value::Float).ok_or_else(|| {
        ObjectHashError::UnsupportedType(format!("number {literal} has no finite f64 form"))
    })
}

/// Serializes as plain JSON: sets become arrays and redacted subtrees
/// become `**REDACTED**<hex>` marker strings.
///
/// Non-finite floats have no JSON form and fail to serialize.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i128(*i),
            Value::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Float(f) => Err(S::Error::custom(format!(
                "float {f} cannot be represented in JSON"
            ))),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) | Value::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Dict(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Redacted(digest) => serializer.serialize_str(&redaction_marker(digest)),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! impl_from_int {
    ($($int:ty),+) => {
        $(
            impl From<$int> for Value {
                fn from(i: $int) -> Self {
                    Value::Int(i128::from(i))
                }
            }
        )+
    };
}

impl_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(i: isize) -> Self {
        Value::Int(i as i128)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i as i128)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f64::from(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Digest> for Value {
    fn from(d: Digest) -> Self {
        Value::Redacted(d)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<BTreeMap<String, T>> for Value {
    fn from(entries: BTreeMap<String, T>) -> Self {
        Value::dict(entries)
    }
}

impl<T: Into<Value>, S> From<HashMap<String, T, S>> for Value {
    fn from(entries: HashMap<String, T, S>) -> Self {
        Value::dict(entries)
    }
}

impl<T: Into<Value>> From<BTreeSet<T>> for Value {
    fn from(items: BTreeSet<T>) -> Self {
        Value::set(items)
    }
}

impl<T: Into<Value>, S> From<HashSet<T, S>> for Value {
    fn from(items: HashSet<T, S>) -> Self {
        Value::set(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_common_mode_floats_everything() {
        let v = Value::from_json(json!([1, 1.5, -2]), JsonMode::Common).unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Float(1.0),
                Value::Float(1.5),
                Value::Float(-2.0)
            ])
        );
    }

    #[test]
    fn test_from_json_python_mode_keeps_integers() {
        let v = Value::from_json(json!([1, 1.5, -2, u64::MAX]), JsonMode::Python).unwrap();
        assert_eq!(
            v,
            Value::List(vec![
                Value::Int(1),
                Value::Float(1.5),
                Value::Int(-2),
                Value::Int(i128::from(u64::MAX)),
            ])
        );
    }

    #[test]
    fn test_python_mode_types_numbers_by_literal() {
        let parse = |text: &str| {
            let json: serde_json::Value = serde_json::from_str(text).unwrap();
            Value::from_json(json, JsonMode::Python).unwrap()
        };
        assert_eq!(parse("-0"), Value::Int(0));
        assert_eq!(parse("18446744073709551616"), Value::Int(1i128 << 64));
        assert_eq!(parse("-0.0"), Value::Float(-0.0));
        assert_eq!(parse("1E3"), Value::Float(1000.0));
        // Wider than i128: falls back to the nearest double.
        assert_eq!(parse(&format!("1{}", "0".repeat(40))), Value::Float(1e40));
    }

    #[test]
    fn test_number_without_finite_f64_is_unsupported() {
        let json: serde_json::Value = serde_json::from_str("[1e400]").unwrap();
        for mode in [JsonMode::Common, JsonMode::Python] {
            match Value::from_json(json.clone(), mode) {
                Err(ObjectHashError::UnsupportedType(msg)) => assert!(msg.contains("1e400")),
                other => panic!("expected UnsupportedType, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_from_json_objects_and_scalars() {
        let v = Value::from_json(
            json!({"a": null, "b": true, "c": "x", "d": {}}),
            JsonMode::Common,
        )
        .unwrap();
        let expected = Value::dict([
            ("a", Value::Null),
            ("b", Value::Bool(true)),
            ("c", Value::from("x")),
            ("d", Value::Dict(BTreeMap::new())),
        ]);
        assert_eq!(v, expected);
    }

    #[test]
    fn test_commonize_recurses_into_all_containers() {
        let v = Value::list([
            Value::from(1),
            Value::set([Value::from(2)]),
            Value::dict([("k", Value::from(3))]),
            Value::from("s"),
        ]);
        let expected = Value::list([
            Value::Float(1.0),
            Value::set([Value::Float(2.0)]),
            Value::dict([("k", Value::Float(3.0))]),
            Value::from("s"),
        ]);
        assert_eq!(v.commonize(), expected);
    }

    #[test]
    fn test_native_conversions() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
        assert_eq!(Value::from(7u8), Value::Int(7));
        assert_eq!(Value::from(0.5f32), Value::Float(0.5));

        let set: BTreeSet<i64> = [3, 1, 2].into_iter().collect();
        assert_eq!(Value::from(set).kind(), ValueKind::Set);

        let map: HashMap<String, bool> = [("on".to_string(), true)].into_iter().collect();
        assert_eq!(Value::from(map), Value::dict([("on", true)]));
    }

    #[test]
    fn test_serialize_as_plain_json() {
        let v = Value::list([
            Value::set([Value::from(1)]),
            Value::from(2.5),
            Value::Null,
        ]);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[[1],2.5,null]");
    }

    #[test]
    fn test_serialize_rejects_non_finite_float() {
        let v = Value::list([Value::Float(f64::NAN)]);
        assert!(serde_json::to_string(&v).is_err());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Value::Set(vec![]).kind().to_string(), "set");
        assert_eq!(Value::Dict(BTreeMap::new()).kind().to_string(), "dict");
        assert!(Value::Null.is_leaf());
        assert!(!Value::List(vec![]).is_leaf());
    }
}
