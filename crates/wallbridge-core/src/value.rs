// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Loosely-typed argument payload received from the application layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A dynamically-typed value as delivered over the method channel.
///
/// The variant set mirrors what the application layer's message codec can
/// carry: scalars, strings, raw byte buffers, lists, and string-keyed maps.
/// Handlers never consume a `Value` directly; the router decodes it into a
/// strongly-typed argument struct first.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up `key` in a map value.
    ///
    /// A missing key and an explicit `Null` both read as `None`; anything that
    /// is not a map has no keys.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()
            .and_then(|map| map.get(key))
            .filter(|value| !value.is_null())
    }

    /// Short type name used in log fields and error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Self::Map(value)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// JSON has no byte-buffer type, so arrays always become lists.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Deserialized through `serde_json::Value`; arrays always read back as
/// `List`, never `Bytes`.
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_treats_null_as_absent() {
        let value: Value = [("width", Value::Null), ("height", Value::Int(4))]
            .into_iter()
            .collect();
        assert!(value.get("width").is_none());
        assert!(value.get("missing").is_none());
        assert_eq!(value.get("height").and_then(Value::as_int), Some(4));
    }

    #[test]
    fn deserializes_from_json_text() {
        let value: Value =
            serde_json::from_str(r#"{"width": 100, "segments": ["pics", "a.png"], "x": null}"#)
                .unwrap();
        assert_eq!(value.get("width").and_then(Value::as_int), Some(100));
        assert_eq!(
            value.get("segments"),
            Some(&Value::List(vec![Value::from("pics"), Value::from("a.png")]))
        );
        assert!(value.get("x").is_none());
    }

    #[test]
    fn get_on_non_map_is_none() {
        assert!(Value::from("text").get("bytes").is_none());
        assert!(Value::Null.get("bytes").is_none());
    }

    #[test]
    fn json_conversion_keeps_shape() {
        let value = Value::from(json!({
            "segments": ["pics", "a.png"],
            "width": 100,
            "ratio": 0.5,
        }));
        let segments = value.get("segments").and_then(Value::as_list).unwrap();
        assert_eq!(segments, &[Value::from("pics"), Value::from("a.png")]);
        assert_eq!(value.get("width").and_then(Value::as_int), Some(100));
        assert_eq!(value.get("ratio"), Some(&Value::Float(0.5)));
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Bytes(vec![1]).type_name(), "bytes");
        assert_eq!(Value::List(vec![]).type_name(), "list");
        assert_eq!(Value::default().type_name(), "null");
    }
}
