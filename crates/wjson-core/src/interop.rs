//! Bridges to the serde ecosystem.
//!
//! [`Value`] implements `Serialize`, so it can be handed to any serde format
//! (the CLI pretty-prints through `serde_json`). Strings and keys are rendered
//! lossily: an unpaired surrogate becomes U+FFFD.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Number};

use crate::value::{List, Object, Value};
use crate::wide::WideString;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i32(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => s.serialize(serializer),
            Value::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for item in list {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(object) => {
                let mut map = serializer.serialize_map(Some(object.len()))?;
                for (key, item) in object {
                    map.serialize_entry(key, item)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for WideString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_lossy())
    }
}

/// Non-finite floats have no JSON number form and become `null`.
impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => serde_json::Value::Number(Number::from(*i)),
            Value::Float(f) => Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.to_string_lossy()),
            Value::List(list) => {
                serde_json::Value::Array(list.iter().map(serde_json::Value::from).collect())
            }
            Value::Object(object) => {
                let map: Map<String, serde_json::Value> = object
                    .iter()
                    .map(|(key, item)| (key.to_string_lossy(), serde_json::Value::from(item)))
                    .collect();
                serde_json::Value::Object(map)
            }
        }
    }
}

/// Integers within `i32` become `Integer`; every other number becomes `Float`.
impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::Number(n) => match n.as_i64().map(i32::try_from) {
                Some(Ok(i)) => Value::Integer(i),
                _ => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::from(s.as_str()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from).collect::<List>())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, item)| (WideString::from(key.as_str()), Value::from(item)))
                    .collect::<Object>(),
            ),
        }
    }
}
