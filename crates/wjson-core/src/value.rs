//! The JSON value model.
//!
//! [`Value`] is a closed sum type over JSON's seven kinds of data. Containers own
//! their children exclusively, so `clone()` is a deep copy and two values never
//! alias. Narrowing to a native type goes through the `as_*` views (or the
//! equivalent `TryFrom` impls), which apply a small numeric-tower relaxation:
//!
//! | from \ to | bool        | i32        | f64 | container |
//! |-----------|-------------|------------|-----|-----------|
//! | Null      | `false`     | `0`        | ✗   | ✗         |
//! | Boolean   | ✓           | `0` / `1`  | ✗   | ✗         |
//! | Integer   | `!= 0`      | ✓          | ✗   | ✗         |
//! | Float     | ✗           | truncated  | ✓   | ✗         |
//!
//! Everything else fails with [`ValueTypeError`].

use std::collections::BTreeMap;
use std::fmt;

use crate::codec::TextCodec;
use crate::error::{Result, ValueTypeError};
use crate::wide::WideString;

/// Ordered sequence of values; duplicates allowed.
pub type List = Vec<Value>;

/// Mapping from key to value, ordered by key code units.
pub type Object = BTreeMap<WideString, Value>;

/// Discriminant of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Boolean,
    Integer,
    Float,
    String,
    List,
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Null => "null",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::String => "string",
            ValueType::List => "list",
            ValueType::Object => "object",
        };
        f.write_str(name)
    }
}

/// One decoded JSON node.
///
/// Equality requires equal discriminants and structurally equal payloads; an
/// `Integer(1)` is never equal to a `Float(1.0)`, and floats compare with plain
/// `==`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Boolean(bool),
    Integer(i32),
    Float(f64),
    String(WideString),
    List(List),
    Object(Object),
}

impl Value {
    /// Build a string value from exactly `units`, embedded NULs included.
    pub fn from_units(units: &[u16]) -> Self {
        Value::String(WideString::from_units(units))
    }

    /// Build a string value from bytes in the named encoding.
    pub fn from_bytes(bytes: &[u8], encoding: &str) -> Result<Self> {
        let mut codec = TextCodec::new(encoding)?;
        Ok(Value::String(codec.decode(bytes)?))
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::List(_) => ValueType::List,
            Value::Object(_) => ValueType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Exchange the state of two values without copying payloads.
    pub fn swap(&mut self, other: &mut Value) {
        std::mem::swap(self, other);
    }

    /// Install `value` and return the previous state.
    pub fn replace(&mut self, value: impl Into<Value>) -> Value {
        std::mem::replace(self, value.into())
    }

    /// Take the current state, leaving `Null` behind.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    pub fn as_bool(&self) -> std::result::Result<bool, ValueTypeError> {
        match self {
            Value::Null => Ok(false),
            Value::Boolean(b) => Ok(*b),
            Value::Integer(i) => Ok(*i != 0),
            _ => Err(self.mismatch(ValueType::Boolean)),
        }
    }

    /// Floats truncate toward zero, saturating at the `i32` bounds.
    pub fn as_int(&self) -> std::result::Result<i32, ValueTypeError> {
        match self {
            Value::Null => Ok(0),
            Value::Boolean(b) => Ok(i32::from(*b)),
            Value::Integer(i) => Ok(*i),
            Value::Float(f) => Ok(*f as i32),
            _ => Err(self.mismatch(ValueType::Integer)),
        }
    }

    pub fn as_float(&self) -> std::result::Result<f64, ValueTypeError> {
        match self {
            Value::Float(f) => Ok(*f),
            _ => Err(self.mismatch(ValueType::Float)),
        }
    }

    pub fn as_wide(&self) -> std::result::Result<&WideString, ValueTypeError> {
        match self {
            Value::String(s) => Ok(s),
            _ => Err(self.mismatch(ValueType::String)),
        }
    }

    pub fn as_list(&self) -> std::result::Result<&List, ValueTypeError> {
        match self {
            Value::List(list) => Ok(list),
            _ => Err(self.mismatch(ValueType::List)),
        }
    }

    pub fn as_object(&self) -> std::result::Result<&Object, ValueTypeError> {
        match self {
            Value::Object(object) => Ok(object),
            _ => Err(self.mismatch(ValueType::Object)),
        }
    }

    /// Look up `key` when this value is an object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(object) => object.get(&WideString::from(key)),
            _ => None,
        }
    }

    fn mismatch(&self, expected: ValueType) -> ValueTypeError {
        ValueTypeError {
            expected,
            found: self.value_type(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<WideString> for Value {
    fn from(s: WideString) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(WideString::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(WideString::from(s))
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(object)
    }
}

impl TryFrom<&Value> for bool {
    type Error = ValueTypeError;

    fn try_from(value: &Value) -> std::result::Result<Self, Self::Error> {
        value.as_bool()
    }
}

impl TryFrom<&Value> for i32 {
    type Error = ValueTypeError;

    fn try_from(value: &Value) -> std::result::Result<Self, Self::Error> {
        value.as_int()
    }
}

impl TryFrom<&Value> for f64 {
    type Error = ValueTypeError;

    fn try_from(value: &Value) -> std::result::Result<Self, Self::Error> {
        value.as_float()
    }
}

impl<'a> TryFrom<&'a Value> for &'a WideString {
    type Error = ValueTypeError;

    fn try_from(value: &'a Value) -> std::result::Result<Self, Self::Error> {
        value.as_wide()
    }
}

impl<'a> TryFrom<&'a Value> for &'a List {
    type Error = ValueTypeError;

    fn try_from(value: &'a Value) -> std::result::Result<Self, Self::Error> {
        value.as_list()
    }
}

impl<'a> TryFrom<&'a Value> for &'a Object {
    type Error = ValueTypeError;

    fn try_from(value: &'a Value) -> std::result::Result<Self, Self::Error> {
        value.as_object()
    }
}

impl TryFrom<Value> for WideString {
    type Error = ValueTypeError;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(other.mismatch(ValueType::String)),
        }
    }
}

impl TryFrom<Value> for List {
    type Error = ValueTypeError;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::List(list) => Ok(list),
            other => Err(other.mismatch(ValueType::List)),
        }
    }
}

impl TryFrom<Value> for Object {
    type Error = ValueTypeError;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        match value {
            Value::Object(object) => Ok(object),
            other => Err(other.mismatch(ValueType::Object)),
        }
    }
}

// Narrowing comparisons: a failed narrowing compares unequal.

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool().is_ok_and(|b| b == *other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        self.as_int().is_ok_and(|i| i == *other)
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        self.as_float().is_ok_and(|f| f == *other)
    }
}

impl PartialEq<WideString> for Value {
    fn eq(&self, other: &WideString) -> bool {
        self.as_wide().is_ok_and(|s| s == other)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_wide().is_ok_and(|s| s == other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<List> for Value {
    fn eq(&self, other: &List) -> bool {
        self.as_list().is_ok_and(|list| list == other)
    }
}

impl PartialEq<Object> for Value {
    fn eq(&self, other: &Object) -> bool {
        self.as_object().is_ok_and(|object| object == other)
    }
}

/// Compact JSON text, as produced by [`encode_string`](crate::encoder::encode_string).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::encoder::encode_string(self))
    }
}
