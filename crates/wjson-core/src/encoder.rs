//! JSON encoder: [`Value`] → canonical wide text → bytes.
//!
//! Output is compact (no insignificant whitespace) and deterministic: object
//! members come out in key order.
//!
//! - Floats use the shortest representation that reads back to the same
//!   `f64`, always with a `.` or an exponent so they decode as `Float` again.
//!   NaN and the infinities have no JSON form and are written as `null`.
//! - Strings escape `"`, `\`, control characters, and unpaired surrogates. The
//!   output therefore never holds a lone surrogate and always transcodes to a
//!   Unicode encoding.
//!
//! # Example
//! ```
//! use wjson_core::{decode, encode_string};
//! let value = decode(r#"{ "b": [1, 2.5], "a": "x\ty" }"#).unwrap();
//! assert_eq!(encode_string(&value), r#"{"a":"x\ty","b":[1,2.5]}"#);
//! ```

use crate::codec::{TextCodec, DEFAULT_ENCODING};
use crate::error::Result;
use crate::value::Value;
use crate::wide::WideString;

/// Encode a value to UTF-8 JSON bytes.
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    encode_with_encoding(value, DEFAULT_ENCODING)
}

/// Encode a value to JSON bytes in the named encoding.
///
/// Fails when the encoding is unknown or cannot represent a character of the
/// output.
pub fn encode_with_encoding(value: &Value, encoding: &str) -> Result<Vec<u8>> {
    let mut codec = TextCodec::new(encoding)?;
    let text = encode_wide(value);
    Ok(codec.encode(text.as_units())?)
}

/// Encode a value to canonical wide text.
pub fn encode_wide(value: &Value) -> WideString {
    let mut out = WideString::new();
    encode_value(value, &mut out);
    out
}

/// Encode a value to a Rust string.
pub fn encode_string(value: &Value) -> String {
    // Lone surrogates are escaped, so the conversion is lossless.
    encode_wide(value).to_string_lossy()
}

fn encode_value(value: &Value, out: &mut WideString) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Boolean(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(i) => out.push_str(&i.to_string()),
        Value::Float(f) => encode_float(*f, out),
        Value::String(s) => encode_string_literal(s.as_units(), out),
        Value::List(list) => {
            out.push_str("[");
            for (i, item) in list.iter().enumerate() {
                if i > 0 {
                    out.push_str(",");
                }
                encode_value(item, out);
            }
            out.push_str("]");
        }
        Value::Object(object) => {
            out.push_str("{");
            for (i, (key, item)) in object.iter().enumerate() {
                if i > 0 {
                    out.push_str(",");
                }
                encode_string_literal(key.as_units(), out);
                out.push_str(":");
                encode_value(item, out);
            }
            out.push_str("}");
        }
    }
}

fn encode_float(f: f64, out: &mut WideString) {
    if !f.is_finite() {
        out.push_str("null");
        return;
    }
    let mut buf = ryu::Buffer::new();
    out.push_str(buf.format_finite(f));
}

/// Quote and escape one string. Well-formed surrogate pairs pass through;
/// everything that is not printable becomes `\uXXXX`.
fn encode_string_literal(units: &[u16], out: &mut WideString) {
    out.push_str("\"");
    let mut i = 0;
    while i < units.len() {
        let unit = units[i];
        match unit {
            0x22 => out.push_str("\\\""),
            0x5C => out.push_str("\\\\"),
            0x08 => out.push_str("\\b"),
            0x0C => out.push_str("\\f"),
            0x0A => out.push_str("\\n"),
            0x0D => out.push_str("\\r"),
            0x09 => out.push_str("\\t"),
            0x00..=0x1F | 0x7F..=0x9F => push_unicode_escape(unit, out),
            0xD800..=0xDBFF => match units.get(i + 1) {
                Some(&low) if (0xDC00..=0xDFFF).contains(&low) => {
                    out.push(unit);
                    out.push(low);
                    i += 1;
                }
                _ => push_unicode_escape(unit, out),
            },
            0xDC00..=0xDFFF => push_unicode_escape(unit, out),
            _ => out.push(unit),
        }
        i += 1;
    }
    out.push_str("\"");
}

fn push_unicode_escape(unit: u16, out: &mut WideString) {
    out.push_str(&format!("\\u{:04x}", unit));
}
