//! # wjson-core
//!
//! A JSON decoder and encoder that works on **canonical wide text** (UTF-16 code
//! units), with a transcoding bridge so payloads in any byte encoding can be
//! parsed and written back.
//!
//! ## Quick start
//!
//! ```rust
//! use wjson_core::{decode, decode_with_encoding, encode, Value};
//!
//! // UTF-8 bytes → Value
//! let value = decode(r#"{"name":"Zoë","tags":["a","b"]}"#).unwrap();
//! assert_eq!(*value.get("name").unwrap(), "Zoë");
//!
//! // Latin-1 bytes → Value
//! let latin1 = decode_with_encoding(b"\"Zo\xeb\"", "ISO-8859-1").unwrap();
//! assert_eq!(latin1, Value::from("Zoë"));
//!
//! // Value → UTF-8 bytes (compact, keys in order)
//! assert_eq!(encode(&value).unwrap(), r#"{"name":"Zoë","tags":["a","b"]}"#.as_bytes());
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value` sum type and its narrowing views
//! - [`decoder`]: bytes / wide text → `Value`
//! - [`encoder`]: `Value` → wide text / bytes
//! - [`codec`]: `TextCodec`, byte encoding ⇄ wide text
//! - [`wide`]: `WideString`, the canonical wide text
//! - [`error`]: error taxonomy rooted at `JsonError`
//! - [`interop`]: `Serialize` and `serde_json::Value` conversions

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod interop;
pub mod value;
pub mod wide;

pub use codec::{TextCodec, DEFAULT_ENCODING};
pub use decoder::{decode, decode_wide, decode_with_encoding, MAX_DEPTH};
pub use encoder::{encode, encode_string, encode_wide, encode_with_encoding};
pub use error::{CodecError, JsonError, ParseError, Result, ValueTypeError};
pub use value::{List, Object, Value, ValueType};
pub use wide::WideString;
