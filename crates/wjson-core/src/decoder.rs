//! JSON decoder: canonical wide text → [`Value`].
//!
//! A single-pass recursive-descent parser with one character of lookahead. The
//! whole state is a [`Parser`] holding the input slice and a cursor; every
//! production advances the cursor past what it consumed, so nothing is ever
//! rescanned.
//!
//! # Key design decisions
//!
//! - **No float parsing library**: numbers are reconstructed digit by digit.
//!   Without a fraction or exponent the result is an `Integer`; literals outside
//!   the `i32` range widen to `Float` instead of wrapping.
//! - **Raw `\u` escapes**: each `\uXXXX` yields exactly one code unit; surrogate
//!   pairs are not assembled, so lone surrogates survive decoding.
//! - **Strict document**: only whitespace may follow the top-level value.
//! - **Bounded nesting**: lists and objects nest at most [`MAX_DEPTH`] deep;
//!   deeper input is an error rather than unbounded recursion.
//! - **Duplicate keys**: the last occurrence wins.

use tracing::debug;

use crate::codec::{TextCodec, DEFAULT_ENCODING};
use crate::error::{ParseError, Result};
use crate::value::{List, Object, Value};
use crate::wide::WideString;

/// Significant fraction digits beyond this count no longer change an `f64`.
/// Leading zeros are not significant and are always counted.
const MAX_FRACTION_DIGITS: usize = 17;

/// Deepest list/object nesting the decoder accepts.
pub const MAX_DEPTH: usize = 128;

/// Largest power of ten applied in one step by [`scale`]; `10^300` and
/// `10^-300` are both normal doubles.
const SCALE_STEP: i32 = 300;

/// Decode UTF-8 JSON bytes.
///
/// ```
/// use wjson_core::{decode, Value};
///
/// let value = decode(r#"{"scores":[95,87.5]}"#).unwrap();
/// let scores = value.get("scores").unwrap().as_list().unwrap();
/// assert_eq!(scores[0], Value::Integer(95));
/// assert_eq!(scores[1], Value::Float(87.5));
/// ```
pub fn decode(json: impl AsRef<[u8]>) -> Result<Value> {
    decode_with_encoding(json, DEFAULT_ENCODING)
}

/// Decode JSON bytes in the named encoding: transcode to wide text, then parse.
pub fn decode_with_encoding(json: impl AsRef<[u8]>, encoding: &str) -> Result<Value> {
    let mut codec = TextCodec::new(encoding)?;
    let text = codec.decode(json.as_ref())?;
    decode_wide(&text)
}

/// Decode JSON from canonical wide text.
pub fn decode_wide(json: impl AsRef<[u16]>) -> Result<Value> {
    let mut parser = Parser::new(json.as_ref());
    parser.parse_document().map_err(|err| {
        debug!(position = err.position(), "JSON decode failed: {}", err.message());
        err.into()
    })
}

/// Cursor over the input; one method per grammar production.
struct Parser<'a> {
    data: &'a [u16],
    pos: usize,
    depth: usize,
}

type ParseResult<T> = std::result::Result<T, ParseError>;

impl<'a> Parser<'a> {
    fn new(data: &'a [u16]) -> Self {
        Self {
            data,
            pos: 0,
            depth: 0,
        }
    }

    /// The top-level value followed by nothing but whitespace.
    fn parse_document(&mut self) -> ParseResult<Value> {
        let value = self.parse_value()?;
        self.skip_spaces();
        if self.pos < self.data.len() {
            return Err(self.invalid("Unexpected trailing character", self.pos));
        }
        Ok(value)
    }

    /// Current code unit as a `char`; surrogates map to U+FFFD for dispatch.
    fn current(&self) -> Option<char> {
        self.data
            .get(self.pos)
            .map(|&unit| char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Consume `expected` if it is the current character.
    fn eat(&mut self, expected: char) -> bool {
        if self.current() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_spaces(&mut self) {
        while self.current().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn invalid(&self, message: &'static str, position: usize) -> ParseError {
        ParseError::InvalidCharacter { message, position }
    }

    fn eof(&self, message: &'static str) -> ParseError {
        ParseError::UnexpectedEof {
            message,
            position: self.pos,
        }
    }

    fn parse_value(&mut self) -> ParseResult<Value> {
        self.skip_spaces();
        match self.current() {
            Some('t') => self.parse_literal("true", Value::Boolean(true)),
            Some('f') => self.parse_literal("false", Value::Boolean(false)),
            Some('n') => self.parse_literal("null", Value::Null),
            Some('"') => Ok(Value::String(self.parse_string()?)),
            Some('{') => self.nested(Self::parse_object),
            Some('[') => self.nested(Self::parse_array),
            Some(c) if c.is_ascii_digit() || c == '-' => self.parse_number(),
            Some(_) => Err(self.invalid("Invalid character found", self.pos)),
            None => Err(self.eof("Unexpected end of input")),
        }
    }

    /// Run a container production one level deeper.
    fn nested(&mut self, parse: fn(&mut Self) -> ParseResult<Value>) -> ParseResult<Value> {
        if self.depth == MAX_DEPTH {
            return Err(self.invalid("Nesting too deep", self.pos));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Exact-prefix keyword match; the cursor stays put on mismatch.
    fn parse_literal(&mut self, word: &str, value: Value) -> ParseResult<Value> {
        let end = self.pos + word.len();
        let matches = self
            .data
            .get(self.pos..end)
            .is_some_and(|window| window.iter().copied().eq(word.encode_utf16()));
        if !matches {
            return Err(self.invalid("Invalid token found", self.pos));
        }
        self.pos = end;
        Ok(value)
    }

    fn parse_string(&mut self) -> ParseResult<WideString> {
        debug_assert_eq!(self.current(), Some('"'));
        self.pos += 1;

        let mut out = WideString::new();
        loop {
            match self.current() {
                Some('"') => {
                    self.pos += 1;
                    return Ok(out);
                }
                Some('\\') => {
                    self.pos += 1;
                    out.push(self.unescape()?);
                }
                Some(_) => {
                    out.push(self.data[self.pos]);
                    self.pos += 1;
                }
                None => return Err(self.eof("Unexpected end of input")),
            }
        }
    }

    /// Decode the escape whose character is at the cursor (the backslash has
    /// already been consumed).
    fn unescape(&mut self) -> ParseResult<u16> {
        let simple = match self.current() {
            Some('b') => 0x08,
            Some('f') => 0x0C,
            Some('n') => 0x0A,
            Some('r') => 0x0D,
            Some('t') => 0x09,
            Some(c @ ('"' | '\\' | '/')) => c as u16,
            Some('u') => {
                self.pos += 1;
                return self.parse_hex_code();
            }
            Some(_) => return Err(self.invalid("Invalid escape character found", self.pos)),
            None => return Err(self.eof("Unexpected end of input")),
        };
        self.pos += 1;
        Ok(simple)
    }

    fn parse_hex_code(&mut self) -> ParseResult<u16> {
        let mut code: u16 = 0;
        for _ in 0..4 {
            let digit = match self.current() {
                Some(c) => c
                    .to_digit(16)
                    .ok_or_else(|| self.invalid("Invalid hex code", self.pos))?,
                None => return Err(self.eof("Unexpected end of input")),
            };
            code = (code << 4) | digit as u16;
            self.pos += 1;
        }
        Ok(code)
    }

    fn parse_number(&mut self) -> ParseResult<Value> {
        let negative = self.eat('-');

        let integer = match self.current() {
            Some('0') => {
                self.pos += 1;
                0.0
            }
            Some(c) if c.is_ascii_digit() => self.parse_digits(usize::MAX).0,
            _ => return Err(self.invalid("Invalid digit", self.pos)),
        };

        let mut fraction = None;
        if self.eat('.') {
            self.expect_digit()?;
            fraction = Some(self.parse_fraction());
        }

        let mut exponent = None;
        if matches!(self.current(), Some('e' | 'E')) {
            self.pos += 1;
            let negative_exponent = if self.eat('-') {
                true
            } else {
                self.eat('+');
                false
            };
            self.expect_digit()?;
            // `as` saturates, which is what an absurd exponent deserves.
            let magnitude = self.parse_digits(usize::MAX).0 as i32;
            exponent = Some(if negative_exponent {
                -magnitude
            } else {
                magnitude
            });
        }

        let sign = if negative { -1.0 } else { 1.0 };

        if fraction.is_none() && exponent.is_none() {
            let signed = sign * integer;
            if (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&signed) {
                return Ok(Value::Integer(signed as i32));
            }
            return Ok(Value::Float(signed));
        }

        let mut mantissa = integer;
        if let Some((digits, count)) = fraction {
            mantissa += scale(digits, -i32::try_from(count).unwrap_or(i32::MAX));
        }
        let mantissa = sign * mantissa;
        Ok(Value::Float(scale(mantissa, exponent.unwrap_or(0))))
    }

    fn expect_digit(&self) -> ParseResult<()> {
        match self.current() {
            Some(c) if c.is_ascii_digit() => Ok(()),
            _ => Err(self.invalid("Invalid digit", self.pos)),
        }
    }

    /// Fraction digits after the `.`: returns the significant digits and the
    /// total number of places they span, leading zeros included.
    fn parse_fraction(&mut self) -> (f64, usize) {
        let mut zeros = 0;
        while self.eat('0') {
            zeros += 1;
        }
        let (digits, count) = self.parse_digits(MAX_FRACTION_DIGITS);
        (digits, zeros + count)
    }

    /// Accumulate a run of ASCII digits as `acc * 10 + digit`. Digits past
    /// `limit` are consumed but ignored. Returns the value and the number of
    /// digits accumulated.
    fn parse_digits(&mut self, limit: usize) -> (f64, usize) {
        let mut value = 0.0;
        let mut count = 0;
        while let Some(digit) = self.current().and_then(|c| c.to_digit(10)) {
            if count < limit {
                value = value * 10.0 + f64::from(digit);
                count += 1;
            }
            self.pos += 1;
        }
        (value, count)
    }

    fn parse_array(&mut self) -> ParseResult<Value> {
        debug_assert_eq!(self.current(), Some('['));
        self.pos += 1;

        let mut list = List::new();
        self.skip_spaces();
        if self.eat(']') {
            return Ok(Value::List(list));
        }

        loop {
            list.push(self.parse_value()?);
            self.skip_spaces();
            match self.current() {
                Some(',') => self.pos += 1,
                Some(']') => {
                    self.pos += 1;
                    return Ok(Value::List(list));
                }
                Some(_) => {
                    return Err(self.invalid("List ended with an invalid character", self.pos))
                }
                None => return Err(self.eof("Unexpected end of input in list")),
            }
        }
    }

    fn parse_object(&mut self) -> ParseResult<Value> {
        debug_assert_eq!(self.current(), Some('{'));
        self.pos += 1;

        let mut object = Object::new();
        self.skip_spaces();
        if self.eat('}') {
            return Ok(Value::Object(object));
        }

        loop {
            self.skip_spaces();
            match self.current() {
                Some('"') => {}
                Some(_) => return Err(self.invalid("Expected string for key", self.pos)),
                None => return Err(self.eof("Unexpected end of input in object")),
            }
            let key = self.parse_string()?;

            self.skip_spaces();
            match self.current() {
                Some(':') => self.pos += 1,
                Some(_) => return Err(self.invalid("Expected ':'", self.pos)),
                None => return Err(self.eof("Unexpected end of input in object")),
            }

            let value = self.parse_value()?;
            object.insert(key, value);

            self.skip_spaces();
            match self.current() {
                Some(',') => self.pos += 1,
                Some('}') => {
                    self.pos += 1;
                    return Ok(Value::Object(object));
                }
                Some(_) => {
                    return Err(self.invalid("Object ended with invalid character", self.pos))
                }
                None => return Err(self.eof("Unexpected end of input in object")),
            }
        }
    }
}

/// `mantissa * 10^exponent`; negative exponents divide, which keeps values
/// like `1.6e-2` exact to the nearest double. Exponents past
/// [`SCALE_STEP`] are applied in steps so subnormal results survive.
fn scale(mut mantissa: f64, mut exponent: i32) -> f64 {
    let step = 10f64.powi(SCALE_STEP);
    while exponent > SCALE_STEP && mantissa.is_finite() && mantissa != 0.0 {
        mantissa *= step;
        exponent -= SCALE_STEP;
    }
    while exponent < -SCALE_STEP && mantissa != 0.0 {
        mantissa /= step;
        exponent += SCALE_STEP;
    }
    if mantissa == 0.0 || exponent == 0 {
        return mantissa;
    }
    if exponent > 0 {
        mantissa * 10f64.powi(exponent)
    } else {
        mantissa / 10f64.powi(-exponent)
    }
}
