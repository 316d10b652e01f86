//! Canonical wide text: an owned sequence of UTF-16 code units.
//!
//! All parsing operates on this form. Unlike `String`, a `WideString` may hold
//! unpaired surrogates (a `\uD800` escape decodes to exactly one code unit), so
//! conversion to `String` is either lossy or fallible.

use std::borrow::Borrow;
use std::char::DecodeUtf16Error;
use std::fmt;

/// Owned UTF-16 code units. Ordering is plain code-unit order, which is the
/// key order of [`Object`](crate::value::Object).
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WideString(Vec<u16>);

impl WideString {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Copy exactly `units`; embedded NULs are kept.
    pub fn from_units(units: &[u16]) -> Self {
        Self(units.to_vec())
    }

    pub fn as_units(&self) -> &[u16] {
        &self.0
    }

    pub fn into_units(self) -> Vec<u16> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, unit: u16) {
        self.0.push(unit);
    }

    /// Append the UTF-16 form of `s`.
    pub fn push_str(&mut self, s: &str) {
        self.0.extend(s.encode_utf16());
    }

    pub fn extend_from_units(&mut self, units: &[u16]) {
        self.0.extend_from_slice(units);
    }

    /// Iterate over the decoded characters; unpaired surrogates yield `Err`.
    pub fn chars(&self) -> impl Iterator<Item = Result<char, DecodeUtf16Error>> + '_ {
        char::decode_utf16(self.0.iter().copied())
    }

    /// Convert to `String`, replacing unpaired surrogates with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }

    /// Convert to `String`, or `None` if the text holds an unpaired surrogate.
    pub fn to_string_checked(&self) -> Option<String> {
        String::from_utf16(&self.0).ok()
    }
}

impl From<&str> for WideString {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

impl From<String> for WideString {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Vec<u16>> for WideString {
    fn from(units: Vec<u16>) -> Self {
        Self(units)
    }
}

impl From<&[u16]> for WideString {
    fn from(units: &[u16]) -> Self {
        Self::from_units(units)
    }
}

impl AsRef<[u16]> for WideString {
    fn as_ref(&self) -> &[u16] {
        &self.0
    }
}

impl Borrow<[u16]> for WideString {
    fn borrow(&self) -> &[u16] {
        &self.0
    }
}

impl FromIterator<u16> for WideString {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<u16> for WideString {
    fn extend<I: IntoIterator<Item = u16>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl PartialEq<str> for WideString {
    fn eq(&self, other: &str) -> bool {
        self.0.iter().copied().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for WideString {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl fmt::Display for WideString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars() {
            fmt::Write::write_char(f, c.unwrap_or(char::REPLACEMENT_CHARACTER))?;
        }
        Ok(())
    }
}
