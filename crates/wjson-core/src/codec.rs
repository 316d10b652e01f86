//! Byte encoding ⇄ canonical wide text.
//!
//! [`TextCodec`] resolves an encoding label once and keeps two conversion
//! contexts open: bytes → UTF-16 code units for decoding, and UTF-16 → bytes for
//! encoding. Conversion runs through a fixed-size output buffer; a full buffer
//! is flushed and conversion resumes, so callers only ever see malformed input
//! as an error.
//!
//! Labels follow the WHATWG Encoding Standard (`"UTF-8"`, `"utf8"`,
//! `"Shift_JIS"`, `"windows-1252"`, ...), matched case-insensitively. The one
//! exception is ISO-8859-1: WHATWG aliases its labels to windows-1252, but
//! here `"latin1"`, `"ISO-8859-1"` and friends mean true Latin-1, where every
//! byte is the code point of the same value.

use std::fmt;

use encoding_rs::{
    Decoder as ByteDecoder, DecoderResult, Encoder as ByteEncoder, Encoding, EncoderResult,
};
use tracing::{debug, trace};

use crate::error::CodecError;
use crate::wide::WideString;

/// Encoding used when the caller names none.
pub const DEFAULT_ENCODING: &str = "UTF-8";

const BUFFER_SIZE: usize = 4096;

const LATIN1_NAME: &str = "ISO-8859-1";

/// IANA names and aliases of ISO-8859-1.
const LATIN1_LABELS: &[&str] = &[
    "iso-8859-1",
    "iso8859-1",
    "iso_8859-1",
    "iso_8859-1:1987",
    "iso-ir-100",
    "latin1",
    "l1",
    "ibm819",
    "cp819",
    "csisolatin1",
];

/// A pair of conversion contexts for one named byte encoding.
///
/// Methods take `&mut self`: the contexts carry conversion state, so one
/// instance serves one caller at a time.
pub struct TextCodec {
    backend: Backend,
}

enum Backend {
    Latin1,
    Whatwg {
        encoding: &'static Encoding,
        decoder: ByteDecoder,
        encoder: ByteEncoder,
    },
}

impl TextCodec {
    /// Open both conversion contexts for `encoding`.
    ///
    /// Fails with [`CodecError::Init`] when the label is unknown, or when the
    /// encoding has no wide → byte direction (UTF-16LE/BE and "replacement").
    pub fn new(encoding: &str) -> Result<Self, CodecError> {
        let label = encoding.trim();
        if LATIN1_LABELS.iter().any(|l| l.eq_ignore_ascii_case(label)) {
            debug!(label = encoding, encoding = LATIN1_NAME, "opened text codec");
            return Ok(Self {
                backend: Backend::Latin1,
            });
        }

        let resolved = Encoding::for_label(label.as_bytes())
            .filter(|e| *e != encoding_rs::REPLACEMENT)
            .ok_or_else(|| CodecError::Init {
                encoding: encoding.to_string(),
                context: "decoder",
            })?;
        if resolved.output_encoding() != resolved {
            return Err(CodecError::Init {
                encoding: encoding.to_string(),
                context: "encoder",
            });
        }
        debug!(label = encoding, encoding = resolved.name(), "opened text codec");
        Ok(Self {
            backend: Backend::Whatwg {
                encoding: resolved,
                decoder: resolved.new_decoder_with_bom_removal(),
                encoder: resolved.new_encoder(),
            },
        })
    }

    /// Canonical name of the resolved encoding (e.g. `"Shift_JIS"` for
    /// `"sjis"`, `"ISO-8859-1"` for `"latin1"`).
    pub fn name(&self) -> &'static str {
        match &self.backend {
            Backend::Latin1 => LATIN1_NAME,
            Backend::Whatwg { encoding, .. } => encoding.name(),
        }
    }

    /// Convert a complete byte string to wide text.
    ///
    /// Error positions are byte offsets into `bytes`.
    pub fn decode(&mut self, bytes: &[u8]) -> Result<WideString, CodecError> {
        let result = match &mut self.backend {
            Backend::Latin1 => Ok(bytes.iter().map(|&b| u16::from(b)).collect()),
            Backend::Whatwg {
                encoding, decoder, ..
            } => {
                let result = decode_chunks(decoder, bytes);
                *decoder = encoding.new_decoder_with_bom_removal();
                result
            }
        };
        if let Ok(ref wide) = result {
            trace!(bytes = bytes.len(), units = wide.len(), "decoded text");
        }
        result
    }

    /// Convert wide text to a complete byte string.
    ///
    /// Error positions are code-unit offsets into `text`.
    pub fn encode(&mut self, text: &[u16]) -> Result<Vec<u8>, CodecError> {
        let result = match &mut self.backend {
            Backend::Latin1 => encode_latin1(text),
            Backend::Whatwg {
                encoding, encoder, ..
            } => {
                let result = encode_chunks(encoder, text);
                *encoder = encoding.new_encoder();
                result
            }
        };
        if let Ok(ref bytes) = result {
            trace!(units = text.len(), bytes = bytes.len(), "encoded text");
        }
        result
    }
}

fn decode_chunks(decoder: &mut ByteDecoder, bytes: &[u8]) -> Result<WideString, CodecError> {
    let mut out = WideString::with_capacity(bytes.len());
    let mut buf = [0u16; BUFFER_SIZE];
    let mut consumed = 0;

    // Streaming pass: anything malformed here is invalid, not truncated.
    loop {
        let (result, read, written) =
            decoder.decode_to_utf16_without_replacement(&bytes[consumed..], &mut buf, false);
        out.extend_from_units(&buf[..written]);
        consumed += read;
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::OutputFull => continue,
            DecoderResult::Malformed(bad, after) => {
                let position = consumed.saturating_sub(usize::from(after) + usize::from(bad));
                return Err(CodecError::InvalidSequence { position });
            }
        }
    }

    // Final flush: bytes still pending in the context are a truncated sequence.
    loop {
        let (result, _, written) = decoder.decode_to_utf16_without_replacement(&[], &mut buf, true);
        out.extend_from_units(&buf[..written]);
        match result {
            DecoderResult::InputEmpty => return Ok(out),
            DecoderResult::OutputFull => continue,
            DecoderResult::Malformed(bad, _) => {
                let position = bytes.len().saturating_sub(usize::from(bad));
                return Err(CodecError::IncompleteSequence { position });
            }
        }
    }
}

fn encode_chunks(encoder: &mut ByteEncoder, text: &[u16]) -> Result<Vec<u8>, CodecError> {
    let utf8 = wide_to_utf8(text)?;
    let mut out = Vec::with_capacity(utf8.len());
    let mut buf = [0u8; BUFFER_SIZE];
    let mut consumed = 0;

    loop {
        let (result, read, written) =
            encoder.encode_from_utf8_without_replacement(&utf8[consumed..], &mut buf, true);
        out.extend_from_slice(&buf[..written]);
        consumed += read;
        match result {
            EncoderResult::InputEmpty => return Ok(out),
            EncoderResult::OutputFull => continue,
            EncoderResult::Unmappable(c) => {
                let position = utf8[..consumed].encode_utf16().count() - c.len_utf16();
                return Err(CodecError::InvalidSequence { position });
            }
        }
    }
}

/// One byte per code unit; units above U+00FF have no Latin-1 form.
fn encode_latin1(text: &[u16]) -> Result<Vec<u8>, CodecError> {
    wide_to_utf8(text)?;
    text.iter()
        .enumerate()
        .map(|(position, &unit)| {
            u8::try_from(unit).map_err(|_| CodecError::InvalidSequence { position })
        })
        .collect()
}

impl fmt::Debug for TextCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextCodec")
            .field("encoding", &self.name())
            .finish()
    }
}

/// Pair surrogates into a UTF-8 string. An unpaired surrogate is invalid,
/// except a high surrogate in the last position, which is a truncated pair.
fn wide_to_utf8(text: &[u16]) -> Result<String, CodecError> {
    let mut out = String::with_capacity(text.len());
    let mut position = 0;
    for decoded in char::decode_utf16(text.iter().copied()) {
        match decoded {
            Ok(c) => {
                out.push(c);
                position += c.len_utf16();
            }
            Err(err) => {
                let unit = err.unpaired_surrogate();
                if position + 1 == text.len() && (0xD800..0xDC00).contains(&unit) {
                    return Err(CodecError::IncompleteSequence { position });
                }
                return Err(CodecError::InvalidSequence { position });
            }
        }
    }
    Ok(out)
}
