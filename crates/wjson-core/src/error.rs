//! Error types for transcoding, parsing, and value narrowing.
//!
//! Every failure the library can produce converts into [`JsonError`], so callers
//! can match broadly on the root or specifically on one of the inner enums.

use crate::value::ValueType;
use thiserror::Error;

/// Errors raised by [`TextCodec`](crate::codec::TextCodec).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The encoding name could not be resolved into a conversion context.
    /// `context` names the direction that failed ("decoder" or "encoder").
    #[error("Could not initialize {context} for encoding '{encoding}'")]
    Init {
        encoding: String,
        context: &'static str,
    },

    /// The input holds a sequence that is not valid in its encoding, or a
    /// character the target encoding cannot represent.
    #[error("Invalid multibyte sequence at {position}")]
    InvalidSequence { position: usize },

    /// The input ended in the middle of a multi-unit sequence.
    #[error("Incomplete multibyte sequence at {position}")]
    IncompleteSequence { position: usize },
}

/// Errors raised while parsing JSON text.
///
/// `position` is the absolute code-unit offset of the cursor when the
/// violation was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An unexpected or invalid token or character.
    #[error("{message} at {position}")]
    InvalidCharacter {
        message: &'static str,
        position: usize,
    },

    /// The input ended before a construct was closed.
    #[error("{message} at {position}")]
    UnexpectedEof {
        message: &'static str,
        position: usize,
    },
}

impl ParseError {
    /// Cursor position at which the error was detected.
    pub fn position(&self) -> usize {
        match self {
            ParseError::InvalidCharacter { position, .. }
            | ParseError::UnexpectedEof { position, .. } => *position,
        }
    }

    /// The diagnostic message without the position suffix.
    pub fn message(&self) -> &'static str {
        match self {
            ParseError::InvalidCharacter { message, .. }
            | ParseError::UnexpectedEof { message, .. } => message,
        }
    }
}

/// A [`Value`](crate::Value) was narrowed to an incompatible type.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Invalid value type: expected {expected}, found {found}")]
pub struct ValueTypeError {
    pub expected: ValueType,
    pub found: ValueType,
}

/// Root of the error taxonomy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JsonError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    ValueType(#[from] ValueTypeError),
}

/// Convenience alias used throughout wjson-core.
pub type Result<T> = std::result::Result<T, JsonError>;
