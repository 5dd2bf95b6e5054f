use std::{io, str::Utf8Error};

use thiserror::Error;

/// An enumeration of potential errors that appear during bencodex decoding.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A tag byte was not recognized, or a digit was required but something else was found.
    #[error("unexpected byte {} at offset {offset}; expected {expected}", printable(.byte))]
    UnexpectedByte {
        /// Position of the offending byte.
        offset: u64,
        /// The offending byte.
        byte: u8,
        /// What the decoder was looking for instead.
        expected: &'static str,
    },

    /// The source ran dry before a terminator or a full length-prefixed field was read.
    #[error("unexpected end of input at offset {offset}; expected {expected}")]
    TruncatedInput {
        /// Position at which the input ended.
        offset: u64,
        /// What the decoder still needed.
        expected: String,
    },

    /// A dictionary key was neither a text nor a byte string.
    #[error("dictionary key must be a unicode or byte string, got {} at offset {offset}", printable(.byte))]
    InvalidKeyType {
        /// Position of the key's tag.
        offset: u64,
        /// The tag byte of the key.
        byte: u8,
    },

    /// The content of a text field is not valid UTF-8.
    #[error("text at offset {offset} is not valid utf-8")]
    InvalidUtf8 {
        /// Position of the text's content.
        offset: u64,
        /// The underlying validation error.
        source: Utf8Error,
    },

    /// More input followed a complete top-level value.
    #[error("unexpected byte {} at offset {offset} after the end of the value", printable(.byte))]
    TrailingData {
        /// Position of the first surplus byte.
        offset: u64,
        /// The first surplus byte.
        byte: u8,
    },

    /// A length prefix does not fit into the address space.
    #[error("length prefix at offset {offset} is too large")]
    LengthTooLarge {
        /// Position of the length prefix.
        offset: u64,
    },

    /// Lists and dicts were nested deeper than the configured maximum.
    #[error("maximum nesting depth of {max_depth} exceeded at offset {offset}")]
    NestingTooDeep {
        /// Position of the list or dict that went too deep.
        offset: u64,
        /// The configured limit.
        max_depth: usize,
    },

    /// Reading from the source failed.
    #[error("failed to read input")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn unexpected_byte(offset: u64, byte: u8, expected: &'static str) -> Self {
        Error::UnexpectedByte {
            offset,
            byte,
            expected,
        }
    }

    pub(crate) fn truncated(offset: u64, expected: impl Into<String>) -> Self {
        Error::TruncatedInput {
            offset,
            expected: expected.into(),
        }
    }

    /// The offset into the input at which the error was detected, if known.
    pub fn offset(&self) -> Option<u64> {
        match *self {
            Error::UnexpectedByte { offset, .. }
            | Error::TruncatedInput { offset, .. }
            | Error::InvalidKeyType { offset, .. }
            | Error::InvalidUtf8 { offset, .. }
            | Error::TrailingData { offset, .. }
            | Error::LengthTooLarge { offset }
            | Error::NestingTooDeep { offset, .. } => Some(offset),
            Error::Io(_) => None,
        }
    }
}

/// Formats a byte as e.g. `'x' (0x78)`.
pub(crate) fn printable(byte: &u8) -> String {
    format!("{:?} (0x{:02x})", char::from(*byte), byte)
}

#[test]
fn decoding_errors_are_sync_send() {
    fn is_send<T: Send>() {}
    fn is_sync<T: Sync>() {}
    is_send::<Error>();
    is_sync::<Error>();
}

#[test]
fn messages_name_offset_and_byte() {
    let error = Error::unexpected_byte(3, b'x', "a tag byte");
    assert_eq!(
        error.to_string(),
        "unexpected byte 'x' (0x78) at offset 3; expected a tag byte"
    );
    assert_eq!(error.offset(), Some(3));
}
