//! Serde error and result types

use std::fmt::Display;

use thiserror::Error;

use crate::{decoding, encoding};

/// Result alias for the serde bridge
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An enumeration of potential errors that appear during serde serialization and
/// deserialization
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A serde-related error raised during serialization
    #[error("serialization failed: {0}")]
    CustomEncode(String),

    /// A serde-related error raised during deserialization
    #[error("deserialization failed: {0}")]
    CustomDecode(String),

    /// An integer wider than serde's 128 bit integer types
    #[error("integer {0} does not fit in 128 bits")]
    IntegerOutOfRange(String),

    /// The data has no bencodex representation, or writing it failed
    #[error(transparent)]
    Encode(#[from] encoding::Error),

    /// The input is not valid bencodex
    #[error(transparent)]
    Decode(#[from] decoding::Error),
}

impl serde_::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::CustomEncode(msg.to_string())
    }
}

impl serde_::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Self::CustomDecode(msg.to_string())
    }
}
