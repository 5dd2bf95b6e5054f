use std::io;

use thiserror::Error;

/// An enumeration of potential errors that appear during bencodex encoding.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The data has no bencodex representation.
    #[error("unsupported value type: {description}")]
    UnsupportedValueType {
        /// What was rejected.
        description: String,
    },

    /// Writing the encoded output failed.
    #[error("failed to write encoded output")]
    Io(#[from] io::Error),
}

impl Error {
    /// Raised for data that cannot be represented, e.g. a float.
    pub fn unsupported(description: impl Into<String>) -> Self {
        Error::UnsupportedValueType {
            description: description.into(),
        }
    }

    pub(crate) fn unsupported_key(kind: &str) -> Self {
        Error::unsupported(format!(
            "dictionary key must be a unicode or byte string, not {kind}"
        ))
    }
}

#[test]
fn encoding_errors_are_sync_send() {
    fn is_send<T: Send>() {}
    fn is_sync<T: Sync>() {}
    is_send::<Error>();
    is_sync::<Error>();
}
