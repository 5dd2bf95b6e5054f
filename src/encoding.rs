//! An encoder for bencodex. Guarantees that the output is the canonical encoding
//!
//! # Encoding a value
//!
//! [`encode`] returns an [`Encoder`], an iterator over byte chunks that is
//! produced lazily while walking the value, so large trees can be streamed to a
//! sink without first building the whole output:
//!
//! ```
//! use bencodex::{encode, Value};
//!
//! let value = Value::List(vec![Value::Null, "hi".into()]);
//! let chunks: Vec<_> = encode(&value).collect();
//! assert_eq!(chunks.concat(), b"lnu2:hie");
//! ```
//!
//! [`encode_to`] writes the chunks to any [`std::io::Write`] and
//! [`encode_to_bytes`] concatenates them; both produce the same bytes as the
//! iterator.
//!
//! # Canonical dictionaries
//!
//! Dictionary entries are emitted with byte string keys first and text keys
//! second, each group sorted by raw key bytes. Insertion order never shows in
//! the output:
//!
//! ```
//! use bencodex::{encode_to_bytes, Dict, Key, Value};
//!
//! let mut dict = Dict::new();
//! dict.insert(Key::from("a"), Value::Null);
//! dict.insert(Key::from(b"b"), Value::Null);
//! assert_eq!(encode_to_bytes(&Value::Dict(dict)), b"d1:bnu1:ane");
//! ```
//!
//! # Error handling
//!
//! Encoding a [`Value`](crate::Value) cannot fail on its own; only writing to a
//! sink can. [`Error::UnsupportedValueType`] is reported when data that has no
//! bencodex representation is converted into a value, such as a float or a
//! dictionary key that is not a string.

mod encoder;
mod error;

pub use self::{
    encoder::{encode, encode_to, encode_to_bytes, Chunk, Encoder},
    error::Error,
};
