//! Decodes Bencodex from a sequential byte source.
//!
//! # Basic decoding
//!
//! The simplest entry points decode exactly one value and reject anything that
//! follows it:
//!
//! ```
//! use bencodex::{decode_all_bytes, Value};
//!
//! let value = decode_all_bytes(b"li1eu3:fooe").unwrap();
//! assert_eq!(value, Value::List(vec![1.into(), "foo".into()]));
//!
//! assert!(decode_all_bytes(b"i1ei2e").is_err());
//! ```
//!
//! Any [`std::io::Read`] works as a source. The decoder never seeks; it pulls
//! bytes into a small lookahead window in fixed increments and only as far as
//! the current token needs:
//!
//! ```
//! # use bencodex::Value;
//! let file = std::io::Cursor::new(b"d1:ku1:ve".to_vec());
//! let value = bencodex::decode(file).unwrap();
//! assert_eq!(value.get(b"k"), Some(&Value::from("v")));
//! ```
//!
//! # Streams of values
//!
//! A [`Decoder`] can also read consecutive values from one stream; it returns
//! `Ok(None)` once the source is cleanly exhausted:
//!
//! ```
//! use bencodex::decoding::Decoder;
//!
//! let mut decoder = Decoder::new(&b"i1eu1:an"[..]);
//! let mut values = Vec::new();
//! while let Some(value) = decoder.next_value().unwrap() {
//!     values.push(value);
//! }
//! assert_eq!(values.len(), 3);
//! ```
//!
//! # Nesting depth
//!
//! Nesting is unbounded by default. Lists and dicts are decoded recursively, so
//! hostile input could exhaust the stack; set a limit when reading untrusted
//! data:
//!
//! ```
//! use bencodex::decoding::Decoder;
//!
//! let result = Decoder::new(&b"llleee"[..]).with_max_depth(2).decode();
//! assert!(result.is_err());
//! ```
//!
//! # Error handling
//!
//! Every error is final for the call that produced it and carries the byte
//! offset (and, where there is one, the offending byte) needed to point at the
//! problem in the input.

mod decoder;
mod error;

pub use self::{
    decoder::{decode, decode_all_bytes, Decoder, DEFAULT_READ_SIZE},
    error::Error,
};
