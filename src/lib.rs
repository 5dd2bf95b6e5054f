//! Decodes and encodes Bencodex structures.
//!
//! Bencodex extends bencode with null, booleans and unicode text that is kept
//! distinct from byte strings. The decoder reads from any [`std::io::Read`]
//! source through a small lookahead window, so the input does not have to be
//! seekable or held in memory as a whole.
//!
//! The encoder always produces the canonical form: dictionary keys are emitted
//! with all byte string keys first and all text keys after them, each group in
//! ascending byte order, regardless of the order the keys were inserted in.
//!
//! ```
//! use bencodex::{Key, Value};
//!
//! # fn main() -> Result<(), bencodex::decoding::Error> {
//! let mut dict = bencodex::Dict::new();
//! dict.insert(Key::from("k2"), Value::List(vec![true.into(), false.into()]));
//! dict.insert(Key::from(b"k"), Value::from("v"));
//!
//! let encoded = Value::Dict(dict).to_bencodex();
//! assert_eq!(encoded, b"d1:ku1:vu2:k2ltfee");
//!
//! let decoded = Value::from_bencodex(&encoded)?;
//! assert_eq!(decoded.get("k2"), Some(&Value::List(vec![true.into(), false.into()])));
//! # Ok(())
//! # }
//! ```
#![cfg_attr(not(test), warn(missing_docs))]

pub mod decoding;
pub mod encoding;
#[cfg(feature = "serde")]
pub mod serde;
mod value;

pub use crate::{
    decoding::{decode, decode_all_bytes},
    encoding::{encode, encode_to, encode_to_bytes},
    value::{Dict, Key, Value},
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
