//! Serde bencodex serialization and deserialization.
//!
//! The serde data model maps onto bencodex as follows:
//! - `()`, unit structs and `None` become null
//! - `bool` becomes a boolean and every integer type an integer
//! - `str`, `String` and `char` become text
//! - bytes (e.g. through `serde_bytes`) become a byte string
//! - sequences and tuples become lists
//! - maps and structs become dictionaries
//!
//! Enums use the externally tagged representation: a unit variant is its name
//! as text, any other variant is a single-entry dictionary from the variant
//! name to its content.
//!
//! Floats cannot be represented, and neither can map keys that do not
//! serialize to text or a byte string. Both are reported as
//! [`encoding::Error::UnsupportedValueType`](crate::encoding::Error::UnsupportedValueType).
//!
//! ```
//! use serde_derive::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! #[serde(crate = "serde_")]
//! struct Peer {
//!     port: u16,
//!     name: Option<String>,
//! }
//!
//! # fn main() -> Result<(), bencodex::serde::Error> {
//! let peer = Peer { port: 6881, name: None };
//! let encoded = bencodex::serde::to_bytes(&peer)?;
//! assert_eq!(encoded, b"du4:namenu4:porti6881ee");
//! assert_eq!(bencodex::serde::from_bytes::<Peer>(&encoded)?, peer);
//! # Ok(())
//! # }
//! ```

pub mod de;
pub mod error;
pub mod ser;

pub use de::{from_bytes, from_reader, from_value, Deserializer};
pub use error::{Error, Result};
pub use ser::{to_bytes, to_value, to_writer, Serializer};

#[cfg(test)]
mod tests {
    use std::{
        collections::{BTreeMap, HashMap},
        fmt::Debug,
        io::Cursor,
    };

    use serde_::{de::DeserializeOwned, ser::Serialize};
    use serde_derive::{Deserialize, Serialize};

    use super::*;
    use crate::{decoding, encoding, Key, Value};

    fn case<V, B>(value: V, want: B)
    where
        V: Serialize + DeserializeOwned + PartialEq + Debug,
        B: AsRef<[u8]>,
    {
        let want = want.as_ref();

        let encoded = match to_bytes(&value) {
            Ok(have) => {
                assert_eq!(
                    have,
                    want,
                    "Expected `{}` but got `{}` when serializing `{:?}`",
                    String::from_utf8_lossy(want),
                    String::from_utf8_lossy(&have),
                    value
                );
                have
            },
            Err(err) => panic!("Failed to serialize `{:?}`: {}", value, err),
        };

        let deserialized = match from_bytes::<V>(&encoded) {
            Ok(deserialized) => deserialized,
            Err(error) => panic!(
                "Failed to deserialize `{:?}` from `{}`: {}",
                value,
                String::from_utf8_lossy(&encoded),
                error
            ),
        };

        assert_eq!(
            deserialized, value,
            "Deserialized value != original: `{:?}` != `{:?}`",
            deserialized, value
        );
    }

    fn is_unsupported(error: &Error) -> bool {
        matches!(
            error,
            Error::Encode(encoding::Error::UnsupportedValueType { .. })
        )
    }

    #[test]
    fn scalar() {
        case(0u8, "i0e");
        case(1u16, "i1e");
        case(-1i8, "i-1e");
        case(i64::MIN, "i-9223372036854775808e");
        case(u64::MAX, "i18446744073709551615e");
        case(i128::MIN, "i-170141183460469231731687303715884105728e");
        case(u128::MAX, "i340282366920938463463374607431768211455e");
        case(true, "t");
        case(false, "f");
    }

    #[test]
    fn text() {
        case("foo".to_string(), "u3:foo");
        case('é', "u2:\u{e9}");
        case(String::new(), "u0:");
    }

    #[test]
    fn null_like() {
        case((), "n");
        case(None::<u8>, "n");
        case(Some(5u8), "i5e");

        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        #[serde(crate = "serde_")]
        struct Unit;
        case(Unit, "n");
    }

    #[test]
    fn bytes_default() {
        let value: Vec<u8> = vec![1, 2, 3, 4];
        case(value, "li1ei2ei3ei4ee");
    }

    #[test]
    fn bytes_with_serde_bytes() {
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        #[serde(crate = "serde_", transparent)]
        struct Owned {
            #[serde(with = "serde_bytes")]
            bytes: Vec<u8>,
        }

        case(
            Owned {
                bytes: vec![1, 2, 3],
            },
            "3:\x01\x02\x03",
        );
    }

    #[test]
    fn newtype_struct() {
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        #[serde(crate = "serde_")]
        struct Foo(u8);
        case(Foo(1), "i1e");
    }

    #[test]
    fn seq() {
        case(vec![1, 0, 1], "li1ei0ei1ee");
        case((1u8, "a".to_string()), "li1eu1:ae");
    }

    #[test]
    fn tuple_struct() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        #[serde(crate = "serde_")]
        struct Foo(String, u32, i32);

        case(Foo("hello".to_string(), 1, -100), "lu5:helloi1ei-100ee");
    }

    #[test]
    fn struct_field_order() {
        // Serde visits these fields in the opposite order to the canonical one.
        #[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
        #[serde(crate = "serde_")]
        struct Foo {
            fb: u8,
            fac: u8,
        }

        case(Foo { fb: 1, fac: 0 }, "du3:faci0eu2:fbi1ee");
    }

    #[test]
    fn maps() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), 1u8);
        map.insert("a".to_string(), 2u8);
        case(map, "du1:ai2eu1:bi1ee");
    }

    #[test]
    fn enums() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        #[serde(crate = "serde_")]
        enum Message {
            Ping,
            Have(u32),
            Request(u32, u32),
            Piece { index: u32, data: String },
        }

        case(Message::Ping, "u4:Ping");
        case(Message::Have(3), "du4:Havei3ee");
        case(Message::Request(1, 2), "du7:Requestli1ei2eee");
        case(
            Message::Piece {
                index: 0,
                data: "x".to_string(),
            },
            "du5:Piecedu4:datau1:xu5:indexi0eee",
        );
    }

    #[test]
    fn value_passes_through() {
        let mut dict = crate::Dict::new();
        dict.insert(Key::from(b"raw"), Value::from(&b"\xff"[..]));
        dict.insert(Key::from("text"), Value::List(vec![Value::Null, true.into()]));
        let value = Value::Dict(dict);

        assert_eq!(to_value(&value).unwrap(), value);
        assert_eq!(from_value::<Value>(value.clone()).unwrap(), value);
        case(value, b"d3:raw1:\xffu4:textlntee");
    }

    #[test]
    fn untagged_enums_need_self_description() {
        #[derive(Deserialize, Debug, PartialEq)]
        #[serde(crate = "serde_", untagged)]
        enum Either {
            Number(u8),
            Text(String),
        }

        assert_eq!(from_bytes::<Either>(b"i7e").unwrap(), Either::Number(7));
        assert_eq!(
            from_bytes::<Either>(b"u1:x").unwrap(),
            Either::Text("x".to_string())
        );
    }

    #[test]
    fn floats_are_unsupported() {
        assert!(is_unsupported(&to_bytes(&0f32).unwrap_err()));
        assert!(is_unsupported(&to_value(&vec![1.5f64]).unwrap_err()));
    }

    #[test]
    fn non_string_map_keys_are_unsupported() {
        let mut map = HashMap::new();
        map.insert(1u8, 2u8);
        assert!(is_unsupported(&to_bytes(&map).unwrap_err()));
    }

    #[test]
    fn wide_integers_do_not_fit_serde() {
        let error = from_bytes::<Value>(b"i340282366920938463463374607431768211456e").unwrap_err();
        assert!(matches!(error, Error::IntegerOutOfRange(_)));
        assert!(from_bytes::<u8>(b"i256e").is_err());
    }

    #[test]
    fn decode_errors_are_reported() {
        let error = from_bytes::<u8>(b"i1ex").unwrap_err();
        assert!(matches!(
            error,
            Error::Decode(decoding::Error::TrailingData { offset: 3, .. })
        ));
    }

    #[test]
    fn wrong_types_are_reported() {
        assert!(matches!(
            from_bytes::<String>(b"i1e").unwrap_err(),
            Error::CustomDecode(_)
        ));
        assert!(from_bytes::<Vec<u8>>(b"u1:a").is_err());
    }

    #[test]
    fn reader_and_writer() {
        let mut sink = Vec::new();
        to_writer(&vec!["a".to_string()], &mut sink).unwrap();
        assert_eq!(sink, b"lu1:ae");

        let read: Vec<String> = from_reader(Cursor::new(sink)).unwrap();
        assert_eq!(read, vec!["a".to_string()]);
    }
}
