//! `Value`s hold an owned tree of bencodex data.
//!
//! Dictionaries keep their keys in the order they were inserted (or read);
//! the canonical ordering only applies when a value is encoded. If the `serde`
//! feature is enabled, `Value` and `Key` also implement `Serialize` and
//! `Deserialize`.

use std::cmp::Ordering;

use indexmap::IndexMap;
use num_bigint::BigInt;

use crate::{decoding, encoding};

/// A dictionary of bencodex values, in insertion order.
pub type Dict = IndexMap<Key, Value>;

/// A bencodex value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// The null value
    Null,
    /// A boolean
    Bool(bool),
    /// An integer of unbounded magnitude
    Integer(BigInt),
    /// Opaque binary data
    Bytes(Vec<u8>),
    /// Unicode text, distinct from a byte string holding the same UTF-8 bytes
    Text(String),
    /// An ordered list of values
    List(Vec<Value>),
    /// A dictionary with byte string or text keys
    Dict(Dict),
}

/// A dictionary key: either a byte string or unicode text.
///
/// Keys order canonically: every byte string key sorts before every text key,
/// and keys of the same kind compare by their raw bytes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A byte string key
    Bytes(Vec<u8>),
    /// A text key
    Text(String),
}

impl Key {
    /// The raw bytes of the key; UTF-8 for text keys.
    pub fn as_raw_bytes(&self) -> &[u8] {
        match self {
            Key::Bytes(bytes) => bytes,
            Key::Text(text) => text.as_bytes(),
        }
    }

    /// Whether this is a text key
    pub fn is_text(&self) -> bool {
        matches!(self, Key::Text(_))
    }

    /// The composite sort key `(is_text, raw bytes)` dictionaries are encoded in.
    pub(crate) fn sort_key(&self) -> (bool, &[u8]) {
        (self.is_text(), self.as_raw_bytes())
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        Key::Text(text.to_owned())
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        Key::Text(text)
    }
}

impl From<&[u8]> for Key {
    fn from(bytes: &[u8]) -> Self {
        Key::Bytes(bytes.to_owned())
    }
}

impl<const N: usize> From<&[u8; N]> for Key {
    fn from(bytes: &[u8; N]) -> Self {
        Key::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Key {
    fn from(bytes: Vec<u8>) -> Self {
        Key::Bytes(bytes)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Bytes(bytes) => Value::Bytes(bytes),
            Key::Text(text) => Value::Text(text),
        }
    }
}

impl TryFrom<Value> for Key {
    type Error = encoding::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bytes(bytes) => Ok(Key::Bytes(bytes)),
            Value::Text(text) => Ok(Key::Text(text)),
            other => Err(encoding::Error::unsupported_key(other.kind())),
        }
    }
}

impl Value {
    /// Decode a value from a complete buffer. Trailing bytes are an error.
    pub fn from_bencodex(bytes: &[u8]) -> Result<Value, decoding::Error> {
        decoding::decode_all_bytes(bytes)
    }

    /// Encode this value canonically into a byte vector
    pub fn to_bencodex(&self) -> Vec<u8> {
        encoding::encode_to_bytes(self)
    }

    /// A short name for the variant, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Bytes(_) => "byte string",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
        }
    }

    /// Whether the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean, if this is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer, if this is one
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Value::Integer(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the byte string, if this is one. Text is not a byte string.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the text, if this is text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the list items, if this is a list
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the dictionary, if this is one
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(value) => Some(value),
            _ => None,
        }
    }

    /// Looks up a key if this is a dictionary.
    ///
    /// ```
    /// use bencodex::Value;
    ///
    /// let value = Value::from_bencodex(b"d1:ki1eu1:ki2ee").unwrap();
    /// assert_eq!(value.get(b"k"), Some(&Value::from(1)));
    /// assert_eq!(value.get("k"), Some(&Value::from(2)));
    /// assert_eq!(value.get("missing"), None);
    /// ```
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.as_dict()?.get(&key.into())
    }
}

macro_rules! impl_from_integer {
    ($($type:ty)*) => {$(
        impl From<$type> for Value {
            fn from(value: $type) -> Self {
                Value::Integer(BigInt::from(value))
            }
        }
    )*}
}

impl_from_integer!(u8 u16 u32 u64 u128 usize i8 i16 i32 i64 i128 isize);

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_owned())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(value: &[u8; N]) -> Self {
        Value::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Dict> for Value {
    fn from(value: Dict) -> Self {
        Value::Dict(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use std::fmt::{self, Formatter};

    use serde_::{
        de::{MapAccess, SeqAccess, Visitor},
        ser::{self, SerializeMap, SerializeSeq},
        Deserialize, Deserializer, Serialize, Serializer,
    };
    use serde_bytes::Bytes;

    use super::*;

    impl Serialize for Value {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                Value::Null => serializer.serialize_unit(),
                Value::Bool(value) => serializer.serialize_bool(*value),
                Value::Integer(int) => {
                    if let Ok(int) = i64::try_from(int) {
                        serializer.serialize_i64(int)
                    } else if let Ok(int) = u64::try_from(int) {
                        serializer.serialize_u64(int)
                    } else if let Ok(int) = i128::try_from(int) {
                        serializer.serialize_i128(int)
                    } else if let Ok(int) = u128::try_from(int) {
                        serializer.serialize_u128(int)
                    } else {
                        Err(ser::Error::custom(format_args!(
                            "integer {} does not fit in 128 bits",
                            int
                        )))
                    }
                },
                Value::Bytes(bytes) => Bytes::new(bytes).serialize(serializer),
                Value::Text(text) => serializer.serialize_str(text),
                Value::List(list) => {
                    let mut seq = serializer.serialize_seq(Some(list.len()))?;
                    for value in list {
                        seq.serialize_element(value)?;
                    }
                    seq.end()
                },
                Value::Dict(dict) => {
                    let mut map = serializer.serialize_map(Some(dict.len()))?;
                    for (key, value) in dict {
                        map.serialize_entry(key, value)?;
                    }
                    map.end()
                },
            }
        }
    }

    impl Serialize for Key {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                Key::Bytes(bytes) => Bytes::new(bytes).serialize(serializer),
                Key::Text(text) => serializer.serialize_str(text),
            }
        }
    }

    impl<'de> Deserialize<'de> for Value {
        fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(ValueVisitor)
        }
    }

    impl<'de> Deserialize<'de> for Key {
        fn deserialize<D>(deserializer: D) -> Result<Key, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(KeyVisitor)
        }
    }

    struct ValueVisitor;

    impl<'de> Visitor<'de> for ValueVisitor {
        type Value = Value;

        fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
            formatter.write_str("any valid bencodex value")
        }

        fn visit_unit<E>(self) -> Result<Value, E> {
            Ok(Value::Null)
        }

        fn visit_none<E>(self) -> Result<Value, E> {
            Ok(Value::Null)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            Value::deserialize(deserializer)
        }

        fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
            Ok(Value::Bool(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
            Ok(Value::from(value))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
            Ok(Value::from(value))
        }

        fn visit_i128<E>(self, value: i128) -> Result<Value, E> {
            Ok(Value::from(value))
        }

        fn visit_u128<E>(self, value: u128) -> Result<Value, E> {
            Ok(Value::from(value))
        }

        fn visit_str<E>(self, value: &str) -> Result<Value, E> {
            Ok(Value::from(value))
        }

        fn visit_string<E>(self, value: String) -> Result<Value, E> {
            Ok(Value::Text(value))
        }

        fn visit_bytes<E>(self, value: &[u8]) -> Result<Value, E> {
            Ok(Value::from(value))
        }

        fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Value, E> {
            Ok(Value::Bytes(value))
        }

        fn visit_seq<V>(self, mut access: V) -> Result<Value, V::Error>
        where
            V: SeqAccess<'de>,
        {
            let mut list = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some(element) = access.next_element()? {
                list.push(element);
            }
            Ok(Value::List(list))
        }

        fn visit_map<V>(self, mut access: V) -> Result<Value, V::Error>
        where
            V: MapAccess<'de>,
        {
            let mut dict = Dict::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, value)) = access.next_entry::<Key, Value>()? {
                dict.insert(key, value);
            }
            Ok(Value::Dict(dict))
        }
    }

    struct KeyVisitor;

    impl<'de> Visitor<'de> for KeyVisitor {
        type Value = Key;

        fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
            formatter.write_str("a byte string or text dictionary key")
        }

        fn visit_str<E>(self, value: &str) -> Result<Key, E> {
            Ok(Key::from(value))
        }

        fn visit_string<E>(self, value: String) -> Result<Key, E> {
            Ok(Key::Text(value))
        }

        fn visit_bytes<E>(self, value: &[u8]) -> Result<Key, E> {
            Ok(Key::from(value))
        }

        fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Key, E> {
            Ok(Key::Bytes(value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(value: Value, expected: impl AsRef<[u8]>) {
        let expected = expected.as_ref();

        let encoded = value.to_bencodex();
        if encoded != expected {
            panic!(
                "Expected `{:?}` to encode as `{}`, but got `{}`",
                value,
                String::from_utf8_lossy(expected),
                String::from_utf8_lossy(&encoded)
            )
        }

        let decoded = match Value::from_bencodex(&encoded) {
            Ok(decoded) => decoded,
            Err(err) => panic!(
                "Failed to decode value from `{}`: {}",
                String::from_utf8_lossy(&encoded),
                err,
            ),
        };

        assert_eq!(decoded, value);
    }

    #[test]
    fn atoms() {
        case(Value::Null, "n");
        case(Value::Bool(true), "t");
        case(Value::Bool(false), "f");
    }

    #[test]
    fn bytes() {
        case(Value::Bytes(vec![1, 2, 3]), b"3:\x01\x02\x03");
        case(Value::Bytes(Vec::new()), "0:");
    }

    #[test]
    fn text() {
        case(Value::from("v"), "u1:v");
        case(Value::from("단팥"), "u6:단팥");
        assert_ne!(Value::from("v").to_bencodex(), Value::from(b"v").to_bencodex());
    }

    #[test]
    fn integer() {
        case(Value::from(0), "i0e");
        case(Value::from(-1), "i-1e");
        case(Value::from(u128::MAX), "i340282366920938463463374607431768211455e");
    }

    #[test]
    fn list() {
        case(Value::List(Vec::new()), "le");
        case(
            Value::List(vec![Value::from(0), Value::Bytes(vec![1, 2, 3])]),
            b"li0e3:\x01\x02\x03e",
        );
    }

    #[test]
    fn dict() {
        case(Value::Dict(Dict::new()), "de");

        let mut dict = Dict::new();
        dict.insert(Key::from(b"foo"), Value::from(1));
        dict.insert(Key::from(b"bar"), Value::from(2));
        case(Value::Dict(dict), "d3:bari2e3:fooi1ee");
    }

    #[test]
    fn keys_order_bytes_before_text() {
        let mut keys = vec![
            Key::from("a"),
            Key::from(b"b"),
            Key::from(""),
            Key::from(b"ab"),
            Key::from(b"a"),
        ];
        keys.sort();
        assert_eq!(
            keys,
            vec![
                Key::from(b"a"),
                Key::from(b"ab"),
                Key::from(b"b"),
                Key::from(""),
                Key::from("a"),
            ]
        );
        assert_ne!(Key::from("v"), Key::from(b"v"));
    }

    #[test]
    fn keys_convert_from_string_values_only() {
        assert_eq!(Key::try_from(Value::from("k")).unwrap(), Key::from("k"));
        assert_eq!(Key::try_from(Value::from(b"k")).unwrap(), Key::from(b"k"));
        assert!(Key::try_from(Value::from(1)).is_err());
        assert!(Key::try_from(Value::Null).is_err());
    }

    #[test]
    fn accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(5).as_integer(), Some(&BigInt::from(5)));
        assert_eq!(Value::from(b"x").as_bytes(), Some(&b"x"[..]));
        assert_eq!(Value::from(b"x").as_text(), None);
        assert_eq!(Value::from("x").as_text(), Some("x"));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(3)), Value::from(3));
        assert_eq!(Value::from(1).get("k"), None);
    }
}
