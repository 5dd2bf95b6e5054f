//! Serde bencodex deserialization.
//!
//! The input is decoded into a [`Value`] first, which makes the format
//! self-describing: `deserialize_any`, untagged enums and [`Value`] itself all
//! work.

use std::{io::Read, vec};

use num_bigint::BigInt;
use serde_::de::{
    self, DeserializeOwned, DeserializeSeed, EnumAccess, MapAccess, SeqAccess, Unexpected,
    VariantAccess, Visitor,
};

use crate::{
    decoding,
    serde::{Error, Result},
    value::{Dict, Key, Value},
};

/// Deserialize an instance of `T` from a [`Value`]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::new(value))
}

/// Deserialize an instance of `T` from bencodex, rejecting trailing bytes
pub fn from_bytes<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decoding::decode_all_bytes(bytes)?)
}

/// Deserialize an instance of `T` from the single bencodex value in `reader`
pub fn from_reader<T, R>(reader: R) -> Result<T>
where
    T: DeserializeOwned,
    R: Read,
{
    from_value(decoding::decode(reader)?)
}

/// Bencodex deserializer over an owned [`Value`]
#[derive(Debug)]
pub struct Deserializer {
    value: Value,
}

impl Deserializer {
    /// Create a new `Deserializer` for `value`
    pub fn new(value: Value) -> Self {
        Deserializer { value }
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(value) => Unexpected::Bool(*value),
        Value::Integer(_) => Unexpected::Other("integer"),
        Value::Bytes(bytes) => Unexpected::Bytes(bytes),
        Value::Text(text) => Unexpected::Str(text),
        Value::List(_) => Unexpected::Seq,
        Value::Dict(_) => Unexpected::Map,
    }
}

fn visit_integer<'de, V>(int: BigInt, visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    if let Ok(int) = i64::try_from(&int) {
        visitor.visit_i64(int)
    } else if let Ok(int) = u64::try_from(&int) {
        visitor.visit_u64(int)
    } else if let Ok(int) = u128::try_from(&int) {
        visitor.visit_u128(int)
    } else if let Ok(int) = i128::try_from(&int) {
        visitor.visit_i128(int)
    } else {
        Err(Error::IntegerOutOfRange(int.to_string()))
    }
}

fn visit_list<'de, V>(items: Vec<Value>, visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    let len = items.len();
    let mut access = SeqDeserializer {
        iter: items.into_iter(),
    };
    let result = visitor.visit_seq(&mut access)?;
    match access.iter.len() {
        0 => Ok(result),
        _ => Err(de::Error::invalid_length(len, &"fewer elements in list")),
    }
}

fn visit_dict<'de, V>(dict: Dict, visitor: V) -> Result<V::Value>
where
    V: Visitor<'de>,
{
    let len = dict.len();
    let mut access = MapDeserializer {
        iter: dict.into_iter(),
        value: None,
    };
    let result = visitor.visit_map(&mut access)?;
    match access.iter.len() {
        0 => Ok(result),
        _ => Err(de::Error::invalid_length(len, &"fewer entries in dictionary")),
    }
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(value) => visitor.visit_bool(value),
            Value::Integer(int) => visit_integer(int, visitor),
            Value::Bytes(bytes) => visitor.visit_byte_buf(bytes),
            Value::Text(text) => visitor.visit_string(text),
            Value::List(items) => visit_list(items, visitor),
            Value::Dict(dict) => visit_dict(dict, visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            value => visitor.visit_some(Deserializer::new(value)),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Text(variant) => visitor.visit_enum(EnumDeserializer {
                variant: Key::Text(variant),
                value: None,
            }),
            Value::Bytes(variant) => visitor.visit_enum(EnumDeserializer {
                variant: Key::Bytes(variant),
                value: None,
            }),
            Value::Dict(dict) if dict.len() == 1 => match dict.into_iter().next() {
                Some((variant, value)) => visitor.visit_enum(EnumDeserializer {
                    variant,
                    value: Some(value),
                }),
                None => Err(de::Error::invalid_length(0, &"exactly one entry")),
            },
            other => Err(de::Error::invalid_type(
                unexpected(&other),
                &"a variant name or a dictionary with a single entry",
            )),
        }
    }

    serde_::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

/// Deserializer for dictionary keys and enum variant names
struct KeyDeserializer {
    key: Key,
}

impl<'de> de::Deserializer<'de> for KeyDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.key {
            Key::Bytes(bytes) => visitor.visit_byte_buf(bytes),
            Key::Text(text) => visitor.visit_string(text),
        }
    }

    serde_::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: vec::IntoIter<Value>,
}

impl<'de> SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(Deserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<Key, Value>,
    /// Value of the key handed out last
    value: Option<Value>,
}

impl<'de> MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(KeyDeserializer { key }).map(Some)
            },
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(Deserializer::new(value)),
            None => Err(de::Error::custom("dictionary value requested before its key")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: Key,
    value: Option<Value>,
}

impl<'de> EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, VariantDeserializer)>
    where
        V: DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(KeyDeserializer { key: self.variant })?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None | Some(Value::Null) => Ok(()),
            Some(other) => Err(de::Error::invalid_type(unexpected(&other), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(Deserializer::new(value)),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"newtype variant",
            )),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(Value::List(items)) => visit_list(items, visitor),
            Some(other) => Err(de::Error::invalid_type(unexpected(&other), &"tuple variant")),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"tuple variant",
            )),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Some(Value::Dict(dict)) => visit_dict(dict, visitor),
            Some(other) => Err(de::Error::invalid_type(unexpected(&other), &"struct variant")),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"struct variant",
            )),
        }
    }
}
