//! Serde bencodex serialization.
//!
//! Data is first serialized into a [`Value`] tree and then canonically
//! encoded, so map and struct fields may arrive in any order.

use std::io::Write;

use serde_::ser::{
    self, Serialize, SerializeSeq, SerializeTuple, SerializeTupleStruct, SerializeTupleVariant,
};

use crate::{
    encoding,
    serde::{Error, Result},
    value::{Dict, Key, Value},
};

mod map_serializer;

pub use map_serializer::MapSerializer;

/// Serialize an instance of `T` to a [`Value`]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(Serializer)
}

/// Serialize an instance of `T` to canonical bencodex
pub fn to_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    Ok(encoding::encode_to_bytes(&to_value(value)?))
}

/// Serialize an instance of `T` as canonical bencodex into `writer`
pub fn to_writer<T, W>(value: &T, writer: W) -> Result<()>
where
    T: ?Sized + Serialize,
    W: Write,
{
    encoding::encode_to(&to_value(value)?, writer)?;
    Ok(())
}

/// A serde serializer producing [`Value`]s
#[derive(Clone, Copy, Debug, Default)]
pub struct Serializer;

/// Wrap `value` in the externally tagged form `{variant: value}`.
fn tagged(variant: &'static str, value: Value) -> Value {
    let mut dict = Dict::with_capacity(1);
    dict.insert(Key::from(variant), value);
    Value::Dict(dict)
}

fn unsupported(type_name: &str) -> Error {
    encoding::Error::unsupported(type_name).into()
}

impl ser::Serializer for Serializer {
    type Error = Error;
    type Ok = Value;
    type SerializeMap = MapSerializer;
    type SerializeSeq = SeqSerializer;
    type SerializeStruct = MapSerializer;
    type SerializeStructVariant = MapSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = SeqSerializer;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(v.into())
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(v.into())
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(v.into())
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(v.into())
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(v.into())
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(v.into())
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(v.into())
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(v.into())
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(v.into())
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(v.into())
    }

    fn serialize_f32(self, _v: f32) -> Result<Value> {
        Err(unsupported("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<Value> {
        Err(unsupported("f64"))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Text(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, value.serialize(self)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqSerializer> {
        Ok(SeqSerializer::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqSerializer> {
        Ok(SeqSerializer::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SeqSerializer> {
        Ok(SeqSerializer::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SeqSerializer> {
        Ok(SeqSerializer::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<MapSerializer> {
        Ok(MapSerializer::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<MapSerializer> {
        Ok(MapSerializer::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<MapSerializer> {
        Ok(MapSerializer::new(len, Some(variant)))
    }
}

/// Sub-serializer for sequences, tuples and tuple variants.
pub struct SeqSerializer {
    items: Vec<Value>,
    variant: Option<&'static str>,
}

impl SeqSerializer {
    fn new(len: usize, variant: Option<&'static str>) -> Self {
        SeqSerializer {
            items: Vec::with_capacity(len),
            variant,
        }
    }

    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.items.push(value.serialize(Serializer)?);
        Ok(())
    }

    fn finish(self) -> Value {
        let list = Value::List(self.items);
        match self.variant {
            Some(variant) => tagged(variant, list),
            None => list,
        }
    }
}

impl SerializeSeq for SeqSerializer {
    type Error = Error;
    type Ok = Value;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl SerializeTuple for SeqSerializer {
    type Error = Error;
    type Ok = Value;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl SerializeTupleStruct for SeqSerializer {
    type Error = Error;
    type Ok = Value;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl SerializeTupleVariant for SeqSerializer {
    type Error = Error;
    type Ok = Value;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}
