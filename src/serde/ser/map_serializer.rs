use serde_::ser::{self, Serialize, SerializeMap, SerializeStruct, SerializeStructVariant};

use crate::{
    serde::{ser::tagged, Error, Result},
    value::{Dict, Key},
    Value,
};

use super::Serializer;

/// Bencodex sub-serializer for maps, structs and struct variants.
///
/// Entries are collected into a [`Dict`]; the encoder sorts them, so the order
/// serde visits fields in does not matter. Keys must serialize to text or a byte
/// string.
pub struct MapSerializer {
    dict: Dict,
    key: Option<Key>,
    variant: Option<&'static str>,
}

impl MapSerializer {
    pub(crate) fn new(len: usize, variant: Option<&'static str>) -> Self {
        MapSerializer {
            dict: Dict::with_capacity(len),
            key: None,
            variant,
        }
    }

    fn insert<T>(&mut self, key: Key, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.dict.insert(key, value.serialize(Serializer)?);
        Ok(())
    }

    fn finish(self) -> Result<Value> {
        if self.key.is_some() {
            return Err(ser::Error::custom("map key serialized without a value"));
        }
        let dict = Value::Dict(self.dict);
        Ok(match self.variant {
            Some(variant) => tagged(variant, dict),
            None => dict,
        })
    }
}

impl SerializeMap for MapSerializer {
    type Error = Error;
    type Ok = Value;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if self.key.is_some() {
            return Err(ser::Error::custom("map key serialized without a value"));
        }
        self.key = Some(Key::try_from(key.serialize(Serializer)?)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match self.key.take() {
            Some(key) => self.insert(key, value),
            None => Err(ser::Error::custom("map value serialized without a key")),
        }
    }

    fn end(self) -> Result<Value> {
        self.finish()
    }
}

impl SerializeStruct for MapSerializer {
    type Error = Error;
    type Ok = Value;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(Key::from(key), value)
    }

    fn end(self) -> Result<Value> {
        self.finish()
    }
}

impl SerializeStructVariant for MapSerializer {
    type Error = Error;
    type Ok = Value;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(Key::from(key), value)
    }

    fn end(self) -> Result<Value> {
        self.finish()
    }
}
