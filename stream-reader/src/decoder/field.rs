use std::io::{Read, Seek};

use super::StreamDecoder;
use crate::{endian::Endianness, Error, Result};

/// Decoder properties that can be addressed by name
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Offset,
    Size,
    Endianness,
}

impl Field {
    /// Looks up a field by name, ignoring case. `endianess` is accepted as an older spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "offset" => Some(Self::Offset),
            "size" => Some(Self::Size),
            "endianness" | "endianess" => Some(Self::Endianness),
            _ => None,
        }
    }

    /// Whether [`StreamDecoder::set`] can assign this field
    pub const fn is_writable(self) -> bool {
        matches!(self, Self::Offset)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Integer(u64),
    Order(Endianness),
}

impl<R: Read + Seek> StreamDecoder<R> {
    /// Reads a field by name
    pub fn get(&mut self, name: &str) -> Result<FieldValue> {
        match Field::from_name(name) {
            Some(Field::Offset) => self.offset().map(FieldValue::Integer),
            Some(Field::Size) => Ok(FieldValue::Integer(self.size())),
            Some(Field::Endianness) => Ok(FieldValue::Order(self.endianness())),
            None => Err(Error::FieldNotFound(name.to_owned())),
        }
    }

    /// Assigns a field by name. Only the offset can be assigned.
    pub fn set(&mut self, name: &str, value: i64) -> Result<()> {
        match Field::from_name(name) {
            Some(Field::Offset) => self.set_offset(value),
            _ => Err(Error::InvalidArgument(name.to_owned())),
        }
    }
}
