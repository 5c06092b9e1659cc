//! # Decoder
//!
//! [`Depolorizer`] reads one top-level element and decodes it, either as a
//! scalar or against a [`PoloSchema`]. Null elements decode to the schema
//! kind's default value.

use crate::errors::PoloError;
use crate::schema::PoloSchema;
use crate::value::{Integer, PoloValue};
use crate::wire::{magnitude_from_bytes, read_varint, WireType};

/// One wire element: its type and its raw data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadBuffer<'a> {
    wire: WireType,
    data: &'a [u8],
}

impl<'a> ReadBuffer<'a> {
    /// Read a top-level element: a wire tag varint followed by the data.
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, PoloError> {
        if bytes.is_empty() {
            return Err(PoloError::UnexpectedEof);
        }
        let (tag, consumed) = read_varint(bytes)?;
        Ok(Self {
            wire: WireType::try_from(tag & 0x0f)?,
            data: &bytes[consumed..],
        })
    }

    /// Wire type of the element.
    pub const fn wire(&self) -> WireType {
        self.wire
    }

    /// Raw element data.
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Split a pack element into its members.
    pub fn unpack(&self) -> Result<Vec<ReadBuffer<'a>>, PoloError> {
        if self.wire != WireType::Pack {
            return Err(PoloError::IncompatibleWire {
                expected: "pack",
                found: self.wire.name(),
            });
        }
        if self.data.is_empty() {
            return Ok(Vec::new());
        }

        let (load_tag, consumed) = read_varint(self.data)?;
        if load_tag & 0x0f != WireType::Load as u64 {
            return Err(PoloError::InvalidLoad(format!(
                "load tag has wire type {}",
                load_tag & 0x0f
            )));
        }
        let head_len = usize::try_from(load_tag >> 4)
            .map_err(|_| PoloError::InvalidLoad("header length overflow".to_string()))?;
        let head_end = consumed
            .checked_add(head_len)
            .filter(|end| *end <= self.data.len())
            .ok_or(PoloError::UnexpectedEof)?;

        let mut head = &self.data[consumed..head_end];
        let body = &self.data[head_end..];

        let mut tags = Vec::new();
        while !head.is_empty() {
            let (tag, used) = read_varint(head)?;
            let offset = usize::try_from(tag >> 4)
                .map_err(|_| PoloError::InvalidLoad("offset overflow".to_string()))?;
            tags.push((offset, WireType::try_from(tag & 0x0f)?));
            head = &head[used..];
        }

        let mut elements = Vec::with_capacity(tags.len());
        for (index, (offset, wire)) in tags.iter().enumerate() {
            let end = tags.get(index + 1).map_or(body.len(), |(next, _)| *next);
            if *offset > end || end > body.len() {
                return Err(PoloError::InvalidLoad(format!(
                    "element {index} spans {offset}..{end} of a {} byte body",
                    body.len()
                )));
            }
            elements.push(ReadBuffer {
                wire: *wire,
                data: &body[*offset..end],
            });
        }
        Ok(elements)
    }

    fn incompatible(&self, expected: &'static str) -> PoloError {
        PoloError::IncompatibleWire {
            expected,
            found: self.wire.name(),
        }
    }

    fn decode_integer(&self) -> Result<Integer, PoloError> {
        match self.wire {
            WireType::Null => Ok(Integer::ZERO),
            WireType::PosInt => Ok(Integer::new(false, magnitude_from_bytes(self.data)?)),
            WireType::NegInt => Ok(Integer::new(true, magnitude_from_bytes(self.data)?)),
            _ => Err(self.incompatible("integer")),
        }
    }

    fn decode_bool(&self) -> Result<bool, PoloError> {
        match self.wire {
            WireType::Null | WireType::False => Ok(false),
            WireType::True => Ok(true),
            _ => Err(self.incompatible("bool")),
        }
    }

    fn decode_string(&self) -> Result<String, PoloError> {
        match self.wire {
            WireType::Null => Ok(String::new()),
            WireType::Word => String::from_utf8(self.data.to_vec()).map_err(|_| PoloError::InvalidUtf8),
            _ => Err(self.incompatible("string")),
        }
    }

    fn decode_bytes(&self) -> Result<Vec<u8>, PoloError> {
        match self.wire {
            WireType::Null => Ok(Vec::new()),
            WireType::Word | WireType::Raw => Ok(self.data.to_vec()),
            _ => Err(self.incompatible("bytes")),
        }
    }

    /// Decode this element against `schema`.
    pub fn decode(&self, schema: &PoloSchema) -> Result<PoloValue, PoloError> {
        if self.wire == WireType::Null {
            return Ok(schema.default_value());
        }

        Ok(match schema {
            PoloSchema::Null => return Err(self.incompatible("null")),
            PoloSchema::Bool => PoloValue::Bool(self.decode_bool()?),
            PoloSchema::Integer => PoloValue::Integer(self.decode_integer()?),
            PoloSchema::String => PoloValue::String(self.decode_string()?),
            PoloSchema::Bytes => PoloValue::Bytes(self.decode_bytes()?),
            PoloSchema::Array(values) => PoloValue::List(
                self.unpack()?
                    .iter()
                    .map(|element| element.decode(values))
                    .collect::<Result<_, _>>()?,
            ),
            PoloSchema::Map { keys, values } => {
                let elements = self.unpack()?;
                if elements.len() % 2 != 0 {
                    return Err(PoloError::OddMapElements(elements.len()));
                }
                PoloValue::Map(
                    elements
                        .chunks(2)
                        .map(|pair| -> Result<_, PoloError> {
                            Ok((pair[0].decode(keys)?, pair[1].decode(values)?))
                        })
                        .collect::<Result<_, PoloError>>()?,
                )
            }
            PoloSchema::Struct(fields) => {
                let elements = self.unpack()?;
                let mut decoded = Vec::with_capacity(fields.len());
                for (index, (name, field_schema)) in fields.iter().enumerate() {
                    let value = match elements.get(index) {
                        Some(element) => element.decode(field_schema)?,
                        None => field_schema.default_value(),
                    };
                    decoded.push((name.clone(), value));
                }
                PoloValue::Struct(decoded)
            }
        })
    }
}

/// Top-level POLO decoder.
#[derive(Debug, Clone, Copy)]
pub struct Depolorizer<'a> {
    buffer: ReadBuffer<'a>,
}

impl<'a> Depolorizer<'a> {
    /// Read the top-level element of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Result<Self, PoloError> {
        Ok(Self {
            buffer: ReadBuffer::from_bytes(bytes)?,
        })
    }

    /// Wire type of the top-level element.
    pub const fn wire(&self) -> WireType {
        self.buffer.wire()
    }

    /// True if the top-level element is null.
    pub fn is_null(&self) -> bool {
        self.buffer.wire() == WireType::Null
    }

    /// Decode as an integer.
    pub fn depolorize_integer(&self) -> Result<Integer, PoloError> {
        self.buffer.decode_integer()
    }

    /// Decode as a boolean.
    pub fn depolorize_bool(&self) -> Result<bool, PoloError> {
        self.buffer.decode_bool()
    }

    /// Decode as a string.
    pub fn depolorize_string(&self) -> Result<String, PoloError> {
        self.buffer.decode_string()
    }

    /// Decode as a byte string.
    pub fn depolorize_bytes(&self) -> Result<Vec<u8>, PoloError> {
        self.buffer.decode_bytes()
    }

    /// Decode against `schema`.
    pub fn depolorize(&self, schema: &PoloSchema) -> Result<PoloValue, PoloError> {
        self.buffer.decode(schema)
    }
}

/// Decode `bytes` against `schema`.
pub fn depolorize(bytes: &[u8], schema: &PoloSchema) -> Result<PoloValue, PoloError> {
    Depolorizer::new(bytes)?.depolorize(schema)
}
