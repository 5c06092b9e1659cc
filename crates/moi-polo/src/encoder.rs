//! # Encoder
//!
//! [`Polorizer`] accumulates elements. A single element serialises as its
//! wire tag followed by its data; several elements serialise as a pack.

use crate::errors::PoloError;
use crate::schema::PoloSchema;
use crate::value::{Integer, PoloValue};
use crate::wire::{header_tag, magnitude_bytes, write_varint, WireType};

#[derive(Debug, Clone)]
struct Element {
    wire: WireType,
    data: Vec<u8>,
}

/// Incremental POLO encoder.
#[derive(Debug, Clone, Default)]
pub struct Polorizer {
    elements: Vec<Element>,
}

impl Polorizer {
    /// Create an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, wire: WireType, data: Vec<u8>) {
        self.elements.push(Element { wire, data });
    }

    /// Append a null element.
    pub fn polorize_null(&mut self) {
        self.push(WireType::Null, Vec::new());
    }

    /// Append a boolean.
    pub fn polorize_bool(&mut self, value: bool) {
        let wire = if value { WireType::True } else { WireType::False };
        self.push(wire, Vec::new());
    }

    /// Append an integer as a minimal big-endian magnitude.
    pub fn polorize_integer(&mut self, value: impl Into<Integer>) {
        let value = value.into();
        let wire = if value.is_negative() {
            WireType::NegInt
        } else {
            WireType::PosInt
        };
        self.push(wire, magnitude_bytes(&value.magnitude()));
    }

    /// Append a UTF-8 string.
    pub fn polorize_string(&mut self, value: &str) {
        self.push(WireType::Word, value.as_bytes().to_vec());
    }

    /// Append a byte string.
    pub fn polorize_bytes(&mut self, value: &[u8]) {
        self.push(WireType::Word, value.to_vec());
    }

    /// Append the contents of another encoder as a nested pack.
    pub fn polorize_packed(&mut self, inner: Polorizer) {
        self.push(WireType::Pack, inner.load());
    }

    /// Append `value`, shaped by `schema`.
    ///
    /// Null values are accepted for every schema. Struct fields missing from
    /// the value are written with [`PoloSchema::absent_value`].
    pub fn polorize(&mut self, value: &PoloValue, schema: &PoloSchema) -> Result<(), PoloError> {
        match (schema, value) {
            (_, PoloValue::Null) => self.polorize_null(),
            (PoloSchema::Bool, PoloValue::Bool(v)) => self.polorize_bool(*v),
            (PoloSchema::Integer, PoloValue::Integer(v)) => self.polorize_integer(*v),
            (PoloSchema::String, PoloValue::String(v)) => self.polorize_string(v),
            (PoloSchema::Bytes, PoloValue::Bytes(v)) => self.polorize_bytes(v),
            (PoloSchema::Array(values), PoloValue::List(items)) => {
                let mut inner = Polorizer::new();
                for item in items {
                    inner.polorize(item, values)?;
                }
                self.polorize_packed(inner);
            }
            (PoloSchema::Map { keys, values }, PoloValue::Map(entries)) => {
                let mut sorted: Vec<&(PoloValue, PoloValue)> = entries.iter().collect();
                sorted.sort_by(|a, b| a.0.key_cmp(&b.0));

                let mut inner = Polorizer::new();
                for (key, value) in sorted {
                    inner.polorize(key, keys)?;
                    inner.polorize(value, values)?;
                }
                self.polorize_packed(inner);
            }
            (PoloSchema::Struct(fields), PoloValue::Struct(_)) => {
                let mut inner = Polorizer::new();
                for (name, field_schema) in fields {
                    match value.field(name) {
                        Some(field) => inner.polorize(field, field_schema)?,
                        None => inner.polorize(&field_schema.absent_value(), field_schema)?,
                    }
                }
                self.polorize_packed(inner);
            }
            (schema, value) => {
                return Err(PoloError::SchemaMismatch {
                    expected: schema.kind_name(),
                    found: value.kind_name(),
                })
            }
        }
        Ok(())
    }

    /// Pack body of the accumulated elements:
    /// `varint(len(head) << 4 | LOAD) || head || body`.
    fn load(&self) -> Vec<u8> {
        let mut head = Vec::new();
        let mut body = Vec::new();
        for element in &self.elements {
            write_varint(header_tag(body.len(), element.wire), &mut head);
            body.extend_from_slice(&element.data);
        }

        let mut out = Vec::with_capacity(head.len() + body.len() + 4);
        write_varint(
            ((head.len() as u64) << 4) | WireType::Load as u64,
            &mut out,
        );
        out.extend(head);
        out.extend(body);
        out
    }

    /// All elements as a pack, even when there is only one.
    pub fn packed(&self) -> Vec<u8> {
        let mut out = vec![WireType::Pack as u8];
        out.extend(self.load());
        out
    }

    /// Serialised output.
    ///
    /// An empty encoder yields a lone null tag.
    pub fn bytes(&self) -> Vec<u8> {
        match self.elements.as_slice() {
            [] => vec![WireType::Null as u8],
            [element] => {
                let mut out = Vec::with_capacity(element.data.len() + 1);
                write_varint(element.wire as u64, &mut out);
                out.extend_from_slice(&element.data);
                out
            }
            _ => self.packed(),
        }
    }
}

/// Encode a single value with its schema.
pub fn polorize(value: &PoloValue, schema: &PoloSchema) -> Result<Vec<u8>, PoloError> {
    let mut polorizer = Polorizer::new();
    polorizer.polorize(value, schema)?;
    Ok(polorizer.bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_create_schema() -> PoloSchema {
        PoloSchema::structure([
            ("symbol", PoloSchema::String),
            ("supply", PoloSchema::Integer),
            ("standard", PoloSchema::Integer),
            ("dimension", PoloSchema::Integer),
            ("is_stateful", PoloSchema::Bool),
            ("is_logical", PoloSchema::Bool),
            (
                "logic_payload",
                PoloSchema::structure([("manifest", PoloSchema::Bytes)]),
            ),
        ])
    }

    #[test]
    fn test_scalar_encodings() {
        let mut p = Polorizer::new();
        p.polorize_string("MOI");
        assert_eq!(hex::encode(p.bytes()), "064d4f49");

        let mut p = Polorizer::new();
        p.polorize_integer(500u64);
        assert_eq!(hex::encode(p.bytes()), "0301f4");

        let mut p = Polorizer::new();
        p.polorize_integer(-1i64);
        assert_eq!(hex::encode(p.bytes()), "0401");

        let mut p = Polorizer::new();
        p.polorize_bool(true);
        assert_eq!(p.bytes(), vec![0x02]);
    }

    #[test]
    fn test_struct_with_absent_fields() {
        let value = PoloValue::structure()
            .with("symbol", "MOI")
            .with("supply", 500u64)
            .with("standard", 0u64);

        let bytes = polorize(&value, &asset_create_schema()).unwrap();
        assert_eq!(hex::encode(bytes), "0e7f063353535151504d4f4901f4");
    }

    #[test]
    fn test_empty_array_is_empty_load() {
        let bytes = polorize(&PoloValue::List(vec![]), &PoloSchema::array(PoloSchema::Integer)).unwrap();
        assert_eq!(bytes, vec![0x0e, 0x0f]);
    }

    #[test]
    fn test_map_entries_sorted() {
        let schema = PoloSchema::map(PoloSchema::String, PoloSchema::Integer);
        let a = PoloValue::Map(vec![("b".into(), 2u64.into()), ("a".into(), 1u64.into())]);
        let b = PoloValue::Map(vec![("a".into(), 1u64.into()), ("b".into(), 2u64.into())]);
        assert_eq!(polorize(&a, &schema).unwrap(), polorize(&b, &schema).unwrap());
    }

    #[test]
    fn test_integer_map_keys_sort_by_value() {
        // 255 packs as `ff` and 256 as `01 00`; the value order wins
        let schema = PoloSchema::map(PoloSchema::Integer, PoloSchema::Integer);
        let value = PoloValue::Map(vec![
            (256u64.into(), 1u64.into()),
            (255u64.into(), 2u64.into()),
        ]);
        assert_eq!(
            hex::encode(polorize(&value, &schema).unwrap()),
            "0e4f03132343ff02010001"
        );
    }

    #[test]
    fn test_schema_mismatch() {
        let err = polorize(&PoloValue::from("x"), &PoloSchema::Integer).unwrap_err();
        assert_eq!(
            err,
            PoloError::SchemaMismatch {
                expected: "integer",
                found: "string"
            }
        );
    }

    #[test]
    fn test_empty_encoder_is_null() {
        assert_eq!(Polorizer::new().bytes(), vec![0x00]);
    }
}
