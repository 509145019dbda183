//! Encode/decode method frame bodies from static schemas.
//!
//! A frame body is `[class_id: u16][method_id: u16][fields...]`, big-endian,
//! with maximal runs of consecutive boolean fields packed LSB-first into
//! `ceil(k/8)` bytes (spec 4.2.5.2). Field types come from the registry, not
//! the byte stream, so decode is driven entirely by the resolved schema.

use crate::registry;
use crate::schema::{FieldType, MethodDef};
use crate::value::FieldValue;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Read, Write};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("truncated stream: {0}")]
    TruncatedStream(#[from] std::io::Error),
    #[error("unknown method: class {class_id}, method {method_id}")]
    UnknownMethod { class_id: u16, method_id: u16 },
    #[error("{method} takes {expected} field values, got {actual}")]
    FieldCountMismatch {
        method: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("no such field: {0}")]
    NoSuchField(String),
    #[error("{method}.{field} expects a {expected:?} value")]
    TypeMismatch {
        method: &'static str,
        field: &'static str,
        expected: FieldType,
    },
    #[error("{what} of {len} bytes exceeds the wire limit of {max}")]
    ValueTooLong {
        what: &'static str,
        len: usize,
        max: usize,
    },
    #[error("short strings must be valid UTF-8")]
    InvalidString,
}

/// A concrete method: a definition reference plus one value per schema entry,
/// in schema order.
///
/// A `Method` is a value object; two methods are equal iff their
/// (class-id, method-id) pairs and ordered values are equal.
#[derive(Debug, Clone)]
pub struct Method {
    def: &'static MethodDef,
    values: Vec<FieldValue>,
}

impl Method {
    /// Build a method from values supplied in schema order.
    ///
    /// The value count must equal the field count, and each value must match
    /// its declared field type; decode relies on this to pack booleans
    /// without re-checking.
    pub fn new(def: &'static MethodDef, values: Vec<FieldValue>) -> Result<Self, CodecError> {
        if values.len() != def.fields.len() {
            return Err(CodecError::FieldCountMismatch {
                method: def.name,
                expected: def.fields.len(),
                actual: values.len(),
            });
        }
        for (spec, value) in def.fields.iter().zip(&values) {
            if value.field_type() != spec.ty {
                return Err(CodecError::TypeMismatch {
                    method: def.name,
                    field: spec.name,
                    expected: spec.ty,
                });
            }
        }
        Ok(Method { def, values })
    }

    pub fn def(&self) -> &'static MethodDef {
        self.def
    }

    pub fn class_id(&self) -> u16 {
        self.def.class_id
    }

    pub fn method_id(&self) -> u16 {
        self.def.method_id
    }

    pub fn name(&self) -> &'static str {
        self.def.name
    }

    pub fn synchronous(&self) -> bool {
        self.def.synchronous
    }

    /// Field values in schema order.
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    /// Look up a field value by schema name.
    pub fn field(&self, name: &str) -> Result<&FieldValue, CodecError> {
        self.def
            .fields
            .iter()
            .position(|f| f.name == name)
            .map(|i| &self.values[i])
            .ok_or_else(|| CodecError::NoSuchField(name.to_string()))
    }

    /// Decode one method from the cursor: the 4-byte (class-id, method-id)
    /// prefix, then each schema field in order.
    ///
    /// Consecutive `Bool` entries are counted rather than read one by one;
    /// the pending run is flushed through [`decode_bools`] when a non-bool
    /// entry is met, and once more if the schema ends in booleans. A failed
    /// decode leaves the cursor position undefined for this frame.
    pub fn decode(r: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let class_id = r.read_u16::<BigEndian>()?;
        let method_id = r.read_u16::<BigEndian>()?;
        let def = registry::lookup(class_id, method_id)
            .ok_or(CodecError::UnknownMethod { class_id, method_id })?;

        let mut values = Vec::with_capacity(def.fields.len());
        let mut pending_bits = 0usize;
        for spec in def.fields {
            if spec.ty == FieldType::Bool {
                pending_bits += 1;
                continue;
            }
            if pending_bits > 0 {
                values.extend(decode_bools(r, pending_bits)?.into_iter().map(FieldValue::Bool));
                pending_bits = 0;
            }
            values.push(decode_field(r, spec.ty)?);
        }
        if pending_bits > 0 {
            values.extend(decode_bools(r, pending_bits)?.into_iter().map(FieldValue::Bool));
        }

        // Counts match by construction: one value was pushed per schema entry.
        Ok(Method { def, values })
    }

    /// Decode one method from a complete frame body.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Method::decode(&mut Cursor::new(bytes))
    }

    /// Encode this method onto the stream; the exact mirror of [`Method::decode`].
    ///
    /// Consecutive boolean values are buffered and flushed through
    /// [`encode_bools`] before the next non-bool field and once at the end.
    pub fn encode(&self, w: &mut Vec<u8>) -> Result<(), CodecError> {
        w.write_u16::<BigEndian>(self.def.class_id)?;
        w.write_u16::<BigEndian>(self.def.method_id)?;

        let mut bits = Vec::new();
        for value in &self.values {
            if let FieldValue::Bool(b) = value {
                bits.push(*b);
                continue;
            }
            if !bits.is_empty() {
                encode_bools(w, &bits)?;
                bits.clear();
            }
            encode_field(w, value)?;
        }
        if !bits.is_empty() {
            encode_bools(w, &bits)?;
        }
        Ok(())
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        self.encode(&mut out)?;
        Ok(out)
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        self.def.method_type() == other.def.method_type() && self.values == other.values
    }
}

/// Read one field of the given type; exactly the bytes the type occupies.
///
/// `Bool` here is the whole-octet form used inside tables; method bodies go
/// through [`decode_bools`] instead.
pub fn decode_field(r: &mut Cursor<&[u8]>, ty: FieldType) -> Result<FieldValue, CodecError> {
    Ok(match ty {
        FieldType::Bool => FieldValue::Bool(r.read_u8()? != 0),
        FieldType::Octet => FieldValue::Octet(r.read_u8()?),
        FieldType::Short => FieldValue::Short(r.read_u16::<BigEndian>()?),
        FieldType::Long => FieldValue::Long(r.read_u32::<BigEndian>()?),
        FieldType::LongLong => FieldValue::LongLong(r.read_u64::<BigEndian>()?),
        FieldType::Timestamp => FieldValue::Timestamp(r.read_u64::<BigEndian>()?),
        FieldType::ShortStr => {
            let len = r.read_u8()? as usize;
            let mut buf = vec![0u8; len];
            r.read_exact(&mut buf)?;
            let s = String::from_utf8(buf).map_err(|_| CodecError::InvalidString)?;
            FieldValue::ShortStr(s)
        }
        FieldType::LongStr => {
            let len = r.read_u32::<BigEndian>()? as usize;
            let mut buf = vec![0u8; len];
            r.read_exact(&mut buf)?;
            FieldValue::LongStr(buf)
        }
        FieldType::Table => {
            let len = r.read_u32::<BigEndian>()? as usize;
            let mut buf = vec![0u8; len];
            r.read_exact(&mut buf)?;
            FieldValue::Table(buf)
        }
    })
}

/// Append one field's canonical wire form; no other side effect.
pub fn encode_field(w: &mut Vec<u8>, value: &FieldValue) -> Result<(), CodecError> {
    match value {
        FieldValue::Bool(b) => w.write_u8(*b as u8)?,
        FieldValue::Octet(x) => w.write_u8(*x)?,
        FieldValue::Short(x) => w.write_u16::<BigEndian>(*x)?,
        FieldValue::Long(x) => w.write_u32::<BigEndian>(*x)?,
        FieldValue::LongLong(x) => w.write_u64::<BigEndian>(*x)?,
        FieldValue::Timestamp(x) => w.write_u64::<BigEndian>(*x)?,
        FieldValue::ShortStr(s) => {
            if s.len() > u8::MAX as usize {
                return Err(CodecError::ValueTooLong {
                    what: "short string",
                    len: s.len(),
                    max: u8::MAX as usize,
                });
            }
            w.write_u8(s.len() as u8)?;
            w.write_all(s.as_bytes())?;
        }
        FieldValue::LongStr(b) => {
            write_long_payload(w, "long string", b)?;
        }
        FieldValue::Table(b) => {
            write_long_payload(w, "field table", b)?;
        }
    }
    Ok(())
}

fn write_long_payload(w: &mut Vec<u8>, what: &'static str, b: &[u8]) -> Result<(), CodecError> {
    if b.len() > u32::MAX as usize {
        return Err(CodecError::ValueTooLong {
            what,
            len: b.len(),
            max: u32::MAX as usize,
        });
    }
    w.write_u32::<BigEndian>(b.len() as u32)?;
    w.write_all(b)?;
    Ok(())
}

/// Read `count` booleans packed LSB-first into `ceil(count/8)` bytes.
///
/// Bit 0 of the first byte is the first boolean, continuing into subsequent
/// bytes once 8 bits are exhausted. Unused high bits of the final byte are
/// ignored, not validated.
pub fn decode_bools(r: &mut Cursor<&[u8]>, count: usize) -> Result<Vec<bool>, CodecError> {
    let mut out = Vec::with_capacity(count);
    let bytes = (count + 7) / 8;
    for i in 0..bytes {
        let byte = r.read_u8()?;
        let bits = (count - i * 8).min(8);
        for bit in 0..bits {
            out.push((byte >> bit) & 1 != 0);
        }
    }
    Ok(out)
}

/// Pack booleans LSB-first into the minimum number of whole bytes; the exact
/// inverse of [`decode_bools`]. Unused high bits of the final byte are zero.
/// An empty slice writes nothing.
pub fn encode_bools(w: &mut Vec<u8>, bools: &[bool]) -> Result<(), CodecError> {
    for chunk in bools.chunks(8) {
        let mut byte = 0u8;
        for (bit, &b) in chunk.iter().enumerate() {
            if b {
                byte |= 1 << bit;
            }
        }
        w.write_u8(byte)?;
    }
    Ok(())
}
