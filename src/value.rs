//! Runtime values for method fields (codec representation).

use crate::schema::FieldType;

/// A single field value as carried inside a method frame body.
///
/// Integer variants are the big-endian unsigned widths AMQP methods use.
/// `Table` holds the raw interior bytes of a field table; the table's
/// internal key/value rules are outside this crate, so it round-trips as
/// an opaque length-prefixed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Octet(u8),
    Short(u16),
    Long(u32),
    LongLong(u64),
    ShortStr(String),
    LongStr(Vec<u8>),
    Timestamp(u64),
    Table(Vec<u8>),
}

impl FieldValue {
    /// The type descriptor this value encodes as.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Bool(_) => FieldType::Bool,
            FieldValue::Octet(_) => FieldType::Octet,
            FieldValue::Short(_) => FieldType::Short,
            FieldValue::Long(_) => FieldType::Long,
            FieldValue::LongLong(_) => FieldType::LongLong,
            FieldValue::ShortStr(_) => FieldType::ShortStr,
            FieldValue::LongStr(_) => FieldType::LongStr,
            FieldValue::Timestamp(_) => FieldType::Timestamp,
            FieldValue::Table(_) => FieldType::Table,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            FieldValue::Octet(x) => Some(*x as u64),
            FieldValue::Short(x) => Some(*x as u64),
            FieldValue::Long(x) => Some(*x as u64),
            FieldValue::LongLong(x) => Some(*x),
            FieldValue::Timestamp(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::ShortStr(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::LongStr(b) => Some(b),
            FieldValue::Table(b) => Some(b),
            _ => None,
        }
    }
}
