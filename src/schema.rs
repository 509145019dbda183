//! Static method schemas: field type descriptors and method definitions.

/// Wire type of a single method field.
///
/// The byte-level rules live in [`crate::codec`]; consecutive `Bool` fields
/// are bit-packed there rather than occupying a byte each (spec 4.2.5.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Bool,
    Octet,
    Short,
    Long,
    LongLong,
    ShortStr,
    LongStr,
    Timestamp,
    Table,
}

/// One ordered schema entry. Names are unique within a method; order is
/// wire order and drives the boolean bit-packing scan.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

impl FieldSpec {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        FieldSpec { name, ty }
    }
}

/// Immutable definition of one AMQP method, keyed by (class-id, method-id).
///
/// Definitions are built once (see [`crate::registry`]) and shared by
/// reference for the life of the process. The `synchronous` flag is
/// metadata for connection/channel logic; the codec does not interpret it.
#[derive(Debug)]
pub struct MethodDef {
    pub class_id: u16,
    pub method_id: u16,
    pub name: &'static str,
    pub synchronous: bool,
    pub fields: &'static [FieldSpec],
}

impl MethodDef {
    /// The (class-id, method-id) pair, spec 2.3.5.1 Method Frames.
    pub fn method_type(&self) -> (u16, u16) {
        (self.class_id, self.method_id)
    }
}
