//! # amqpmethod — AMQP 0-9-1 Method Frame Codec
//!
//! Schema-driven encoding and decoding of AMQP method frame bodies: the typed,
//! field-structured messages that carry protocol commands between client and
//! broker.
//!
//! The wire layout of a frame body is
//!
//! ```text
//! [class_id: u16][method_id: u16][field_1][field_2]...[field_n]
//! ```
//!
//! with both identifiers big-endian. Field types are not self-describing on
//! the wire; they come from the static [`registry`] keyed by the
//! (class-id, method-id) pair. Maximal runs of consecutive boolean fields are
//! bit-packed LSB-first into `ceil(k/8)` bytes (spec 4.2.5.2).
//!
//! ## Usage
//!
//! ```
//! use amqpmethod::{registry, FieldValue, Method};
//!
//! let def = registry::lookup(60, 40).unwrap(); // basic.publish
//! let publish = Method::new(
//!     def,
//!     vec![
//!         FieldValue::Short(0),
//!         FieldValue::ShortStr("logs".into()),
//!         FieldValue::ShortStr("app.audit".into()),
//!         FieldValue::Bool(true),
//!         FieldValue::Bool(false),
//!     ],
//! )
//! .unwrap();
//!
//! let bytes = publish.to_bytes().unwrap();
//! let decoded = Method::from_bytes(&bytes).unwrap();
//! assert_eq!(decoded, publish);
//! assert_eq!(decoded.field("routing_key").unwrap().as_str(), Some("app.audit"));
//! ```
//!
//! The frame-header envelope (size prefix, frame-type byte, frame-end octet)
//! and the network transport are the caller's concern; this crate covers only
//! the frame body.

pub mod codec;
pub mod registry;
pub mod schema;
pub mod value;

pub use codec::{CodecError, Method};
pub use schema::{FieldSpec, FieldType, MethodDef};
pub use value::FieldValue;
