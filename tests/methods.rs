//! Codec tests: round-trips over the catalogue, exact wire vectors,
//! bit-packing boundaries, and the error paths.

use amqpmethod::{registry, CodecError, FieldSpec, FieldType, FieldValue, Method, MethodDef};
use std::io::Cursor;

fn sample(ty: FieldType, i: usize) -> FieldValue {
    match ty {
        FieldType::Bool => FieldValue::Bool(i % 2 == 0),
        FieldType::Octet => FieldValue::Octet(i as u8),
        FieldType::Short => FieldValue::Short(7 + i as u16),
        FieldType::Long => FieldValue::Long(70_000 + i as u32),
        FieldType::LongLong => FieldValue::LongLong(5_000_000_000 + i as u64),
        FieldType::ShortStr => FieldValue::ShortStr(format!("field-{i}")),
        FieldType::LongStr => FieldValue::LongStr(vec![0xAB; 3 + i]),
        FieldType::Timestamp => FieldValue::Timestamp(1_469_000_000 + i as u64),
        FieldType::Table => FieldValue::Table(vec![]),
    }
}

fn build(class_id: u16, method_id: u16, values: Vec<FieldValue>) -> Method {
    let def = registry::lookup(class_id, method_id).expect("registered method");
    Method::new(def, values).expect("valid values")
}

#[test]
fn round_trip_every_registered_method() {
    for def in registry::METHODS {
        let values: Vec<FieldValue> = def
            .fields
            .iter()
            .enumerate()
            .map(|(i, spec)| sample(spec.ty, i))
            .collect();
        let method = Method::new(def, values).expect("construct");
        let bytes = method.to_bytes().expect("encode");
        let decoded = Method::from_bytes(&bytes).expect("decode");
        assert_eq!(decoded, method, "{} did not round-trip", def.name);
    }
}

#[test]
fn prefix_is_class_then_method_big_endian() {
    let qos = build(
        60,
        10,
        vec![
            FieldValue::Long(1024),
            FieldValue::Short(10),
            FieldValue::Bool(true),
        ],
    );
    let bytes = qos.to_bytes().expect("encode");
    assert_eq!(&bytes[..4], &[0, 60, 0, 10]);
}

#[test]
fn empty_schema_is_prefix_only() {
    let select = build(90, 10, vec![]);
    let bytes = select.to_bytes().expect("encode");
    assert_eq!(bytes, vec![0, 90, 0, 10]);

    let decoded = Method::from_bytes(&bytes).expect("decode");
    assert!(decoded.values().is_empty());
    assert_eq!(decoded.name(), "tx.select");
}

#[test]
fn trailing_bool_flushes_one_byte() {
    // basic.qos ends in a single boolean: 4 prefix + 4 + 2 + 1 bytes.
    let qos = build(
        60,
        10,
        vec![
            FieldValue::Long(1024),
            FieldValue::Short(10),
            FieldValue::Bool(true),
        ],
    );
    let bytes = qos.to_bytes().expect("encode");
    assert_eq!(bytes, vec![0, 60, 0, 10, 0, 0, 4, 0, 0, 10, 1]);
}

#[test]
fn five_bool_run_packs_into_one_byte() {
    // exchange.declare: passive, durable, auto_delete, internal, no_wait.
    let declare = build(
        40,
        10,
        vec![
            FieldValue::Short(0),
            FieldValue::ShortStr("e1".into()),
            FieldValue::ShortStr("topic".into()),
            FieldValue::Bool(true),
            FieldValue::Bool(false),
            FieldValue::Bool(true),
            FieldValue::Bool(false),
            FieldValue::Bool(true),
            FieldValue::Table(vec![]),
        ],
    );
    let bytes = declare.to_bytes().expect("encode");
    let expected = vec![
        0, 40, 0, 10, // class-id, method-id
        0, 0, // reserved_1
        2, b'e', b'1', // exchange
        5, b't', b'o', b'p', b'i', b'c', // type
        0b0001_0101, // passive, durable, auto_delete, internal, no_wait
        0, 0, 0, 0, // empty arguments table
    ];
    assert_eq!(bytes, expected);
    assert_eq!(Method::from_bytes(&bytes).expect("decode"), declare);
}

#[test]
fn bool_run_between_typed_fields_flushes_before_next_field() {
    // basic.deliver: redelivered sits between delivery_tag and exchange.
    let deliver = build(
        60,
        60,
        vec![
            FieldValue::ShortStr("ctag".into()),
            FieldValue::LongLong(9),
            FieldValue::Bool(true),
            FieldValue::ShortStr("amq.topic".into()),
            FieldValue::ShortStr("k".into()),
        ],
    );
    let bytes = deliver.to_bytes().expect("encode");
    // prefix(4) + ctag(5) + delivery_tag(8), then exactly one bit-pack byte.
    assert_eq!(bytes[4 + 5 + 8], 1);
    assert_eq!(bytes[4 + 5 + 8 + 1], 9); // length prefix of "amq.topic"
    assert_eq!(Method::from_bytes(&bytes).expect("decode"), deliver);
}

static NOWAIT_NAME: MethodDef = MethodDef {
    class_id: 61,
    method_id: 200,
    name: "test.nowait-name",
    synchronous: false,
    fields: &[
        FieldSpec::new("no_wait", FieldType::Bool),
        FieldSpec::new("name", FieldType::ShortStr),
    ],
};

#[test]
fn leading_bool_then_string_wire_vector() {
    let m = Method::new(
        &NOWAIT_NAME,
        vec![FieldValue::Bool(true), FieldValue::ShortStr("foo".into())],
    )
    .expect("construct");
    let bytes = m.to_bytes().expect("encode");
    assert_eq!(
        &bytes[4..],
        &[0b0000_0001, 3, b'f', b'o', b'o'],
        "single packed boolean, then ShortStr"
    );
}

static MIXED_RUNS: MethodDef = MethodDef {
    class_id: 61,
    method_id: 201,
    name: "test.mixed-runs",
    synchronous: false,
    fields: &[
        FieldSpec::new("a", FieldType::Bool),
        FieldSpec::new("b", FieldType::Bool),
        FieldSpec::new("c", FieldType::Bool),
        FieldSpec::new("d", FieldType::Short),
        FieldSpec::new("e", FieldType::Bool),
    ],
};

#[test]
fn two_bool_runs_split_by_typed_field_wire_vector() {
    let m = Method::new(
        &MIXED_RUNS,
        vec![
            FieldValue::Bool(true),
            FieldValue::Bool(false),
            FieldValue::Bool(true),
            FieldValue::Short(42),
            FieldValue::Bool(true),
        ],
    )
    .expect("construct");
    let bytes = m.to_bytes().expect("encode");
    assert_eq!(&bytes[4..], &[0b0000_0101, 0, 42, 0b0000_0001]);
}

#[test]
fn unknown_method_consumes_exactly_the_prefix() {
    let raw = [0u8, 1, 0, 1, 0xFF, 0xFF];
    let mut cursor = Cursor::new(&raw[..]);
    let err = Method::decode(&mut cursor).expect_err("no class 1");
    assert!(matches!(
        err,
        CodecError::UnknownMethod { class_id: 1, method_id: 1 }
    ));
    assert_eq!(cursor.position(), 4);
}

#[test]
fn truncated_stream_fails_decode() {
    let close = build(
        10,
        50,
        vec![
            FieldValue::Short(320),
            FieldValue::ShortStr("connection forced".into()),
            FieldValue::Short(0),
            FieldValue::Short(0),
        ],
    );
    let bytes = close.to_bytes().expect("encode");
    for cut in [1, 3, 5, bytes.len() - 1] {
        let err = Method::from_bytes(&bytes[..cut]).expect_err("short frame");
        assert!(matches!(err, CodecError::TruncatedStream(_)), "cut at {cut}");
    }
}

#[test]
fn construction_rejects_wrong_value_count() {
    let def = registry::lookup(20, 20).expect("channel.flow");
    let err = Method::new(def, vec![]).expect_err("missing value");
    assert!(matches!(
        err,
        CodecError::FieldCountMismatch { expected: 1, actual: 0, .. }
    ));

    let err = Method::new(def, vec![FieldValue::Bool(true), FieldValue::Bool(true)])
        .expect_err("extra value");
    assert!(matches!(
        err,
        CodecError::FieldCountMismatch { expected: 1, actual: 2, .. }
    ));
}

#[test]
fn construction_rejects_wrong_value_type() {
    let def = registry::lookup(20, 20).expect("channel.flow");
    let err = Method::new(def, vec![FieldValue::Octet(1)]).expect_err("not a bool");
    assert!(matches!(
        err,
        CodecError::TypeMismatch { field: "active", expected: FieldType::Bool, .. }
    ));
}

#[test]
fn field_access_by_name() {
    let get_ok = build(
        60,
        71,
        vec![
            FieldValue::LongLong(77),
            FieldValue::Bool(false),
            FieldValue::ShortStr("amq.direct".into()),
            FieldValue::ShortStr("rk".into()),
            FieldValue::Long(3),
        ],
    );
    assert_eq!(get_ok.field("delivery_tag").unwrap().as_u64(), Some(77));
    assert_eq!(get_ok.field("redelivered").unwrap().as_bool(), Some(false));
    assert_eq!(get_ok.field("exchange").unwrap().as_str(), Some("amq.direct"));

    let err = get_ok.field("consumer_tag").expect_err("not in schema");
    match err {
        CodecError::NoSuchField(name) => assert_eq!(name, "consumer_tag"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn equality_covers_type_and_values() {
    let a = build(20, 20, vec![FieldValue::Bool(true)]);
    let b = build(20, 20, vec![FieldValue::Bool(true)]);
    let c = build(20, 20, vec![FieldValue::Bool(false)]);
    let d = build(20, 21, vec![FieldValue::Bool(true)]);
    assert_eq!(a, b);
    assert_ne!(a, c, "same method, different values");
    assert_ne!(a, d, "same values, different method id");
}

#[test]
fn short_string_over_255_bytes_fails_encode() {
    let def = registry::lookup(20, 10).expect("channel.open");
    let m = Method::new(def, vec![FieldValue::ShortStr("x".repeat(256))]).expect("construct");
    let err = m.to_bytes().expect_err("too long");
    assert!(matches!(
        err,
        CodecError::ValueTooLong { len: 256, max: 255, .. }
    ));
}

#[test]
fn short_string_must_decode_as_utf8() {
    // channel.open with a 2-byte reserved_1 that is not valid UTF-8.
    let raw = [0u8, 20, 0, 10, 2, 0xC3, 0x28];
    let err = Method::from_bytes(&raw).expect_err("invalid utf-8");
    assert!(matches!(err, CodecError::InvalidString));
}

#[test]
fn decode_leaves_cursor_after_frame_body() {
    let flow = build(20, 20, vec![FieldValue::Bool(true)]);
    let mut bytes = flow.to_bytes().expect("encode");
    bytes.extend_from_slice(&[0xDE, 0xAD]);
    let mut cursor = Cursor::new(&bytes[..]);
    let decoded = Method::decode(&mut cursor).expect("decode");
    assert_eq!(decoded, flow);
    assert_eq!(cursor.position(), (bytes.len() - 2) as u64);
}

#[test]
fn table_payload_round_trips_opaquely() {
    // Interior table bytes are carried as-is under a u32 length prefix.
    let interior = vec![4, b'h', b'o', b's', b't', b'S', 0, 0, 0, 2, b'h', b'i'];
    let start_ok = build(
        10,
        11,
        vec![
            FieldValue::Table(interior.clone()),
            FieldValue::ShortStr("PLAIN".into()),
            FieldValue::LongStr(b"\0guest\0guest".to_vec()),
            FieldValue::ShortStr("en_US".into()),
        ],
    );
    let bytes = start_ok.to_bytes().expect("encode");
    assert_eq!(&bytes[4..8], &(interior.len() as u32).to_be_bytes());
    let decoded = Method::from_bytes(&bytes).expect("decode");
    assert_eq!(decoded.field("client_properties").unwrap().as_bytes(), Some(&interior[..]));
}
