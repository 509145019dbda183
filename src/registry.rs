//! The static method catalogue: every AMQP 0-9-1 (extended) method keyed by
//! its (class-id, method-id) pair.
//!
//! The table is a large constant built from the protocol specification. It is
//! indexed once behind a `OnceLock` and never mutated afterwards, so any
//! number of concurrent decode/encode calls can read it without locking.

use crate::schema::{FieldSpec, FieldType::*, MethodDef};
use std::collections::HashMap;
use std::sync::OnceLock;

const fn f(name: &'static str, ty: crate::schema::FieldType) -> FieldSpec {
    FieldSpec::new(name, ty)
}

/// All known method definitions, grouped by class.
pub static METHODS: &[MethodDef] = &[
    // Connection (class 10)
    MethodDef {
        class_id: 10,
        method_id: 10,
        name: "connection.start",
        synchronous: true,
        fields: &[
            f("version_major", Octet),
            f("version_minor", Octet),
            f("server_properties", Table),
            f("mechanisms", LongStr),
            f("locales", LongStr),
        ],
    },
    MethodDef {
        class_id: 10,
        method_id: 11,
        name: "connection.start-ok",
        synchronous: true,
        fields: &[
            f("client_properties", Table),
            f("mechanism", ShortStr),
            f("response", LongStr),
            f("locale", ShortStr),
        ],
    },
    MethodDef {
        class_id: 10,
        method_id: 20,
        name: "connection.secure",
        synchronous: true,
        fields: &[f("challenge", LongStr)],
    },
    MethodDef {
        class_id: 10,
        method_id: 21,
        name: "connection.secure-ok",
        synchronous: true,
        fields: &[f("response", LongStr)],
    },
    MethodDef {
        class_id: 10,
        method_id: 30,
        name: "connection.tune",
        synchronous: true,
        fields: &[
            f("channel_max", Short),
            f("frame_max", Long),
            f("heartbeat", Short),
        ],
    },
    MethodDef {
        class_id: 10,
        method_id: 31,
        name: "connection.tune-ok",
        synchronous: true,
        fields: &[
            f("channel_max", Short),
            f("frame_max", Long),
            f("heartbeat", Short),
        ],
    },
    MethodDef {
        class_id: 10,
        method_id: 40,
        name: "connection.open",
        synchronous: true,
        fields: &[
            f("virtual_host", ShortStr),
            f("reserved_1", ShortStr),
            f("reserved_2", Bool),
        ],
    },
    MethodDef {
        class_id: 10,
        method_id: 41,
        name: "connection.open-ok",
        synchronous: true,
        fields: &[f("reserved_1", ShortStr)],
    },
    MethodDef {
        class_id: 10,
        method_id: 50,
        name: "connection.close",
        synchronous: true,
        fields: &[
            f("reply_code", Short),
            f("reply_text", ShortStr),
            f("class_id", Short),
            f("method_id", Short),
        ],
    },
    MethodDef {
        class_id: 10,
        method_id: 51,
        name: "connection.close-ok",
        synchronous: true,
        fields: &[],
    },
    // Channel (class 20)
    MethodDef {
        class_id: 20,
        method_id: 10,
        name: "channel.open",
        synchronous: true,
        fields: &[f("reserved_1", ShortStr)],
    },
    MethodDef {
        class_id: 20,
        method_id: 11,
        name: "channel.open-ok",
        synchronous: true,
        fields: &[f("reserved_1", LongStr)],
    },
    MethodDef {
        class_id: 20,
        method_id: 20,
        name: "channel.flow",
        synchronous: true,
        fields: &[f("active", Bool)],
    },
    MethodDef {
        class_id: 20,
        method_id: 21,
        name: "channel.flow-ok",
        synchronous: false,
        fields: &[f("active", Bool)],
    },
    MethodDef {
        class_id: 20,
        method_id: 40,
        name: "channel.close",
        synchronous: true,
        fields: &[
            f("reply_code", Short),
            f("reply_text", ShortStr),
            f("class_id", Short),
            f("method_id", Short),
        ],
    },
    MethodDef {
        class_id: 20,
        method_id: 41,
        name: "channel.close-ok",
        synchronous: true,
        fields: &[],
    },
    // Exchange (class 40)
    MethodDef {
        class_id: 40,
        method_id: 10,
        name: "exchange.declare",
        synchronous: true,
        fields: &[
            f("reserved_1", Short),
            f("exchange", ShortStr),
            f("type", ShortStr),
            f("passive", Bool),
            f("durable", Bool),
            f("auto_delete", Bool),
            f("internal", Bool),
            f("no_wait", Bool),
            f("arguments", Table),
        ],
    },
    MethodDef {
        class_id: 40,
        method_id: 11,
        name: "exchange.declare-ok",
        synchronous: true,
        fields: &[],
    },
    MethodDef {
        class_id: 40,
        method_id: 20,
        name: "exchange.delete",
        synchronous: true,
        fields: &[
            f("reserved_1", Short),
            f("exchange", ShortStr),
            f("if_unused", Bool),
            f("no_wait", Bool),
        ],
    },
    MethodDef {
        class_id: 40,
        method_id: 21,
        name: "exchange.delete-ok",
        synchronous: true,
        fields: &[],
    },
    MethodDef {
        class_id: 40,
        method_id: 30,
        name: "exchange.bind",
        synchronous: true,
        fields: &[
            f("reserved_1", Short),
            f("destination", ShortStr),
            f("source", ShortStr),
            f("routing_key", ShortStr),
            f("no_wait", Bool),
            f("arguments", Table),
        ],
    },
    MethodDef {
        class_id: 40,
        method_id: 31,
        name: "exchange.bind-ok",
        synchronous: true,
        fields: &[],
    },
    MethodDef {
        class_id: 40,
        method_id: 40,
        name: "exchange.unbind",
        synchronous: true,
        fields: &[
            f("reserved_1", Short),
            f("destination", ShortStr),
            f("source", ShortStr),
            f("routing_key", ShortStr),
            f("no_wait", Bool),
            f("arguments", Table),
        ],
    },
    MethodDef {
        class_id: 40,
        method_id: 51,
        name: "exchange.unbind-ok",
        synchronous: true,
        fields: &[],
    },
    // Queue (class 50)
    MethodDef {
        class_id: 50,
        method_id: 10,
        name: "queue.declare",
        synchronous: true,
        fields: &[
            f("reserved_1", Short),
            f("queue", ShortStr),
            f("passive", Bool),
            f("durable", Bool),
            f("exclusive", Bool),
            f("auto_delete", Bool),
            f("no_wait", Bool),
            f("arguments", Table),
        ],
    },
    MethodDef {
        class_id: 50,
        method_id: 11,
        name: "queue.declare-ok",
        synchronous: true,
        fields: &[
            f("queue", ShortStr),
            f("message_count", Long),
            f("consumer_count", Long),
        ],
    },
    MethodDef {
        class_id: 50,
        method_id: 20,
        name: "queue.bind",
        synchronous: true,
        fields: &[
            f("reserved_1", Short),
            f("queue", ShortStr),
            f("exchange", ShortStr),
            f("routing_key", ShortStr),
            f("no_wait", Bool),
            f("arguments", Table),
        ],
    },
    MethodDef {
        class_id: 50,
        method_id: 21,
        name: "queue.bind-ok",
        synchronous: true,
        fields: &[],
    },
    MethodDef {
        class_id: 50,
        method_id: 30,
        name: "queue.purge",
        synchronous: true,
        fields: &[
            f("reserved_1", Short),
            f("queue", ShortStr),
            f("no_wait", Bool),
        ],
    },
    MethodDef {
        class_id: 50,
        method_id: 31,
        name: "queue.purge-ok",
        synchronous: true,
        fields: &[f("message_count", Long)],
    },
    MethodDef {
        class_id: 50,
        method_id: 40,
        name: "queue.delete",
        synchronous: true,
        fields: &[
            f("reserved_1", Short),
            f("queue", ShortStr),
            f("if_unused", Bool),
            f("if_empty", Bool),
            f("no_wait", Bool),
        ],
    },
    MethodDef {
        class_id: 50,
        method_id: 41,
        name: "queue.delete-ok",
        synchronous: true,
        fields: &[f("message_count", Long)],
    },
    MethodDef {
        class_id: 50,
        method_id: 50,
        name: "queue.unbind",
        synchronous: true,
        fields: &[
            f("reserved_1", Short),
            f("queue", ShortStr),
            f("exchange", ShortStr),
            f("routing_key", ShortStr),
            f("arguments", Table),
        ],
    },
    MethodDef {
        class_id: 50,
        method_id: 51,
        name: "queue.unbind-ok",
        synchronous: true,
        fields: &[],
    },
    // Basic (class 60)
    MethodDef {
        class_id: 60,
        method_id: 10,
        name: "basic.qos",
        synchronous: true,
        fields: &[
            f("prefetch_size", Long),
            f("prefetch_count", Short),
            f("global", Bool),
        ],
    },
    MethodDef {
        class_id: 60,
        method_id: 11,
        name: "basic.qos-ok",
        synchronous: true,
        fields: &[],
    },
    MethodDef {
        class_id: 60,
        method_id: 20,
        name: "basic.consume",
        synchronous: true,
        fields: &[
            f("reserved_1", Short),
            f("queue", ShortStr),
            f("consumer_tag", ShortStr),
            f("no_local", Bool),
            f("no_ack", Bool),
            f("exclusive", Bool),
            f("no_wait", Bool),
            f("arguments", Table),
        ],
    },
    MethodDef {
        class_id: 60,
        method_id: 21,
        name: "basic.consume-ok",
        synchronous: true,
        fields: &[f("consumer_tag", ShortStr)],
    },
    MethodDef {
        class_id: 60,
        method_id: 30,
        name: "basic.cancel",
        synchronous: true,
        fields: &[f("consumer_tag", ShortStr), f("no_wait", Bool)],
    },
    MethodDef {
        class_id: 60,
        method_id: 31,
        name: "basic.cancel-ok",
        synchronous: true,
        fields: &[f("consumer_tag", ShortStr)],
    },
    MethodDef {
        class_id: 60,
        method_id: 40,
        name: "basic.publish",
        synchronous: false,
        fields: &[
            f("reserved_1", Short),
            f("exchange", ShortStr),
            f("routing_key", ShortStr),
            f("mandatory", Bool),
            f("immediate", Bool),
        ],
    },
    MethodDef {
        class_id: 60,
        method_id: 50,
        name: "basic.return",
        synchronous: false,
        fields: &[
            f("reply_code", Short),
            f("reply_text", ShortStr),
            f("exchange", ShortStr),
            f("routing_key", ShortStr),
        ],
    },
    MethodDef {
        class_id: 60,
        method_id: 60,
        name: "basic.deliver",
        synchronous: false,
        fields: &[
            f("consumer_tag", ShortStr),
            f("delivery_tag", LongLong),
            f("redelivered", Bool),
            f("exchange", ShortStr),
            f("routing_key", ShortStr),
        ],
    },
    MethodDef {
        class_id: 60,
        method_id: 70,
        name: "basic.get",
        synchronous: true,
        fields: &[
            f("reserved_1", Short),
            f("queue", ShortStr),
            f("no_ack", Bool),
        ],
    },
    MethodDef {
        class_id: 60,
        method_id: 71,
        name: "basic.get-ok",
        synchronous: true,
        fields: &[
            f("delivery_tag", LongLong),
            f("redelivered", Bool),
            f("exchange", ShortStr),
            f("routing_key", ShortStr),
            f("message_count", Long),
        ],
    },
    MethodDef {
        class_id: 60,
        method_id: 72,
        name: "basic.get-empty",
        synchronous: true,
        fields: &[f("reserved_1", ShortStr)],
    },
    MethodDef {
        class_id: 60,
        method_id: 80,
        name: "basic.ack",
        synchronous: false,
        fields: &[f("delivery_tag", LongLong), f("multiple", Bool)],
    },
    MethodDef {
        class_id: 60,
        method_id: 90,
        name: "basic.reject",
        synchronous: false,
        fields: &[f("delivery_tag", LongLong), f("requeue", Bool)],
    },
    MethodDef {
        class_id: 60,
        method_id: 100,
        name: "basic.recover-async",
        synchronous: false,
        fields: &[f("requeue", Bool)],
    },
    MethodDef {
        class_id: 60,
        method_id: 110,
        name: "basic.recover",
        synchronous: false,
        fields: &[f("requeue", Bool)],
    },
    MethodDef {
        class_id: 60,
        method_id: 111,
        name: "basic.recover-ok",
        synchronous: true,
        fields: &[],
    },
    MethodDef {
        class_id: 60,
        method_id: 120,
        name: "basic.nack",
        synchronous: false,
        fields: &[
            f("delivery_tag", LongLong),
            f("multiple", Bool),
            f("requeue", Bool),
        ],
    },
    // Tx (class 90)
    MethodDef {
        class_id: 90,
        method_id: 10,
        name: "tx.select",
        synchronous: true,
        fields: &[],
    },
    MethodDef {
        class_id: 90,
        method_id: 11,
        name: "tx.select-ok",
        synchronous: true,
        fields: &[],
    },
    MethodDef {
        class_id: 90,
        method_id: 20,
        name: "tx.commit",
        synchronous: true,
        fields: &[],
    },
    MethodDef {
        class_id: 90,
        method_id: 21,
        name: "tx.commit-ok",
        synchronous: true,
        fields: &[],
    },
    MethodDef {
        class_id: 90,
        method_id: 30,
        name: "tx.rollback",
        synchronous: true,
        fields: &[],
    },
    MethodDef {
        class_id: 90,
        method_id: 31,
        name: "tx.rollback-ok",
        synchronous: true,
        fields: &[],
    },
    // Confirm (class 85, RabbitMQ extension)
    MethodDef {
        class_id: 85,
        method_id: 10,
        name: "confirm.select",
        synchronous: true,
        fields: &[f("nowait", Bool)],
    },
    MethodDef {
        class_id: 85,
        method_id: 11,
        name: "confirm.select-ok",
        synchronous: true,
        fields: &[],
    },
];

fn index() -> &'static HashMap<(u16, u16), &'static MethodDef> {
    static INDEX: OnceLock<HashMap<(u16, u16), &'static MethodDef>> = OnceLock::new();
    INDEX.get_or_init(|| {
        METHODS
            .iter()
            .map(|def| (def.method_type(), def))
            .collect()
    })
}

/// Resolve a (class-id, method-id) pair to its definition.
pub fn lookup(class_id: u16, method_id: u16) -> Option<&'static MethodDef> {
    index().get(&(class_id, method_id)).copied()
}
