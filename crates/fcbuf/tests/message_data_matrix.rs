use fcbuf::{Codec, Config, Error, Field, MessageData, Registry, StructDef, TypeRef, Value};
use serde_json::{json, Value as Json};

const TRANSFER_HEX: &str = "05696e69746105696e697462010000000000000000";

fn transfer_message() -> Json {
    json!({
        "code": "eos",
        "type": "transfer",
        "data": {"from": "inita", "to": "initb", "amount": "1", "memo": ""},
        "authorization": [{"account": "inita", "permission": "active"}]
    })
}

fn unknown_message() -> Json {
    json!({"code": "eos", "type": "mytype", "data": "030a0b0c", "authorization": []})
}

fn message_data(value: &Value) -> &MessageData {
    match value {
        Value::Message(message) => &message.data,
        other => panic!("expected message, got {}", other.kind()),
    }
}

#[test]
fn transfer_payload_bytes() {
    let registry = Registry::with_builtins();
    let config = Config::default();
    let transfer = Codec::new(&registry, &config).type_of("transfer").unwrap();
    let value = transfer
        .from_object(&json!({"from": "inita", "to": "initb", "amount": 1, "memo": ""}))
        .unwrap();
    assert_eq!(hex::encode(transfer.to_buffer(&value).unwrap()), TRANSFER_HEX);
}

#[test]
fn known_type_round_trips_structurally() {
    let registry = Registry::with_builtins();
    let config = Config::default();
    let message = Codec::new(&registry, &config).type_of("message").unwrap();
    let rt = message.round_trip(&transfer_message()).unwrap();
    rt.verify().unwrap();
    assert_eq!(rt.decoded_object, transfer_message());
    assert!(matches!(message_data(&rt.decoded), MessageData::Known(_)));
    assert_eq!(
        hex::encode(&rt.buffer),
        format!("03656f73087472616e7366657215{TRANSFER_HEX}0105696e69746106616374697665")
    );
}

#[test]
fn known_type_accepts_hex_data() {
    let registry = Registry::with_builtins();
    let config = Config::default();
    let message = Codec::new(&registry, &config).type_of("message").unwrap();
    let mut as_hex = transfer_message();
    as_hex["data"] = json!(TRANSFER_HEX);
    assert_eq!(
        message.from_object(&as_hex).unwrap(),
        message.from_object(&transfer_message()).unwrap()
    );
}

#[test]
fn force_hex_changes_display_only() {
    let registry = Registry::with_builtins();
    let plain = Config::default();
    let forced = Config::default().with_force_message_data_hex(true);

    let a = Codec::new(&registry, &plain).type_of("message").unwrap();
    let b = Codec::new(&registry, &forced).type_of("message").unwrap();
    let value_a = a.from_object(&transfer_message()).unwrap();
    let value_b = b.from_object(&transfer_message()).unwrap();

    assert_eq!(a.to_buffer(&value_a).unwrap(), b.to_buffer(&value_b).unwrap());
    assert_eq!(b.to_object(&value_b).unwrap()["data"], json!(TRANSFER_HEX));
    assert_eq!(
        a.to_object(&value_a).unwrap()["data"],
        transfer_message()["data"]
    );
    b.round_trip(&transfer_message()).unwrap().verify().unwrap();
}

#[test]
fn unknown_type_keeps_hex() {
    let registry = Registry::with_builtins();
    let config = Config::default();
    let message = Codec::new(&registry, &config).type_of("message").unwrap();
    let rt = message.round_trip(&unknown_message()).unwrap();
    rt.verify().unwrap();
    assert_eq!(hex::encode(&rt.buffer), "03656f73066d797479706504030a0b0c00");
    assert_eq!(rt.decoded_object, unknown_message());
    assert_eq!(
        message_data(&rt.decoded),
        &MessageData::Opaque(vec![0x03, 0x0a, 0x0b, 0x0c])
    );
    // Nothing was registered as a side effect.
    assert!(registry.resolve_action("eos", "mytype").is_none());
}

#[test]
fn unknown_type_rejects_object_data() {
    let registry = Registry::with_builtins();
    let config = Config::default();
    let message = Codec::new(&registry, &config).type_of("message").unwrap();
    let mut obj = unknown_message();
    obj["data"] = json!({"x": 1});
    let err = message.from_object(&obj).unwrap_err();
    assert!(matches!(err, Error::Validation { ref path, .. } if path == "data"), "{err}");
}

#[test]
fn bad_hex_is_validation() {
    let registry = Registry::with_builtins();
    let config = Config::default();
    let message = Codec::new(&registry, &config).type_of("message").unwrap();
    for data in ["030a0b0", "zz"] {
        let mut obj = unknown_message();
        obj["data"] = json!(data);
        assert!(
            matches!(message.from_object(&obj), Err(Error::Validation { .. })),
            "{data}"
        );
    }
}

#[test]
fn authorization_defaults_to_empty() {
    let registry = Registry::with_builtins();
    let config = Config::default();
    let message = Codec::new(&registry, &config).type_of("message").unwrap();
    let value = message
        .from_object(&json!({"code": "eos", "type": "mytype", "data": ""}))
        .unwrap();
    assert_eq!(message.to_object(&value).unwrap()["authorization"], json!([]));
}

#[test]
fn late_bound_schema_decodes_opaque_bytes() {
    let config = Config::default();
    let before = Registry::with_builtins();
    let opaque = Codec::new(&before, &config)
        .type_of("message")
        .unwrap()
        .from_object(&unknown_message())
        .unwrap();

    let mut after = before.clone();
    after.register_struct(StructDef {
        name: "mytype".into(),
        base: None,
        fields: vec![Field::new("payload", TypeRef::named("bytes"))],
    });
    after.register_action("eos", "mytype", TypeRef::named("mytype"));
    let message = Codec::new(&after, &config).type_of("message").unwrap();
    assert_eq!(
        message.to_object(&opaque).unwrap()["data"],
        json!({"payload": "0a0b0c"})
    );

    let forced = config.clone().with_force_message_data_hex(true);
    let message = Codec::new(&after, &forced).type_of("message").unwrap();
    assert_eq!(message.to_object(&opaque).unwrap()["data"], json!("030a0b0c"));
}

#[test]
fn late_bound_schema_mismatch_falls_back_to_hex() {
    let config = Config::default();
    let mut registry = Registry::with_builtins();
    let opaque = Codec::new(&registry, &config)
        .type_of("message")
        .unwrap()
        .from_object(&unknown_message())
        .unwrap();

    registry.register_struct(StructDef {
        name: "mytype".into(),
        base: None,
        fields: vec![Field::new("big", TypeRef::named("uint64"))],
    });
    registry.register_action("eos", "mytype", TypeRef::named("mytype"));
    let message = Codec::new(&registry, &config).type_of("message").unwrap();
    assert_eq!(message.to_object(&opaque).unwrap()["data"], json!("030a0b0c"));
}

#[test]
fn known_payload_with_trailing_bytes_is_decode_error() {
    let registry = Registry::with_builtins();
    let config = Config::default();
    let message = Codec::new(&registry, &config).type_of("message").unwrap();
    let bytes = hex::decode(format!(
        "03656f73087472616e7366657216{}ff00",
        TRANSFER_HEX
    ))
    .unwrap();
    assert!(matches!(
        message.from_buffer(&bytes),
        Err(Error::Decode(fcbuf::DecodeError::TrailingBytes(1)))
    ));
}

#[test]
fn signed_transaction_mixes_known_and_unknown() {
    let registry = Registry::with_builtins();
    let config = Config::default();
    let codec = Codec::new(&registry, &config);
    let tx = json!({
        "ref_block_num": 1,
        "ref_block_prefix": 2,
        "expiration": 3,
        "scope": ["inita", "initb"],
        "read_scope": [],
        "messages": [transfer_message(), unknown_message()],
        "signatures": []
    });
    let rt = codec.type_of("signed_transaction").unwrap().round_trip(&tx).unwrap();
    rt.verify().unwrap();
    assert_eq!(rt.decoded_object, tx);
    assert_eq!(hex::encode(&rt.buffer[..7]), "01000200000003");
}
