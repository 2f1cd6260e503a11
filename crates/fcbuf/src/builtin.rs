//! Built-in schema set installed by [`Registry::with_builtins`].

use crate::primitive::Primitive;
use crate::registry::{Field, Registry, StructDef, TypeDef};
use crate::type_ref::TypeRef;
use crate::types::Custom;

/// Contract that owns the system actions.
pub const SYSTEM_CODE: &str = "eos";

const PRIMITIVES: &[(&str, Primitive)] = &[
    ("bool", Primitive::Bool),
    ("int8", Primitive::Int8),
    ("int16", Primitive::Int16),
    ("int32", Primitive::Int32),
    ("int64", Primitive::Int64),
    ("uint8", Primitive::UInt8),
    ("uint16", Primitive::UInt16),
    ("uint32", Primitive::UInt32),
    ("uint64", Primitive::UInt64),
    ("varuint32", Primitive::VarUInt32),
    ("varint32", Primitive::VarInt32),
    ("string", Primitive::String),
    ("bytes", Primitive::Bytes),
    ("checksum160", Primitive::FixedBytes(20)),
    ("checksum256", Primitive::FixedBytes(32)),
    ("checksum512", Primitive::FixedBytes(64)),
    ("signature", Primitive::FixedBytes(65)),
];

const ALIASES: &[(&str, &str)] = &[
    ("name", "string"),
    ("account_name", "string"),
    ("permission_name", "string"),
    ("type_name", "string"),
    ("field_name", "string"),
    ("time", "uint32"),
    ("symbol", "asset_symbol"),
];

const CUSTOM: &[(&str, Custom)] = &[
    ("asset", Custom::Asset),
    ("asset_symbol", Custom::AssetSymbol),
    ("public_key", Custom::PublicKey),
    ("authority", Custom::Authority),
    ("message", Custom::Message),
];

/// `(name, base, [(field, type)])`
type StructEntry = (
    &'static str,
    Option<&'static str>,
    &'static [(&'static str, &'static str)],
);

const STRUCTS: &[StructEntry] = &[
    (
        "account_permission",
        None,
        &[("account", "account_name"), ("permission", "permission_name")],
    ),
    (
        "key_permission_weight",
        None,
        &[("key", "public_key"), ("weight", "uint16")],
    ),
    (
        "account_permission_weight",
        None,
        &[("permission", "account_permission"), ("weight", "uint16")],
    ),
    (
        "transfer",
        None,
        &[
            ("from", "account_name"),
            ("to", "account_name"),
            ("amount", "uint64"),
            ("memo", "string"),
        ],
    ),
    (
        "newaccount",
        None,
        &[
            ("creator", "account_name"),
            ("name", "account_name"),
            ("owner", "authority"),
            ("active", "authority"),
            ("recovery", "authority"),
            ("deposit", "asset"),
        ],
    ),
    (
        "transaction",
        None,
        &[
            ("ref_block_num", "uint16"),
            ("ref_block_prefix", "uint32"),
            ("expiration", "time"),
            ("scope", "account_name[]"),
            ("read_scope", "account_name[]"),
            ("messages", "message[]"),
        ],
    ),
    (
        "signed_transaction",
        Some("transaction"),
        &[("signatures", "signature[]")],
    ),
];

const SYSTEM_ACTIONS: &[(&str, &str)] = &[("transfer", "transfer"), ("newaccount", "newaccount")];

pub(crate) fn install(registry: &mut Registry) {
    for (name, p) in PRIMITIVES {
        registry.register(*name, TypeDef::Primitive(*p));
    }
    for (name, target) in ALIASES {
        registry.register(*name, TypeDef::Alias(TypeRef::named(*target)));
    }
    for (name, c) in CUSTOM {
        registry.register(*name, TypeDef::Custom(*c));
    }
    for (name, base, fields) in STRUCTS {
        let fields = fields
            .iter()
            .map(|(field, ty)| Field::new(*field, static_type(ty)))
            .collect();
        registry.register_struct(StructDef {
            name: name.to_string(),
            base: base.map(str::to_string),
            fields,
        });
    }
    for (action, ty) in SYSTEM_ACTIONS {
        registry.register_action(SYSTEM_CODE, *action, TypeRef::named(*ty));
    }
}

/// Type strings above are literals; only `name` and `name[]` occur.
fn static_type(text: &str) -> TypeRef {
    match text.strip_suffix("[]") {
        Some(inner) => TypeRef::Array(Box::new(TypeRef::named(inner))),
        None => TypeRef::named(text),
    }
}
