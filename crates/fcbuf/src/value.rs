//! Canonical in-memory form produced by `from_object` and `decode`.

use crate::types::{Asset, AssetSymbol, Authority, Message, PublicKey};

/// A validated, default-filled value. Both the binary encoding and the
/// display object are derived from it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    /// Signed integers of any width.
    Int(i64),
    /// Unsigned integers of any width.
    UInt(u64),
    Str(String),
    Bytes(Vec<u8>),
    Array(Vec<Value>),
    Optional(Option<Box<Value>>),
    /// Fields in schema order.
    Struct(Vec<(String, Value)>),
    Asset(Asset),
    Symbol(AssetSymbol),
    PublicKey(PublicKey),
    Authority(Authority),
    Message(Box<Message>),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Array(_) => "array",
            Value::Optional(_) => "optional",
            Value::Struct(_) => "struct",
            Value::Asset(_) => "asset",
            Value::Symbol(_) => "asset_symbol",
            Value::PublicKey(_) => "public_key",
            Value::Authority(_) => "authority",
            Value::Message(_) => "message",
        }
    }
}
