//! Types with bespoke object and binary forms.

use fcbuf_buffers::{Reader, Writer};
use serde_json::Value as Json;

use crate::codec::Codec;
use crate::error::Result;
use crate::value::Value;

mod asset;
mod asset_symbol;
mod authority;
mod message;
mod public_key;

pub use asset::{Asset, AssetCodec, AssetInput};
pub use asset_symbol::{AssetSymbol, AssetSymbolCodec};
pub use authority::{AccountPermission, AccountWeight, Authority, AuthorityCodec, KeyWeight};
pub use message::{Message, MessageCodec, MessageData};
pub use public_key::{PublicKey, PublicKeyCodec, KEY_TYPE_K1};

/// The four-operation contract shared by every custom type.
pub trait CustomCodec: Sync {
    fn from_object(&self, codec: &Codec<'_>, obj: &Json) -> Result<Value>;
    fn to_object(&self, codec: &Codec<'_>, value: &Value) -> Result<Json>;
    fn encode(&self, codec: &Codec<'_>, value: &Value, writer: &mut Writer) -> Result<()>;
    fn decode(&self, codec: &Codec<'_>, reader: &mut Reader<'_>) -> Result<Value>;
}

/// Registry tag for a custom codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Custom {
    Asset,
    AssetSymbol,
    PublicKey,
    Authority,
    Message,
}

impl Custom {
    pub fn codec(self) -> &'static dyn CustomCodec {
        match self {
            Custom::Asset => &AssetCodec,
            Custom::AssetSymbol => &AssetSymbolCodec,
            Custom::PublicKey => &PublicKeyCodec,
            Custom::Authority => &AuthorityCodec,
            Custom::Message => &MessageCodec,
        }
    }
}
