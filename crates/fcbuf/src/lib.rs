//! Schema-driven serialization for EOS transaction objects.
//!
//! Every type has three forms: the loosely-typed object literal a caller
//! writes, the validated canonical [`Value`], and the binary encoding. A
//! [`Registry`] maps type names to schemas; a [`Codec`] pairs it with a
//! [`Config`] and converts between the forms.
//!
//! # Overview
//!
//! - [`Registry`] - Built-in types, user structs and per-contract ABIs
//! - [`Codec`] / [`TypeCodec`] - `from_object`, `to_object`, `to_buffer`, `from_buffer`
//! - [`Asset`], [`AssetSymbol`], [`PublicKey`], [`Authority`], [`Message`] - Custom types
//! - [`RoundTrip`] - Every stage of one conversion, with [`RoundTrip::verify`]
//!
//! # Example
//!
//! ```
//! use fcbuf::{Codec, Config, Registry};
//! use serde_json::json;
//!
//! let registry = Registry::with_builtins();
//! let config = Config::default();
//! let codec = Codec::new(&registry, &config);
//!
//! let asset = codec.type_of("asset").unwrap();
//! let value = asset.from_object(&json!("1 EOS")).unwrap();
//! let bytes = asset.to_buffer(&value).unwrap();
//! assert_eq!(hex::encode(&bytes), "102700000000000004454f5300000000");
//! assert_eq!(asset.to_object(&value).unwrap(), json!("1.0000 EOS"));
//! ```

mod abi;
mod builtin;
mod codec;
mod config;
mod error;
mod pipeline;
mod primitive;
mod registry;
mod structs;
mod type_ref;
pub mod types;
mod value;

pub use abi::{Abi, AbiAction, AbiField, AbiFields, AbiStruct, AbiType};
pub use builtin::SYSTEM_CODE;
pub use codec::{Codec, TypeCodec, MAX_DEPTH};
pub use config::{Config, MAX_PRECISION};
pub use error::{DecodeError, Error, Result};
pub use pipeline::RoundTrip;
pub use primitive::Primitive;
pub use registry::{Contract, Field, Registry, Resolved, StructDef, TypeDef};
pub use type_ref::TypeRef;
pub use types::{
    AccountPermission, AccountWeight, Asset, AssetInput, AssetSymbol, Authority, KeyWeight,
    Message, MessageData, PublicKey, KEY_TYPE_K1,
};
pub use value::Value;
