//! Contract ABI documents supplied by the host.
//!
//! Only the parts the codecs need are modelled; other keys (tables,
//! ricardian clauses, ...) are ignored on deserialization.

use serde::Deserialize;
use serde_json::Value as Json;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Abi {
    #[serde(default)]
    pub types: Vec<AbiType>,
    #[serde(default)]
    pub structs: Vec<AbiStruct>,
    #[serde(default)]
    pub actions: Vec<AbiAction>,
}

/// `new_type_name` is an alias for `type`.
#[derive(Debug, Clone, Deserialize)]
pub struct AbiType {
    pub new_type_name: String,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiStruct {
    pub name: String,
    #[serde(default)]
    pub base: String,
    #[serde(default)]
    pub fields: AbiFields,
}

/// Struct fields, either as a list or as an ordered `{name: type}` object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AbiFields {
    List(Vec<AbiField>),
    Map(serde_json::Map<String, Json>),
}

impl Default for AbiFields {
    fn default() -> Self {
        AbiFields::List(Vec::new())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiAction {
    #[serde(alias = "action_name")]
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
}

impl Abi {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl AbiFields {
    /// `(name, type)` pairs in declaration order.
    pub fn entries(&self) -> Result<Vec<(String, String)>> {
        match self {
            AbiFields::List(fields) => Ok(fields
                .iter()
                .map(|f| (f.name.clone(), f.type_.clone()))
                .collect()),
            AbiFields::Map(map) => map
                .iter()
                .map(|(name, ty)| match ty {
                    Json::String(ty) => Ok((name.clone(), ty.clone())),
                    _ => Err(Error::validation("expected type name").in_field(name)),
                })
                .collect(),
        }
    }
}
