//! `authority`: weighted multi-signature permission.

use fcbuf_buffers::{Reader, Writer};
use serde_json::{json, Map, Value as Json};

use crate::codec::{count, expected, Codec};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::primitive;
use crate::structs::{expect_object, required, required_str};
use crate::value::Value;

use super::{CustomCodec, PublicKey};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyWeight {
    pub key: PublicKey,
    pub weight: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountPermission {
    pub account: String,
    pub permission: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountWeight {
    pub permission: AccountPermission,
    pub weight: u16,
}

/// Keys are kept sorted by binary key value; accounts keep input order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Authority {
    pub threshold: u32,
    pub keys: Vec<KeyWeight>,
    pub accounts: Vec<AccountWeight>,
}

impl AccountPermission {
    pub fn from_object(obj: &Json) -> Result<Self> {
        let map = expect_object(obj)?;
        Ok(Self {
            account: required_str(map, "account")?.to_string(),
            permission: required_str(map, "permission")?.to_string(),
        })
    }

    pub fn to_object(&self) -> Json {
        json!({ "account": self.account, "permission": self.permission })
    }

    pub(crate) fn write(&self, writer: &mut Writer) -> Result<()> {
        writer.str(&self.account)?;
        writer.str(&self.permission)?;
        Ok(())
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            account: reader.str()?.to_string(),
            permission: reader.str()?.to_string(),
        })
    }
}

impl Authority {
    /// Single key, weight 1, threshold 1.
    pub fn from_key(key: PublicKey) -> Self {
        Self {
            threshold: 1,
            keys: vec![KeyWeight { key, weight: 1 }],
            accounts: Vec::new(),
        }
    }

    /// Stable sort of `keys` by binary key value. Idempotent.
    pub fn sort_keys(&mut self) {
        self.keys.sort_by_key(|k| k.key);
    }

    pub fn from_object(obj: &Json, config: &Config) -> Result<Self> {
        if let Json::String(text) = obj {
            return PublicKey::parse(text, &config.key_prefix).map(Self::from_key);
        }
        let map = expect_object(obj)?;
        let threshold = primitive::integer(required(map, "threshold")?)
            .map_err(|e| e.in_field("threshold"))?;
        let keys = list(map, "keys", |item| {
            let map = expect_object(item)?;
            let key = PublicKey::parse(required_str(map, "key")?, &config.key_prefix)
                .map_err(|e| e.in_field("key"))?;
            Ok(KeyWeight {
                key,
                weight: weight(map)?,
            })
        })?;
        // Accounts are not reordered; only keys are canonicalized.
        let accounts = list(map, "accounts", |item| {
            let map = expect_object(item)?;
            let permission = AccountPermission::from_object(required(map, "permission")?)
                .map_err(|e| e.in_field("permission"))?;
            Ok(AccountWeight {
                permission,
                weight: weight(map)?,
            })
        })?;
        let mut authority = Self {
            threshold,
            keys,
            accounts,
        };
        authority.sort_keys();
        Ok(authority)
    }

    pub fn to_object(&self, config: &Config) -> Json {
        let keys: Vec<Json> = self
            .keys
            .iter()
            .map(|k| json!({ "key": k.key.to_text(&config.key_prefix), "weight": k.weight }))
            .collect();
        let accounts: Vec<Json> = self
            .accounts
            .iter()
            .map(|a| json!({ "permission": a.permission.to_object(), "weight": a.weight }))
            .collect();
        json!({ "threshold": self.threshold, "keys": keys, "accounts": accounts })
    }

    /// Keys are written in sorted order even if `keys` was built unsorted.
    pub(crate) fn write(&self, writer: &mut Writer) -> Result<()> {
        writer.vuint32(self.threshold);
        let mut keys: Vec<&KeyWeight> = self.keys.iter().collect();
        keys.sort_by_key(|k| k.key);
        writer.vuint32(count(keys.len())?);
        for k in keys {
            k.key.write(writer);
            writer.u16(k.weight);
        }
        writer.vuint32(count(self.accounts.len())?);
        for a in &self.accounts {
            a.permission.write(writer)?;
            writer.u16(a.weight);
        }
        Ok(())
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let threshold = reader.vuint32()?;
        let len = reader.vuint32()? as usize;
        let mut keys = Vec::with_capacity(len.min(reader.size()));
        for _ in 0..len {
            let key = PublicKey::read(reader)?;
            keys.push(KeyWeight {
                key,
                weight: reader.u16()?,
            });
        }
        let len = reader.vuint32()? as usize;
        let mut accounts = Vec::with_capacity(len.min(reader.size()));
        for _ in 0..len {
            let permission = AccountPermission::read(reader)?;
            accounts.push(AccountWeight {
                permission,
                weight: reader.u16()?,
            });
        }
        Ok(Self {
            threshold,
            keys,
            accounts,
        })
    }
}

fn weight(map: &Map<String, Json>) -> Result<u16> {
    primitive::integer(required(map, "weight")?).map_err(|e| e.in_field("weight"))
}

fn list<T>(
    map: &Map<String, Json>,
    name: &str,
    item: impl Fn(&Json) -> Result<T>,
) -> Result<Vec<T>> {
    required(map, name)?
        .as_array()
        .ok_or_else(|| Error::validation("expected array").in_field(name))?
        .iter()
        .enumerate()
        .map(|(i, v)| item(v).map_err(|e| e.at_index(i).in_field(name)))
        .collect()
}

pub struct AuthorityCodec;

impl CustomCodec for AuthorityCodec {
    fn from_object(&self, codec: &Codec<'_>, obj: &Json) -> Result<Value> {
        Authority::from_object(obj, codec.config()).map(Value::Authority)
    }

    fn to_object(&self, codec: &Codec<'_>, value: &Value) -> Result<Json> {
        match value {
            Value::Authority(authority) => Ok(authority.to_object(codec.config())),
            other => Err(expected("authority", other)),
        }
    }

    fn encode(&self, _codec: &Codec<'_>, value: &Value, writer: &mut Writer) -> Result<()> {
        match value {
            Value::Authority(authority) => authority.write(writer),
            other => Err(expected("authority", other)),
        }
    }

    fn decode(&self, _codec: &Codec<'_>, reader: &mut Reader<'_>) -> Result<Value> {
        Authority::read(reader).map(Value::Authority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const K0: &str = "EOS7wBGPvBgRVa4wQN2zm5CjgBF6S7tP7R3JavtSa2unHUoVQGhey";
    const K1: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";

    #[test]
    fn missing_keys_names_field() {
        let err = Authority::from_object(
            &json!({"threshold": 1, "accounts": []}),
            &Config::default(),
        )
        .unwrap_err();
        match err {
            Error::Validation { path, .. } => assert_eq!(path, "keys"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_nested_key_path() {
        let err = Authority::from_object(
            &json!({"threshold": 1, "keys": [{"key": K0, "weight": 1}, {"key": K1}], "accounts": []}),
            &Config::default(),
        )
        .unwrap_err();
        match err {
            Error::Validation { path, .. } => assert_eq!(path, "keys[1].weight"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn write_sorts_hand_built_keys() {
        let config = Config::default();
        let k0 = PublicKey::parse(K0, &config.key_prefix).unwrap();
        let k1 = PublicKey::parse(K1, &config.key_prefix).unwrap();
        let unsorted = Authority {
            threshold: 1,
            keys: vec![
                KeyWeight { key: k0, weight: 1 },
                KeyWeight { key: k1, weight: 1 },
            ],
            accounts: Vec::new(),
        };
        let mut sorted = unsorted.clone();
        sorted.sort_keys();
        assert_eq!(sorted.keys[0].key, k1);

        let mut a = Writer::new();
        unsorted.write(&mut a).unwrap();
        let mut b = Writer::new();
        sorted.write(&mut b).unwrap();
        assert_eq!(a.flush(), b.flush());
    }
}
