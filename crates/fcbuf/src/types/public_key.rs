//! `public_key`: compressed secp256k1 point with a checksummed base-58 text form.

use fcbuf_base58::{from_base58, to_base58};
use fcbuf_buffers::{Reader, Writer};
use ripemd::{Digest, Ripemd160};
use serde_json::Value as Json;

use crate::codec::{expected, Codec};
use crate::error::{DecodeError, Error, Result};
use crate::value::Value;

use super::CustomCodec;

/// Binary tag of secp256k1 keys.
pub const KEY_TYPE_K1: u8 = 0;

const KEY_LEN: usize = 33;
const CHECKSUM_LEN: usize = 4;
const K1_PREFIX: &str = "PUB_K1_";

/// Ordering is binary ordering: tag first, then the point bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PublicKey {
    pub key_type: u8,
    pub data: [u8; KEY_LEN],
}

impl PublicKey {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let data: [u8; KEY_LEN] = data.try_into().map_err(|_| {
            Error::validation(format!("expected {} key bytes, found {}", KEY_LEN, data.len()))
        })?;
        Ok(Self {
            key_type: KEY_TYPE_K1,
            data,
        })
    }

    /// Parses `<prefix><base58>` (legacy) or `PUB_K1_<base58>` text.
    pub fn parse(text: &str, prefix: &str) -> Result<Self> {
        let (encoded, suffix): (&str, &[u8]) = if let Some(rest) = text.strip_prefix(K1_PREFIX) {
            (rest, b"K1")
        } else if let Some(rest) = text.strip_prefix(prefix) {
            (rest, b"")
        } else {
            return Err(Error::validation(format!(
                "public key must start with {:?} or {:?}",
                prefix, K1_PREFIX
            )));
        };
        let raw = from_base58(encoded)
            .map_err(|err| Error::validation(format!("public key: {}", err)))?;
        if raw.len() != KEY_LEN + CHECKSUM_LEN {
            return Err(Error::validation(format!(
                "public key: expected {} bytes, found {}",
                KEY_LEN + CHECKSUM_LEN,
                raw.len()
            )));
        }
        let (key, check) = raw.split_at(KEY_LEN);
        if checksum(key, suffix).as_slice() != check {
            return Err(Error::InvalidChecksum);
        }
        Self::from_bytes(key)
    }

    /// Legacy text form with the given network prefix.
    pub fn to_text(&self, prefix: &str) -> String {
        let mut raw = Vec::with_capacity(KEY_LEN + CHECKSUM_LEN);
        raw.extend_from_slice(&self.data);
        raw.extend_from_slice(&checksum(&self.data, b""));
        format!("{}{}", prefix, to_base58(&raw))
    }

    pub(crate) fn write(&self, writer: &mut Writer) {
        writer.u8(self.key_type);
        writer.buf(&self.data);
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let key_type = reader.u8()?;
        if key_type != KEY_TYPE_K1 {
            return Err(DecodeError::InvalidKeyType(key_type).into());
        }
        let mut data = [0u8; KEY_LEN];
        data.copy_from_slice(reader.buf(KEY_LEN)?);
        Ok(Self { key_type, data })
    }
}

/// First four bytes of `ripemd160(key ‖ suffix)`.
fn checksum(key: &[u8], suffix: &[u8]) -> [u8; CHECKSUM_LEN] {
    let mut hasher = Ripemd160::new();
    hasher.update(key);
    hasher.update(suffix);
    let digest = hasher.finalize();
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

pub struct PublicKeyCodec;

impl CustomCodec for PublicKeyCodec {
    fn from_object(&self, codec: &Codec<'_>, obj: &Json) -> Result<Value> {
        match obj {
            Json::String(text) => {
                PublicKey::parse(text, &codec.config().key_prefix).map(Value::PublicKey)
            }
            _ => Err(Error::validation("expected public key string")),
        }
    }

    fn to_object(&self, codec: &Codec<'_>, value: &Value) -> Result<Json> {
        match value {
            Value::PublicKey(key) => Ok(Json::String(key.to_text(&codec.config().key_prefix))),
            other => Err(expected("public_key", other)),
        }
    }

    fn encode(&self, _codec: &Codec<'_>, value: &Value, writer: &mut Writer) -> Result<()> {
        match value {
            Value::PublicKey(key) => {
                key.write(writer);
                Ok(())
            }
            other => Err(expected("public_key", other)),
        }
    }

    fn decode(&self, _codec: &Codec<'_>, reader: &mut Reader<'_>) -> Result<Value> {
        PublicKey::read(reader).map(Value::PublicKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "EOS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";
    const KEY_HEX: &str = "02c0ded2bc1f1305fb0faac5e6c03ee3a1924234985427b6167ca569d13df435cf";

    #[test]
    fn legacy_text_roundtrip() {
        let key = PublicKey::parse(KEY, "EOS").unwrap();
        assert_eq!(hex::encode(key.data), KEY_HEX);
        assert_eq!(key.to_text("EOS"), KEY);
    }

    #[test]
    fn k1_text_form() {
        let key = PublicKey::parse(KEY, "EOS").unwrap();
        let mut raw = key.data.to_vec();
        raw.extend_from_slice(&checksum(&key.data, b"K1"));
        let k1 = format!("PUB_K1_{}", to_base58(&raw));
        assert_eq!(PublicKey::parse(&k1, "EOS").unwrap(), key);
    }

    #[test]
    fn checksum_mismatch() {
        let key = PublicKey::parse(KEY, "EOS").unwrap();
        let mut raw = key.data.to_vec();
        raw.extend_from_slice(&[0, 0, 0, 0]);
        let forged = format!("EOS{}", to_base58(&raw));
        assert!(matches!(
            PublicKey::parse(&forged, "EOS"),
            Err(Error::InvalidChecksum)
        ));
    }

    #[test]
    fn wrong_prefix_or_length() {
        assert!(matches!(
            PublicKey::parse(&KEY.replacen("EOS", "TST", 1), "EOS"),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            PublicKey::parse("EOS2g", "EOS"),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn read_rejects_unknown_tag() {
        let mut bytes = vec![1u8];
        bytes.extend_from_slice(&[2u8; KEY_LEN]);
        let mut reader = Reader::new(&bytes);
        assert!(matches!(
            PublicKey::read(&mut reader),
            Err(Error::Decode(DecodeError::InvalidKeyType(1)))
        ));
    }
}
