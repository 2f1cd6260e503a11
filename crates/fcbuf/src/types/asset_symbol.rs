//! `asset_symbol`: precision byte + up to 7 symbol characters.

use fcbuf_buffers::{Reader, Writer};
use serde_json::{json, Value as Json};

use crate::codec::{expected, Codec};
use crate::config::{Config, MAX_PRECISION};
use crate::error::{DecodeError, Error, Result};
use crate::primitive;
use crate::structs::{expect_object, required_str};
use crate::value::Value;

use super::CustomCodec;

const MAX_SYMBOL_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetSymbol {
    pub precision: u8,
    pub symbol: String,
}

impl AssetSymbol {
    pub fn new(precision: u8, symbol: impl Into<String>) -> Result<Self> {
        let symbol = symbol.into();
        validate_symbol(&symbol)?;
        if precision > MAX_PRECISION {
            return Err(Error::validation(format!(
                "precision {} exceeds {}",
                precision, MAX_PRECISION
            )));
        }
        Ok(Self { precision, symbol })
    }

    /// `"EOS"` takes the table precision; `"4,EOS"` is explicit.
    pub fn parse(text: &str, config: &Config) -> Result<Self> {
        match text.trim().split_once(',') {
            Some((precision, symbol)) => {
                let precision = precision
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| Error::validation(format!("invalid precision in {:?}", text)))?;
                Self::new(precision, symbol.trim())
            }
            None => {
                let symbol = text.trim();
                Self::new(config.precision_of(symbol), symbol)
            }
        }
    }

    pub(crate) fn write(&self, writer: &mut Writer) {
        let mut block = [0u8; 1 + MAX_SYMBOL_LEN];
        block[0] = self.precision;
        block[1..1 + self.symbol.len()].copy_from_slice(self.symbol.as_bytes());
        writer.buf(&block);
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let block = reader.buf(1 + MAX_SYMBOL_LEN)?;
        let name = &block[1..];
        let len = name.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        let symbol = std::str::from_utf8(&name[..len]).map_err(|_| DecodeError::InvalidSymbol)?;
        Self::new(block[0], symbol).map_err(|_| DecodeError::InvalidSymbol.into())
    }

    /// Bare symbol when the precision matches the table, otherwise the
    /// explicit `{precision, symbol}` object.
    pub fn to_object(&self, config: &Config) -> Json {
        if config.precision_of(&self.symbol) == self.precision {
            Json::String(self.symbol.clone())
        } else {
            json!({ "precision": self.precision, "symbol": self.symbol })
        }
    }
}

pub(crate) fn validate_symbol(symbol: &str) -> Result<()> {
    if symbol.is_empty()
        || symbol.len() > MAX_SYMBOL_LEN
        || !symbol.bytes().all(|b| b.is_ascii_uppercase())
    {
        return Err(Error::validation(format!(
            "symbol {:?} must be 1-{} uppercase letters",
            symbol, MAX_SYMBOL_LEN
        )));
    }
    Ok(())
}

pub struct AssetSymbolCodec;

impl CustomCodec for AssetSymbolCodec {
    fn from_object(&self, codec: &Codec<'_>, obj: &Json) -> Result<Value> {
        let symbol = match obj {
            Json::String(text) => AssetSymbol::parse(text, codec.config())?,
            Json::Object(_) => {
                let map = expect_object(obj)?;
                let symbol = required_str(map, "symbol")?;
                match map.get("precision") {
                    Some(p) => AssetSymbol::new(
                        primitive::integer(p).map_err(|e| e.in_field("precision"))?,
                        symbol,
                    )?,
                    None => AssetSymbol::parse(symbol, codec.config())?,
                }
            }
            _ => return Err(Error::validation("expected symbol string or object")),
        };
        Ok(Value::Symbol(symbol))
    }

    fn to_object(&self, codec: &Codec<'_>, value: &Value) -> Result<Json> {
        match value {
            Value::Symbol(symbol) => Ok(symbol.to_object(codec.config())),
            other => Err(expected("asset_symbol", other)),
        }
    }

    fn encode(&self, _codec: &Codec<'_>, value: &Value, writer: &mut Writer) -> Result<()> {
        match value {
            Value::Symbol(symbol) => {
                symbol.write(writer);
                Ok(())
            }
            other => Err(expected("asset_symbol", other)),
        }
    }

    fn decode(&self, _codec: &Codec<'_>, reader: &mut Reader<'_>) -> Result<Value> {
        AssetSymbol::read(reader).map(Value::Symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_forms() {
        let config = Config::default();
        assert_eq!(
            AssetSymbol::parse("EOS", &config).unwrap(),
            AssetSymbol::new(4, "EOS").unwrap()
        );
        assert_eq!(
            AssetSymbol::parse("2,SYS", &config).unwrap(),
            AssetSymbol::new(2, "SYS").unwrap()
        );
        for bad in ["", "eos", "TOOLONGX", "4,", "x,EOS", "19,EOS"] {
            assert!(AssetSymbol::parse(bad, &config).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn block_is_zero_padded() {
        let mut writer = Writer::new();
        AssetSymbol::new(4, "EOS").unwrap().write(&mut writer);
        assert_eq!(hex::encode(writer.flush()), "04454f5300000000");
    }

    #[test]
    fn read_rejects_lowercase() {
        let bytes = [4, b'e', b'o', b's', 0, 0, 0, 0];
        let mut reader = Reader::new(&bytes);
        assert!(matches!(
            AssetSymbol::read(&mut reader),
            Err(Error::Decode(DecodeError::InvalidSymbol))
        ));
    }

    #[test]
    fn non_default_precision_displays_as_object() {
        let config = Config::default();
        let symbol = AssetSymbol::new(2, "EOS").unwrap();
        assert_eq!(
            symbol.to_object(&config),
            json!({"precision": 2, "symbol": "EOS"})
        );
    }
}
