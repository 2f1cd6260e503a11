//! `asset`: signed amount scaled by the symbol's precision.

use std::fmt;

use fcbuf_buffers::{Reader, Writer};
use serde_json::{json, Value as Json};

use crate::codec::{expected, Codec};
use crate::config::{Config, MAX_PRECISION};
use crate::error::{Error, Result};
use crate::primitive;
use crate::structs::{expect_object, required, required_str};
use crate::value::Value;

use super::asset_symbol::validate_symbol;
use super::{AssetSymbol, CustomCodec};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    /// Amount in units of `10^-precision`.
    pub amount: i64,
    pub symbol: AssetSymbol,
}

/// The two accepted object shapes, told apart once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetInput {
    /// `"1.0000 EOS"`; digits after the point set the precision.
    Text(String),
    /// `{amount, symbol}` in smallest units; the symbol table sets the
    /// precision unless `precision` is given.
    Parts {
        amount: i64,
        symbol: String,
        precision: Option<u8>,
    },
}

impl AssetInput {
    pub fn from_object(obj: &Json) -> Result<Self> {
        match obj {
            Json::String(text) => Ok(AssetInput::Text(text.clone())),
            Json::Object(_) => {
                let map = expect_object(obj)?;
                let amount = primitive::integer(required(map, "amount")?)
                    .map_err(|e| e.in_field("amount"))?;
                let symbol = required_str(map, "symbol")?.to_string();
                let precision = match map.get("precision") {
                    Some(p) => Some(primitive::integer(p).map_err(|e| e.in_field("precision"))?),
                    None => None,
                };
                Ok(AssetInput::Parts {
                    amount,
                    symbol,
                    precision,
                })
            }
            _ => Err(Error::validation("expected asset string or object")),
        }
    }
}

impl Asset {
    pub fn new(amount: i64, symbol: AssetSymbol) -> Self {
        Self { amount, symbol }
    }

    pub fn from_input(input: AssetInput, config: &Config) -> Result<Self> {
        match input {
            AssetInput::Text(text) => Self::parse(&text, config),
            AssetInput::Parts {
                amount,
                symbol,
                precision: Some(precision),
            } => Ok(Self::new(amount, AssetSymbol::new(precision, symbol)?)),
            AssetInput::Parts {
                amount,
                symbol,
                precision: None,
            } => Ok(Self::new(amount, AssetSymbol::parse(&symbol, config)?)),
        }
    }

    /// Parses `"<decimal> <SYMBOL>"`. Without a decimal point the symbol
    /// table supplies the precision (`"1 EOS"` is `1.0000 EOS`).
    pub fn parse(text: &str, config: &Config) -> Result<Self> {
        let text = text.trim();
        let (number, symbol) = text.split_once(char::is_whitespace).ok_or_else(|| {
            Error::validation(format!("expected `<amount> <SYMBOL>`, found {:?}", text))
        })?;
        let symbol = symbol.trim();
        validate_symbol(symbol)?;

        let (negative, digits) = match number.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, number.strip_prefix('+').unwrap_or(number)),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits, None),
        };
        let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(int_part) || !frac_part.map_or(true, is_digits) {
            return Err(Error::validation(format!("invalid amount {:?}", number)));
        }

        let precision = match frac_part {
            Some(frac) => u8::try_from(frac.len()).unwrap_or(u8::MAX),
            None => config.precision_of(symbol),
        };
        if precision > MAX_PRECISION {
            return Err(Error::validation(format!(
                "precision {} exceeds {}",
                precision, MAX_PRECISION
            )));
        }

        let overflow = || Error::validation(format!("amount {:?} out of range", number));
        let mut amount: i128 = 0;
        for b in int_part.bytes().chain(frac_part.unwrap_or("").bytes()) {
            amount = amount
                .checked_mul(10)
                .and_then(|a| a.checked_add((b - b'0') as i128))
                .filter(|a| *a <= i64::MAX as i128 + 1)
                .ok_or_else(overflow)?;
        }
        if frac_part.is_none() {
            amount = amount
                .checked_mul(10i128.pow(precision as u32))
                .ok_or_else(overflow)?;
        }
        if negative {
            amount = -amount;
        }
        let amount = i64::try_from(amount).map_err(|_| overflow())?;
        Ok(Self::new(amount, AssetSymbol::new(precision, symbol)?))
    }

    /// Display text, unless the text would not parse back: a precision-0
    /// amount has no decimal point, so the table precision would apply.
    pub fn to_object(&self, config: &Config) -> Json {
        if self.symbol.precision == 0 && config.precision_of(&self.symbol.symbol) != 0 {
            json!({
                "amount": self.amount.to_string(),
                "symbol": self.symbol.symbol,
                "precision": 0,
            })
        } else {
            Json::String(self.to_string())
        }
    }

    pub(crate) fn write(&self, writer: &mut Writer) {
        writer.i64(self.amount);
        self.symbol.write(writer);
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        let amount = reader.i64()?;
        Ok(Self::new(amount, AssetSymbol::read(reader)?))
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        let precision = self.symbol.precision as usize;
        if precision == 0 {
            return write!(f, "{}{} {}", sign, abs, self.symbol.symbol);
        }
        let scale = 10u64.pow(precision as u32);
        write!(
            f,
            "{}{}.{:0width$} {}",
            sign,
            abs / scale,
            abs % scale,
            self.symbol.symbol,
            width = precision
        )
    }
}

pub struct AssetCodec;

impl CustomCodec for AssetCodec {
    fn from_object(&self, codec: &Codec<'_>, obj: &Json) -> Result<Value> {
        let input = AssetInput::from_object(obj)?;
        Asset::from_input(input, codec.config()).map(Value::Asset)
    }

    fn to_object(&self, codec: &Codec<'_>, value: &Value) -> Result<Json> {
        match value {
            Value::Asset(asset) => Ok(asset.to_object(codec.config())),
            other => Err(expected("asset", other)),
        }
    }

    fn encode(&self, _codec: &Codec<'_>, value: &Value, writer: &mut Writer) -> Result<()> {
        match value {
            Value::Asset(asset) => {
                asset.write(writer);
                Ok(())
            }
            other => Err(expected("asset", other)),
        }
    }

    fn decode(&self, _codec: &Codec<'_>, reader: &mut Reader<'_>) -> Result<Value> {
        Asset::read(reader).map(Value::Asset)
    }
}
