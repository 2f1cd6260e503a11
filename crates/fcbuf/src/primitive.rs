//! Fixed-width and variable-length primitives.

use fcbuf_buffers::{Reader, Writer};
use serde_json::Value as Json;

use crate::error::{DecodeError, Error, Result};
use crate::value::Value;

/// Primitive kinds known to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    VarUInt32,
    /// Zigzag-mapped signed varint.
    VarInt32,
    String,
    /// Varint length prefix + raw bytes; hex in object form.
    Bytes,
    /// Exactly N raw bytes; hex in object form.
    FixedBytes(usize),
}

impl Primitive {
    fn int_bounds(self) -> Option<(i128, i128)> {
        let bounds = match self {
            Primitive::Int8 => (i8::MIN as i128, i8::MAX as i128),
            Primitive::Int16 => (i16::MIN as i128, i16::MAX as i128),
            Primitive::Int32 | Primitive::VarInt32 => (i32::MIN as i128, i32::MAX as i128),
            Primitive::Int64 => (i64::MIN as i128, i64::MAX as i128),
            Primitive::UInt8 => (0, u8::MAX as i128),
            Primitive::UInt16 => (0, u16::MAX as i128),
            Primitive::UInt32 | Primitive::VarUInt32 => (0, u32::MAX as i128),
            Primitive::UInt64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(bounds)
    }

    fn is_signed(self) -> bool {
        matches!(
            self,
            Primitive::Int8
                | Primitive::Int16
                | Primitive::Int32
                | Primitive::Int64
                | Primitive::VarInt32
        )
    }

    /// 64-bit integers are displayed as decimal strings.
    fn is_wide(self) -> bool {
        matches!(self, Primitive::Int64 | Primitive::UInt64)
    }

    pub fn from_object(self, obj: &Json) -> Result<Value> {
        if let Some((min, max)) = self.int_bounds() {
            let n = parse_integer(obj)?;
            if n < min || n > max {
                return Err(Error::validation(format!(
                    "{} out of range {}..={}",
                    n, min, max
                )));
            }
            return Ok(if self.is_signed() {
                Value::Int(n as i64)
            } else {
                Value::UInt(n as u64)
            });
        }
        match (self, obj) {
            (Primitive::Bool, Json::Bool(b)) => Ok(Value::Bool(*b)),
            (Primitive::String, Json::String(s)) => Ok(Value::Str(s.clone())),
            (Primitive::Bytes, Json::String(s)) => Ok(Value::Bytes(decode_hex(s)?)),
            (Primitive::FixedBytes(size), Json::String(s)) => {
                let bytes = decode_hex(s)?;
                if bytes.len() != size {
                    return Err(Error::validation(format!(
                        "expected {} bytes, found {}",
                        size,
                        bytes.len()
                    )));
                }
                Ok(Value::Bytes(bytes))
            }
            (Primitive::Bool, _) => Err(Error::validation("expected boolean")),
            _ => Err(Error::validation("expected string")),
        }
    }

    pub fn to_object(self, value: &Value) -> Result<Json> {
        match (self, value) {
            (Primitive::Bool, Value::Bool(b)) => Ok(Json::Bool(*b)),
            (p, Value::Int(n)) if p.is_signed() => Ok(if p.is_wide() {
                Json::String(n.to_string())
            } else {
                Json::from(*n)
            }),
            (p, Value::UInt(n)) if p.int_bounds().is_some() && !p.is_signed() => {
                Ok(if p.is_wide() {
                    Json::String(n.to_string())
                } else {
                    Json::from(*n)
                })
            }
            (Primitive::String, Value::Str(s)) => Ok(Json::String(s.clone())),
            (Primitive::Bytes | Primitive::FixedBytes(_), Value::Bytes(b)) => {
                Ok(Json::String(hex::encode(b)))
            }
            (p, other) => Err(mismatch(p, other)),
        }
    }

    pub fn encode(self, value: &Value, writer: &mut Writer) -> Result<()> {
        match (self, value) {
            (Primitive::Bool, Value::Bool(b)) => writer.u8(*b as u8),
            (Primitive::Int8, Value::Int(n)) => writer.i8(narrow(*n)?),
            (Primitive::Int16, Value::Int(n)) => writer.i16(narrow(*n)?),
            (Primitive::Int32, Value::Int(n)) => writer.i32(narrow(*n)?),
            (Primitive::Int64, Value::Int(n)) => writer.i64(*n),
            (Primitive::VarInt32, Value::Int(n)) => writer.vint32(narrow(*n)?),
            (Primitive::UInt8, Value::UInt(n)) => writer.u8(narrow(*n)?),
            (Primitive::UInt16, Value::UInt(n)) => writer.u16(narrow(*n)?),
            (Primitive::UInt32, Value::UInt(n)) => writer.u32(narrow(*n)?),
            (Primitive::UInt64, Value::UInt(n)) => writer.u64(*n),
            (Primitive::VarUInt32, Value::UInt(n)) => writer.vuint32(narrow(*n)?),
            (Primitive::String, Value::Str(s)) => writer.str(s)?,
            (Primitive::Bytes, Value::Bytes(b)) => writer.bytes(b)?,
            (Primitive::FixedBytes(size), Value::Bytes(b)) => {
                if b.len() != size {
                    return Err(Error::validation(format!(
                        "expected {} bytes, found {}",
                        size,
                        b.len()
                    )));
                }
                writer.buf(b)
            }
            (p, other) => return Err(mismatch(p, other)),
        }
        Ok(())
    }

    pub fn decode(self, reader: &mut Reader<'_>) -> Result<Value> {
        let value = match self {
            Primitive::Bool => match reader.u8()? {
                0 => Value::Bool(false),
                1 => Value::Bool(true),
                byte => return Err(DecodeError::InvalidBool(byte).into()),
            },
            Primitive::Int8 => Value::Int(reader.i8()? as i64),
            Primitive::Int16 => Value::Int(reader.i16()? as i64),
            Primitive::Int32 => Value::Int(reader.i32()? as i64),
            Primitive::Int64 => Value::Int(reader.i64()?),
            Primitive::VarInt32 => Value::Int(reader.vint32()? as i64),
            Primitive::UInt8 => Value::UInt(reader.u8()? as u64),
            Primitive::UInt16 => Value::UInt(reader.u16()? as u64),
            Primitive::UInt32 => Value::UInt(reader.u32()? as u64),
            Primitive::UInt64 => Value::UInt(reader.u64()?),
            Primitive::VarUInt32 => Value::UInt(reader.vuint32()? as u64),
            Primitive::String => Value::Str(reader.str()?.to_string()),
            Primitive::Bytes => Value::Bytes(reader.bytes()?.to_vec()),
            Primitive::FixedBytes(size) => Value::Bytes(reader.buf(size)?.to_vec()),
        };
        Ok(value)
    }
}

fn mismatch(kind: Primitive, found: &Value) -> Error {
    Error::validation(format!("expected {:?}, found {}", kind, found.kind()))
}

fn narrow<S: Copy + std::fmt::Display, T: TryFrom<S>>(n: S) -> Result<T> {
    T::try_from(n).map_err(|_| Error::validation(format!("{} out of range", n)))
}

/// Accepts a JSON integer or a decimal string.
pub(crate) fn parse_integer(obj: &Json) -> Result<i128> {
    match obj {
        Json::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .ok_or_else(|| Error::validation(format!("expected integer, found {}", n))),
        Json::String(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|_| Error::validation(format!("expected integer, found {:?}", s))),
        _ => Err(Error::validation("expected integer")),
    }
}

/// Parses an integer field into the target width.
pub(crate) fn integer<T: TryFrom<i128>>(obj: &Json) -> Result<T> {
    narrow(parse_integer(obj)?)
}

pub(crate) fn decode_hex(text: &str) -> Result<Vec<u8>> {
    hex::decode(text).map_err(|err| Error::validation(format!("invalid hex: {}", err)))
}
