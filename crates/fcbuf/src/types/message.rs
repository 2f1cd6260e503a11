//! `message`: contract action whose payload schema is looked up by
//! `(code, type)` on every call.

use fcbuf_buffers::{Reader, Writer};
use serde_json::{json, Value as Json};
use tracing::{debug, trace, warn};

use crate::codec::{count, expected, Codec};
use crate::error::{Error, Result};
use crate::primitive::decode_hex;
use crate::structs::{expect_object, required, required_str};
use crate::value::Value;

use super::{AccountPermission, CustomCodec};

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub code: String,
    /// Action name; `type` in object form.
    pub type_: String,
    pub data: MessageData,
    pub authorization: Vec<AccountPermission>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageData {
    /// Payload decoded against the registered action type.
    Known(Value),
    /// No schema for `(code, type)`; raw payload bytes.
    Opaque(Vec<u8>),
}

pub struct MessageCodec;

impl MessageCodec {
    fn data_from_object(
        codec: &Codec<'_>,
        code: &str,
        type_: &str,
        obj: &Json,
    ) -> Result<MessageData> {
        match codec.resolve_action(code, type_) {
            Some((scoped, ty)) => {
                trace!(code = %code, type_ = %type_, %ty, "message data has a schema");
                let value = match obj {
                    Json::String(text) => scoped.from_buffer(ty, &decode_hex(text)?)?,
                    other => scoped.from_object(ty, other)?,
                };
                Ok(MessageData::Known(value))
            }
            None => {
                debug!(code = %code, type_ = %type_, "no schema for message data, keeping raw bytes");
                match obj {
                    Json::String(text) => Ok(MessageData::Opaque(decode_hex(text)?)),
                    _ => Err(Error::validation(format!(
                        "expected hex string, no schema registered for {}::{}",
                        code, type_
                    ))),
                }
            }
        }
    }

    fn data_to_object(codec: &Codec<'_>, message: &Message) -> Result<Json> {
        let force_hex = codec.config().force_message_data_hex;
        let resolved = codec.resolve_action(&message.code, &message.type_);
        match (&message.data, resolved) {
            (MessageData::Known(value), Some((scoped, ty))) => {
                if force_hex {
                    Ok(Json::String(hex::encode(scoped.to_buffer(ty, value)?)))
                } else {
                    scoped.to_object(ty, value)
                }
            }
            (MessageData::Known(_), None) => Err(Error::validation(format!(
                "no schema registered for {}::{}",
                message.code, message.type_
            ))),
            (MessageData::Opaque(bytes), Some((scoped, ty))) if !force_hex => {
                // Schema registered after the bytes were read.
                match scoped.from_buffer(ty, bytes) {
                    Ok(value) => scoped.to_object(ty, &value),
                    Err(err) => {
                        warn!(
                            code = %message.code,
                            type_ = %message.type_,
                            %err,
                            "message data does not match its schema, showing hex"
                        );
                        Ok(Json::String(hex::encode(bytes)))
                    }
                }
            }
            (MessageData::Opaque(bytes), _) => Ok(Json::String(hex::encode(bytes))),
        }
    }

    fn data_bytes(codec: &Codec<'_>, message: &Message) -> Result<Vec<u8>> {
        match &message.data {
            MessageData::Opaque(bytes) => Ok(bytes.clone()),
            MessageData::Known(value) => {
                let (scoped, ty) = codec
                    .resolve_action(&message.code, &message.type_)
                    .ok_or_else(|| {
                        Error::validation(format!(
                            "no schema registered for {}::{}",
                            message.code, message.type_
                        ))
                    })?;
                scoped.to_buffer(ty, value)
            }
        }
    }
}

fn expect_message(value: &Value) -> Result<&Message> {
    match value {
        Value::Message(message) => Ok(message),
        other => Err(expected("message", other)),
    }
}

impl CustomCodec for MessageCodec {
    fn from_object(&self, codec: &Codec<'_>, obj: &Json) -> Result<Value> {
        let map = expect_object(obj)?;
        let code = required_str(map, "code")?;
        let type_ = required_str(map, "type")?;
        let data = Self::data_from_object(codec, code, type_, required(map, "data")?)
            .map_err(|e| e.in_field("data"))?;
        let authorization = match map.get("authorization") {
            None | Some(Json::Null) => Vec::new(),
            Some(Json::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| AccountPermission::from_object(item).map_err(|e| e.at_index(i)))
                .collect::<Result<Vec<_>>>()
                .map_err(|e| e.in_field("authorization"))?,
            Some(_) => {
                return Err(Error::validation("expected array").in_field("authorization"));
            }
        };
        Ok(Value::Message(Box::new(Message {
            code: code.to_string(),
            type_: type_.to_string(),
            data,
            authorization,
        })))
    }

    fn to_object(&self, codec: &Codec<'_>, value: &Value) -> Result<Json> {
        let message = expect_message(value)?;
        let data = Self::data_to_object(codec, message).map_err(|e| e.in_field("data"))?;
        let authorization: Vec<Json> = message
            .authorization
            .iter()
            .map(AccountPermission::to_object)
            .collect();
        Ok(json!({
            "code": message.code,
            "type": message.type_,
            "data": data,
            "authorization": authorization,
        }))
    }

    fn encode(&self, codec: &Codec<'_>, value: &Value, writer: &mut Writer) -> Result<()> {
        let message = expect_message(value)?;
        let data = Self::data_bytes(codec, message).map_err(|e| e.in_field("data"))?;
        writer.str(&message.code)?;
        writer.str(&message.type_)?;
        writer.vuint32(count(data.len())?);
        writer.buf(&data);
        writer.vuint32(count(message.authorization.len())?);
        for permission in &message.authorization {
            permission.write(writer)?;
        }
        Ok(())
    }

    fn decode(&self, codec: &Codec<'_>, reader: &mut Reader<'_>) -> Result<Value> {
        let code = reader.str()?.to_string();
        let type_ = reader.str()?.to_string();
        let bytes = reader.bytes()?;
        let data = match codec.resolve_action(&code, &type_) {
            Some((scoped, ty)) => MessageData::Known(scoped.from_buffer(ty, bytes)?),
            None => {
                debug!(code = %code, type_ = %type_, "no schema for message data, keeping raw bytes");
                MessageData::Opaque(bytes.to_vec())
            }
        };
        let len = reader.vuint32()? as usize;
        let mut authorization = Vec::with_capacity(len.min(reader.size()));
        for _ in 0..len {
            authorization.push(AccountPermission::read(reader)?);
        }
        Ok(Value::Message(Box::new(Message {
            code,
            type_,
            data,
            authorization,
        })))
    }
}
