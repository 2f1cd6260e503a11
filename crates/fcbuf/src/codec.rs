//! Type dispatch over the registry.

use fcbuf_buffers::{Reader, Writer};
use serde_json::Value as Json;

use crate::config::Config;
use crate::error::{DecodeError, Error, Result};
use crate::registry::{Contract, Field, Registry, Resolved, StructDef};
use crate::structs;
use crate::type_ref::TypeRef;
use crate::value::Value;

/// Nesting bound for type references. Schemas may be recursive (a struct
/// holding itself, an alias to an array of itself), so every walk is capped.
pub const MAX_DEPTH: usize = 64;

/// Serialization context: a registry and a config, both borrowed read-only.
///
/// Cheap to copy. Every operation resolves type names on each call, so a
/// codec built after a registry update sees the new schemas.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    registry: &'a Registry,
    config: &'a Config,
    /// Contract whose ABI types shadow the global ones.
    scope: Option<&'a Contract>,
    /// Type references entered so far on this call path.
    depth: usize,
}

impl<'a> Codec<'a> {
    pub fn new(registry: &'a Registry, config: &'a Config) -> Self {
        Self {
            registry,
            config,
            scope: None,
            depth: 0,
        }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn config(&self) -> &'a Config {
        self.config
    }

    /// Parses `name` and checks that its base type resolves.
    pub fn type_of(&self, name: &str) -> Result<TypeCodec<'a>> {
        let ty = TypeRef::parse(name)?;
        self.registry.resolve_type(self.scope, ty.base_name())?;
        Ok(TypeCodec { codec: *self, ty })
    }

    /// The payload type of `(code, action)` and a codec scoped to `code`.
    pub(crate) fn resolve_action(
        &self,
        code: &str,
        action: &str,
    ) -> Option<(Codec<'a>, &'a TypeRef)> {
        let contract = self.registry.contract(code)?;
        let ty = contract.action(action)?;
        Some((
            Codec {
                scope: Some(contract),
                ..*self
            },
            ty,
        ))
    }

    /// A codec one level deeper, or `None` past [`MAX_DEPTH`].
    fn nested(&self) -> Option<Codec<'a>> {
        (self.depth < MAX_DEPTH).then(|| Codec {
            depth: self.depth + 1,
            ..*self
        })
    }

    fn resolve(&self, name: &str) -> Result<Resolved<'a>> {
        self.registry.resolve_type(self.scope, name)
    }

    /// Struct fields including those of base structs, in encoding order.
    pub(crate) fn fields(&self, def: &'a StructDef) -> Result<Vec<&'a Field>> {
        self.registry.struct_fields(self.scope, def)
    }

    /// Validates an object literal into canonical form.
    pub fn from_object(&self, ty: &TypeRef, obj: &Json) -> Result<Value> {
        let codec = self.nested().ok_or_else(too_deep)?;
        match ty {
            TypeRef::Named(name) => match codec.resolve(name)? {
                Resolved::Primitive(p) => p.from_object(obj),
                Resolved::Struct(def) => structs::from_object(&codec, def, obj),
                Resolved::Custom(c) => c.codec().from_object(&codec, obj),
                Resolved::Composite(inner) => codec.from_object(inner, obj),
            },
            TypeRef::Array(inner) => {
                let items = expect_array(obj)?;
                codec.items_from_object(inner, items).map(Value::Array)
            }
            TypeRef::FixedArray(inner, size) => {
                let items = expect_array(obj)?;
                if items.len() != *size {
                    return Err(Error::validation(format!(
                        "expected {} items, found {}",
                        size,
                        items.len()
                    )));
                }
                codec.items_from_object(inner, items).map(Value::Array)
            }
            TypeRef::Optional(inner) => match obj {
                Json::Null => Ok(Value::Optional(None)),
                some => Ok(Value::Optional(Some(Box::new(codec.from_object(inner, some)?)))),
            },
        }
    }

    fn items_from_object(&self, ty: &TypeRef, items: &[Json]) -> Result<Vec<Value>> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.from_object(ty, item).map_err(|e| e.at_index(i)))
            .collect()
    }

    /// Projects a canonical value back to its display object.
    pub fn to_object(&self, ty: &TypeRef, value: &Value) -> Result<Json> {
        let codec = self.nested().ok_or_else(too_deep)?;
        match ty {
            TypeRef::Named(name) => match codec.resolve(name)? {
                Resolved::Primitive(p) => p.to_object(value),
                Resolved::Struct(def) => structs::to_object(&codec, def, value),
                Resolved::Custom(c) => c.codec().to_object(&codec, value),
                Resolved::Composite(inner) => codec.to_object(inner, value),
            },
            TypeRef::Array(inner) | TypeRef::FixedArray(inner, _) => {
                let items = expect_items(value)?;
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| codec.to_object(inner, item).map_err(|e| e.at_index(i)))
                    .collect::<Result<Vec<_>>>()
                    .map(Json::Array)
            }
            TypeRef::Optional(inner) => match value {
                Value::Optional(None) => Ok(Json::Null),
                Value::Optional(Some(v)) => codec.to_object(inner, v),
                other => Err(expected("optional", other)),
            },
        }
    }

    /// Appends the binary form of `value` to `writer`.
    pub fn encode(&self, ty: &TypeRef, value: &Value, writer: &mut Writer) -> Result<()> {
        let codec = self.nested().ok_or_else(too_deep)?;
        match ty {
            TypeRef::Named(name) => match codec.resolve(name)? {
                Resolved::Primitive(p) => p.encode(value, writer),
                Resolved::Struct(def) => structs::encode(&codec, def, value, writer),
                Resolved::Custom(c) => c.codec().encode(&codec, value, writer),
                Resolved::Composite(inner) => codec.encode(inner, value, writer),
            },
            TypeRef::Array(inner) => {
                let items = expect_items(value)?;
                writer.vuint32(count(items.len())?);
                codec.encode_items(inner, items, writer)
            }
            TypeRef::FixedArray(inner, size) => {
                let items = expect_items(value)?;
                if items.len() != *size {
                    return Err(Error::validation(format!(
                        "expected {} items, found {}",
                        size,
                        items.len()
                    )));
                }
                codec.encode_items(inner, items, writer)
            }
            TypeRef::Optional(inner) => match value {
                Value::Optional(None) => {
                    writer.u8(0);
                    Ok(())
                }
                Value::Optional(Some(v)) => {
                    writer.u8(1);
                    codec.encode(inner, v, writer)
                }
                other => Err(expected("optional", other)),
            },
        }
    }

    fn encode_items(&self, ty: &TypeRef, items: &[Value], writer: &mut Writer) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            self.encode(ty, item, writer).map_err(|e| e.at_index(i))?;
        }
        Ok(())
    }

    /// Reads one value of type `ty` from `reader`.
    pub fn decode(&self, ty: &TypeRef, reader: &mut Reader<'_>) -> Result<Value> {
        let codec = self
            .nested()
            .ok_or_else(|| Error::from(DecodeError::TooDeep(MAX_DEPTH)))?;
        match ty {
            TypeRef::Named(name) => match codec.resolve(name)? {
                Resolved::Primitive(p) => p.decode(reader),
                Resolved::Struct(def) => structs::decode(&codec, def, reader),
                Resolved::Custom(c) => c.codec().decode(&codec, reader),
                Resolved::Composite(inner) => codec.decode(inner, reader),
            },
            TypeRef::Array(inner) => {
                let len = reader.vuint32()? as usize;
                codec.decode_items(inner, len, reader)
            }
            TypeRef::FixedArray(inner, size) => codec.decode_items(inner, *size, reader),
            TypeRef::Optional(inner) => match reader.u8()? {
                0 => Ok(Value::Optional(None)),
                1 => Ok(Value::Optional(Some(Box::new(codec.decode(inner, reader)?)))),
                flag => Err(DecodeError::InvalidBool(flag).into()),
            },
        }
    }

    fn decode_items(&self, ty: &TypeRef, len: usize, reader: &mut Reader<'_>) -> Result<Value> {
        // Every item takes at least one byte; don't trust the count for capacity.
        let mut items = Vec::with_capacity(len.min(reader.size()));
        for _ in 0..len {
            items.push(self.decode(ty, reader)?);
        }
        Ok(Value::Array(items))
    }

    /// Encodes `value` into a fresh buffer.
    pub fn to_buffer(&self, ty: &TypeRef, value: &Value) -> Result<Vec<u8>> {
        let mut writer = Writer::new();
        self.encode(ty, value, &mut writer)?;
        Ok(writer.flush())
    }

    /// Decodes a buffer that must hold exactly one value of type `ty`.
    pub fn from_buffer(&self, ty: &TypeRef, bytes: &[u8]) -> Result<Value> {
        let mut reader = Reader::new(bytes);
        let value = self.decode(ty, &mut reader)?;
        match reader.size() {
            0 => Ok(value),
            rest => Err(DecodeError::TrailingBytes(rest).into()),
        }
    }
}

/// A [`Codec`] bound to one type reference.
#[derive(Debug, Clone)]
pub struct TypeCodec<'a> {
    pub(crate) codec: Codec<'a>,
    pub(crate) ty: TypeRef,
}

impl<'a> TypeCodec<'a> {
    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    pub fn from_object(&self, obj: &Json) -> Result<Value> {
        self.codec.from_object(&self.ty, obj)
    }

    pub fn to_object(&self, value: &Value) -> Result<Json> {
        self.codec.to_object(&self.ty, value)
    }

    pub fn to_buffer(&self, value: &Value) -> Result<Vec<u8>> {
        self.codec.to_buffer(&self.ty, value)
    }

    pub fn from_buffer(&self, bytes: &[u8]) -> Result<Value> {
        self.codec.from_buffer(&self.ty, bytes)
    }
}

fn too_deep() -> Error {
    Error::validation(format!("type nesting exceeds {} levels", MAX_DEPTH))
}

pub(crate) fn expected(what: &str, found: &Value) -> Error {
    Error::validation(format!("expected {}, found {}", what, found.kind()))
}

fn expect_array(obj: &Json) -> Result<&[Json]> {
    obj.as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| Error::validation("expected array"))
}

fn expect_items(value: &Value) -> Result<&[Value]> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(expected("array", other)),
    }
}

pub(crate) fn count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::validation(format!("{} items exceed u32", len)))
}
