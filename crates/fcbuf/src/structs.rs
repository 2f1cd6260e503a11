//! Generic codec for registry structs.

use fcbuf_buffers::{Reader, Writer};
use serde_json::{Map, Value as Json};

use crate::codec::{expected, Codec};
use crate::error::{Error, Result};
use crate::registry::StructDef;
use crate::type_ref::TypeRef;
use crate::value::Value;

pub(crate) fn from_object<'a>(codec: &Codec<'a>, def: &'a StructDef, obj: &Json) -> Result<Value> {
    let map = expect_object(obj)?;
    let fields = codec.fields(def)?;
    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let value = match map.get(&field.name) {
            Some(v) => codec
                .from_object(&field.ty, v)
                .map_err(|e| e.in_field(&field.name))?,
            None if matches!(field.ty, TypeRef::Optional(_)) => Value::Optional(None),
            None => {
                return Err(Error::validation("missing required field").in_field(&field.name))
            }
        };
        out.push((field.name.clone(), value));
    }
    Ok(Value::Struct(out))
}

pub(crate) fn to_object<'a>(codec: &Codec<'a>, def: &'a StructDef, value: &Value) -> Result<Json> {
    let values = expect_fields(codec, def, value)?;
    let mut map = Map::with_capacity(values.len());
    for (ty, (name, v)) in values {
        let obj = codec.to_object(ty, v).map_err(|e| e.in_field(name))?;
        map.insert(name.clone(), obj);
    }
    Ok(Json::Object(map))
}

pub(crate) fn encode<'a>(
    codec: &Codec<'a>,
    def: &'a StructDef,
    value: &Value,
    writer: &mut Writer,
) -> Result<()> {
    for (ty, (name, v)) in expect_fields(codec, def, value)? {
        codec.encode(ty, v, writer).map_err(|e| e.in_field(name))?;
    }
    Ok(())
}

pub(crate) fn decode<'a>(codec: &Codec<'a>, def: &'a StructDef, reader: &mut Reader<'_>) -> Result<Value> {
    let fields = codec.fields(def)?;
    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        out.push((field.name.clone(), codec.decode(&field.ty, reader)?));
    }
    Ok(Value::Struct(out))
}

/// Pairs each schema field with the value's field, checking names and arity.
fn expect_fields<'a, 'v>(
    codec: &Codec<'a>,
    def: &'a StructDef,
    value: &'v Value,
) -> Result<Vec<(&'a TypeRef, &'v (String, Value))>> {
    let values = match value {
        Value::Struct(values) => values,
        other => return Err(expected(&def.name, other)),
    };
    let fields = codec.fields(def)?;
    if fields.len() != values.len() {
        return Err(Error::validation(format!(
            "`{}` has {} fields, found {}",
            def.name,
            fields.len(),
            values.len()
        )));
    }
    fields
        .into_iter()
        .zip(values)
        .map(|(field, entry)| {
            if field.name != entry.0 {
                return Err(Error::validation(format!(
                    "expected field `{}`, found `{}`",
                    field.name, entry.0
                )));
            }
            Ok((&field.ty, entry))
        })
        .collect()
}

pub(crate) fn expect_object(obj: &Json) -> Result<&Map<String, Json>> {
    obj.as_object()
        .ok_or_else(|| Error::validation("expected object"))
}

/// A field that must be present (`null` counts as absent).
pub(crate) fn required<'j>(map: &'j Map<String, Json>, name: &str) -> Result<&'j Json> {
    match map.get(name) {
        Some(Json::Null) | None => Err(Error::validation("missing required field").in_field(name)),
        Some(v) => Ok(v),
    }
}

pub(crate) fn required_str<'j>(map: &'j Map<String, Json>, name: &str) -> Result<&'j str> {
    required(map, name)?
        .as_str()
        .ok_or_else(|| Error::validation("expected string").in_field(name))
}
