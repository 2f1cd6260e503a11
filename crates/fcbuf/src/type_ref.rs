//! Type references as written in struct fields and ABIs.

use std::fmt;

use crate::error::{Error, Result};

/// A reference to a type: a registry name, optionally wrapped in
/// array / fixed-array / optional suffixes (`name[]`, `name[4]`, `name?`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    Array(Box<TypeRef>),
    FixedArray(Box<TypeRef>, usize),
    Optional(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// Parses a type reference. Suffixes bind from the right, so `key[]?` is
    /// an optional array of keys.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if let Some(inner) = text.strip_suffix('?') {
            return Ok(TypeRef::Optional(Box::new(Self::parse(inner)?)));
        }
        if let Some(rest) = text.strip_suffix(']') {
            let open = rest
                .rfind('[')
                .ok_or_else(|| invalid(text, "unbalanced `]`"))?;
            let inner = Box::new(Self::parse(&rest[..open])?);
            let size = &rest[open + 1..];
            if size.is_empty() {
                return Ok(TypeRef::Array(inner));
            }
            let size = size
                .parse::<usize>()
                .map_err(|_| invalid(text, "array size is not a number"))?;
            return Ok(TypeRef::FixedArray(inner, size));
        }
        if text.is_empty() {
            return Err(invalid(text, "empty type name"));
        }
        if !text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
        {
            return Err(invalid(text, "unexpected character"));
        }
        Ok(TypeRef::Named(text.to_string()))
    }

    /// The innermost registry name.
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::Array(inner) | TypeRef::FixedArray(inner, _) | TypeRef::Optional(inner) => {
                inner.base_name()
            }
        }
    }
}

fn invalid(text: &str, reason: &str) -> Error {
    Error::validation(format!("type `{}`: {}", text, reason))
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::Array(inner) => write!(f, "{}[]", inner),
            TypeRef::FixedArray(inner, size) => write!(f, "{}[{}]", inner, size),
            TypeRef::Optional(inner) => write!(f, "{}?", inner),
        }
    }
}

impl std::str::FromStr for TypeRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
