//! Error types for the fcbuf codecs.

use fcbuf_buffers::BufferError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by `from_object`, `to_object`, encode and decode.
#[derive(Debug, Error)]
pub enum Error {
    /// Object literal is missing a required field or has a field of the
    /// wrong shape. `path` is the dotted field path, empty at the root.
    #[error("invalid {}: {reason}", display_path(.path))]
    Validation { path: String, reason: String },
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    #[error("invalid public key checksum")]
    InvalidChecksum,
    /// A type reference names nothing in the registry.
    #[error("unknown type `{0}`")]
    UnknownType(String),
    #[error("malformed ABI: {0}")]
    Abi(#[from] serde_json::Error),
    #[error("round trip mismatch: {0}")]
    RoundTrip(String),
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "value"
    } else {
        path
    }
}

/// Failures while reading the binary form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("{0}")]
    Buffer(#[from] BufferError),
    #[error("{0} trailing bytes")]
    TrailingBytes(usize),
    #[error("invalid bool byte {0:#04x}")]
    InvalidBool(u8),
    #[error("unsupported public key type {0}")]
    InvalidKeyType(u8),
    #[error("invalid asset symbol bytes")]
    InvalidSymbol,
    #[error("type nesting exceeds {0} levels")]
    TooDeep(usize),
}

impl From<BufferError> for Error {
    /// Length overflow only happens while encoding, so it is a validation
    /// failure; every other buffer error comes from reading.
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::LengthOverflow(len) => Error::validation(format!(
                "length {} exceeds the u32 length prefix",
                len
            )),
            other => Error::Decode(DecodeError::Buffer(other)),
        }
    }
}

impl Error {
    pub fn validation(reason: impl Into<String>) -> Self {
        Error::Validation {
            path: String::new(),
            reason: reason.into(),
        }
    }

    /// Prefixes the path of a validation error with `field`.
    pub fn in_field(self, field: &str) -> Self {
        match self {
            Error::Validation { path, reason } => Error::Validation {
                path: if path.is_empty() {
                    field.to_string()
                } else if path.starts_with('[') {
                    format!("{}{}", field, path)
                } else {
                    format!("{}.{}", field, path)
                },
                reason,
            },
            other => other,
        }
    }

    /// Prefixes the path of a validation error with an array index.
    pub fn at_index(self, index: usize) -> Self {
        self.in_field(&format!("[{}]", index))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_paths_nest() {
        let err = Error::validation("missing required field")
            .in_field("key")
            .at_index(1)
            .in_field("keys")
            .in_field("owner");
        match err {
            Error::Validation { path, .. } => assert_eq!(path, "owner.keys[1].key"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn oversized_length_is_validation() {
        let err = Error::from(BufferError::LengthOverflow(1 << 33));
        assert!(matches!(err, Error::Validation { .. }), "{err}");
        assert!(Error::from(BufferError::InvalidUtf8).is_decode());
    }

    #[test]
    fn root_message() {
        let err = Error::validation("expected object");
        assert_eq!(err.to_string(), "invalid value: expected object");
    }
}
