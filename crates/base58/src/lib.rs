//! Base-58 encoding and decoding using the Bitcoin alphabet.
//!
//! Leading zero bytes map one-to-one to leading `1` characters, so the
//! encoding is a lossless bijection on byte strings.
//!
//! ```
//! use fcbuf_base58::{from_base58, to_base58};
//!
//! assert_eq!(to_base58(b"hello world"), "StV1DL6CwTryKyV");
//! assert_eq!(from_base58("StV1DL6CwTryKyV").unwrap(), b"hello world");
//! ```

mod constants;
mod from_base58;
mod to_base58;

pub use constants::ALPHABET;
pub use from_base58::from_base58;
pub use to_base58::to_base58;

/// Error type for base-58 decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base58Error {
    /// Character outside the alphabet, with its byte offset.
    InvalidCharacter { character: char, index: usize },
}

impl std::fmt::Display for Base58Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Base58Error::InvalidCharacter { character, index } => {
                write!(f, "invalid base58 character {:?} at {}", character, index)
            }
        }
    }
}

impl std::error::Error for Base58Error {}
