//! Object → canonical → binary → canonical → object, with every stage kept.

use serde_json::Value as Json;
use tracing::trace;

use crate::codec::TypeCodec;
use crate::error::{Error, Result};
use crate::value::Value;

/// All intermediate forms of one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundTrip {
    /// `from_object(input)`.
    pub canonical: Value,
    /// `to_buffer(canonical)`.
    pub buffer: Vec<u8>,
    /// `from_buffer(buffer)`.
    pub decoded: Value,
    /// `to_object(canonical)`.
    pub object: Json,
    /// `to_object(decoded)`.
    pub decoded_object: Json,
}

impl RoundTrip {
    /// Fails unless the decoded value and both display objects agree.
    pub fn verify(&self) -> Result<()> {
        if self.decoded != self.canonical {
            return Err(Error::RoundTrip(format!(
                "decoded value differs from canonical (buffer {})",
                hex::encode(&self.buffer)
            )));
        }
        if self.decoded_object != self.object {
            return Err(Error::RoundTrip(format!(
                "display objects differ: {} vs {}",
                self.object, self.decoded_object
            )));
        }
        Ok(())
    }
}

impl TypeCodec<'_> {
    /// Runs `obj` through every stage and returns all of them.
    pub fn round_trip(&self, obj: &Json) -> Result<RoundTrip> {
        let canonical = self.from_object(obj)?;
        let buffer = self.to_buffer(&canonical)?;
        trace!(ty = %self.ty, len = buffer.len(), "encoded");
        let decoded = self.from_buffer(&buffer)?;
        let object = self.to_object(&canonical)?;
        let decoded_object = self.to_object(&decoded)?;
        Ok(RoundTrip {
            canonical,
            buffer,
            decoded,
            object,
            decoded_object,
        })
    }
}
