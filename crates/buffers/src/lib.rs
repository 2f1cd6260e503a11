//! Binary buffer utilities for fcbuf.
//!
//! All multi-byte integers are little-endian. Length prefixes and counts use
//! base-128 varints (7 payload bits per byte, high bit set on every byte
//! except the last).
//!
//! # Overview
//!
//! - [`Reader`] - Bounds-checked cursor over a byte slice
//! - [`Writer`] - Writes binary data to an auto-growing buffer
//!
//! # Example
//!
//! ```
//! use fcbuf_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.u8(0x01);
//! writer.u16(0x0203);
//! writer.vuint32(300);
//! writer.utf8("hello");
//! let data = writer.flush();
//! assert_eq!(data[..5], [0x01, 0x03, 0x02, 0xac, 0x02]);
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.u8().unwrap(), 0x01);
//! assert_eq!(reader.u16().unwrap(), 0x0203);
//! assert_eq!(reader.vuint32().unwrap(), 300);
//! assert_eq!(reader.utf8(5).unwrap(), "hello");
//! assert!(reader.is_empty());
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer { needed: usize, remaining: usize },
    /// Invalid UTF-8 sequence.
    InvalidUtf8,
    /// Varint longer than its target width allows.
    MalformedVarint,
    /// Length does not fit a u32 length prefix.
    LengthOverflow(usize),
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer { needed, remaining } => write!(
                f,
                "end of buffer: needed {} bytes, {} remaining",
                needed, remaining
            ),
            BufferError::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
            BufferError::MalformedVarint => write!(f, "malformed varint"),
            BufferError::LengthOverflow(len) => {
                write!(f, "length {} exceeds the u32 length prefix", len)
            }
        }
    }
}

impl std::error::Error for BufferError {}
