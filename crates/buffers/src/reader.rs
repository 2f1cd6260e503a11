//! Bounds-checked little-endian reader with cursor tracking.

use std::str;

use crate::BufferError;

/// A binary buffer reader that reads data from a byte slice.
///
/// Every read checks the remaining length first and fails with
/// [`BufferError::EndOfBuffer`] instead of panicking; a failed read leaves the
/// cursor where it was.
///
/// # Example
///
/// ```
/// use fcbuf_buffers::Reader;
///
/// let data = [0x01, 0x03, 0x02];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8().unwrap(), 0x01);
/// assert_eq!(reader.u16().unwrap(), 0x0203);
/// assert!(reader.u8().is_err());
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.uint8.len() - self.x
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        let bin = self.buf(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bin);
        Ok(out)
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        let remaining = self.size();
        if size > remaining {
            return Err(BufferError::EndOfBuffer {
                needed: size,
                remaining,
            });
        }
        let x = self.x;
        self.x += size;
        Ok(&self.uint8[x..self.x])
    }

    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        Ok(self.take::<1>()?[0])
    }

    #[inline]
    pub fn i8(&mut self) -> Result<i8, BufferError> {
        Ok(self.take::<1>()?[0] as i8)
    }

    #[inline]
    pub fn u16(&mut self) -> Result<u16, BufferError> {
        self.take().map(u16::from_le_bytes)
    }

    #[inline]
    pub fn i16(&mut self) -> Result<i16, BufferError> {
        self.take().map(i16::from_le_bytes)
    }

    #[inline]
    pub fn u32(&mut self) -> Result<u32, BufferError> {
        self.take().map(u32::from_le_bytes)
    }

    #[inline]
    pub fn i32(&mut self) -> Result<i32, BufferError> {
        self.take().map(i32::from_le_bytes)
    }

    #[inline]
    pub fn u64(&mut self) -> Result<u64, BufferError> {
        self.take().map(u64::from_le_bytes)
    }

    #[inline]
    pub fn i64(&mut self) -> Result<i64, BufferError> {
        self.take().map(i64::from_le_bytes)
    }

    /// Reads an unsigned base-128 varint of at most 5 bytes.
    pub fn vuint32(&mut self) -> Result<u32, BufferError> {
        let start = self.x;
        let mut val: u32 = 0;
        let mut shift = 0;
        loop {
            let byte = match self.u8() {
                Ok(byte) => byte,
                Err(err) => {
                    self.x = start;
                    return Err(err);
                }
            };
            // Fifth byte may only carry the top four bits.
            if shift == 28 && byte & 0xf0 != 0 {
                self.x = start;
                return Err(BufferError::MalformedVarint);
            }
            val |= ((byte & 0x7f) as u32) << shift;
            if byte & 0x80 == 0 {
                return Ok(val);
            }
            shift += 7;
        }
    }

    /// Reads a zigzag-mapped signed varint.
    pub fn vint32(&mut self) -> Result<i32, BufferError> {
        let raw = self.vuint32()?;
        Ok(((raw >> 1) as i32) ^ -((raw & 1) as i32))
    }

    /// Reads a UTF-8 string of the given size.
    pub fn utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        let start = self.x;
        let bin = self.buf(size)?;
        str::from_utf8(bin).map_err(|_| {
            self.x = start;
            BufferError::InvalidUtf8
        })
    }

    /// Reads a varint length prefix followed by that many raw bytes.
    pub fn bytes(&mut self) -> Result<&'a [u8], BufferError> {
        let start = self.x;
        let size = self.vuint32()? as usize;
        self.buf(size).inspect_err(|_| self.x = start)
    }

    /// Reads a varint length prefix followed by that many UTF-8 bytes.
    pub fn str(&mut self) -> Result<&'a str, BufferError> {
        let start = self.x;
        let size = self.vuint32()? as usize;
        self.utf8(size).inspect_err(|_| self.x = start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u8() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8().unwrap(), 0x01);
        assert_eq!(reader.u8().unwrap(), 0x02);
        assert_eq!(reader.u8().unwrap(), 0x03);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_u16() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u16().unwrap(), 0x0201);
        assert_eq!(reader.u16().unwrap(), 0x0403);
    }

    #[test]
    fn test_u32() {
        let data = [0x01, 0x02, 0x03, 0x04];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u32().unwrap(), 0x04030201);
    }

    #[test]
    fn test_end_of_buffer_keeps_cursor() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.u8().unwrap(), 0x01);
        assert_eq!(
            reader.u32(),
            Err(BufferError::EndOfBuffer {
                needed: 4,
                remaining: 2
            })
        );
        assert_eq!(reader.x, 1);
    }

    #[test]
    fn test_vuint32() {
        let data = [0xac, 0x02, 0xff, 0xff, 0xff, 0xff, 0x0f];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.vuint32().unwrap(), 300);
        assert_eq!(reader.vuint32().unwrap(), u32::MAX);
    }

    #[test]
    fn test_vuint32_malformed() {
        let data = [0xff, 0xff, 0xff, 0xff, 0x1f];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.vuint32(), Err(BufferError::MalformedVarint));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_vuint32_truncated() {
        let data = [0x80, 0x80];
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.vuint32(),
            Err(BufferError::EndOfBuffer { .. })
        ));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_length_prefix_exceeds_remaining() {
        let data = [0x05, b'a', b'b'];
        let mut reader = Reader::new(&data);
        assert!(matches!(
            reader.str(),
            Err(BufferError::EndOfBuffer {
                needed: 5,
                remaining: 2
            })
        ));
        assert_eq!(reader.x, 0);
    }

    #[test]
    fn test_invalid_utf8() {
        let data = [0x02, 0xff, 0xfe];
        let mut reader = Reader::new(&data);
        assert_eq!(reader.str(), Err(BufferError::InvalidUtf8));
    }

    #[test]
    fn test_utf8() {
        let data = b"hello world";
        let mut reader = Reader::new(data);
        assert_eq!(reader.utf8(5).unwrap(), "hello");
        assert_eq!(reader.utf8(6).unwrap(), " world");
    }
}
