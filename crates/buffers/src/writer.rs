//! Auto-growing little-endian binary writer.

use crate::BufferError;

/// A binary writer that appends to an owned, growable buffer.
///
/// Encoders never touch caller-owned memory: [`Writer::flush`] hands back the
/// bytes written since the last flush and leaves the writer empty.
#[derive(Debug, Default, Clone)]
pub struct Writer {
    pub uint8: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.uint8.is_empty()
    }

    /// Returns the written bytes and resets the writer.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.uint8)
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.uint8.push(val);
    }

    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.uint8.push(val as u8);
    }

    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.uint8.extend_from_slice(&val.to_le_bytes());
    }

    /// Writes an unsigned base-128 varint.
    pub fn vuint32(&mut self, mut val: u32) {
        loop {
            let byte = (val & 0x7f) as u8;
            val >>= 7;
            if val == 0 {
                self.uint8.push(byte);
                return;
            }
            self.uint8.push(byte | 0x80);
        }
    }

    /// Writes a signed varint using zigzag mapping.
    pub fn vint32(&mut self, val: i32) {
        self.vuint32(((val << 1) ^ (val >> 31)) as u32);
    }

    /// Writes raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        self.uint8.extend_from_slice(data);
    }

    /// Writes UTF-8 bytes of `s` without any length prefix.
    pub fn utf8(&mut self, s: &str) {
        self.uint8.extend_from_slice(s.as_bytes());
    }

    /// Writes a varint length prefix followed by the raw bytes. Nothing is
    /// written if the length does not fit the u32 prefix.
    pub fn bytes(&mut self, data: &[u8]) -> Result<(), BufferError> {
        self.vuint32(length_prefix(data.len())?);
        self.buf(data);
        Ok(())
    }

    /// Writes a varint length prefix followed by UTF-8 bytes.
    pub fn str(&mut self, s: &str) -> Result<(), BufferError> {
        self.bytes(s.as_bytes())
    }
}

fn length_prefix(len: usize) -> Result<u32, BufferError> {
    u32::try_from(len).map_err(|_| BufferError::LengthOverflow(len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian() {
        let mut w = Writer::new();
        w.u32(0x0102_0304);
        assert_eq!(w.flush(), vec![0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_vuint32() {
        let mut w = Writer::new();
        w.vuint32(0);
        w.vuint32(127);
        w.vuint32(128);
        w.vuint32(u32::MAX);
        assert_eq!(
            w.flush(),
            vec![0x00, 0x7f, 0x80, 0x01, 0xff, 0xff, 0xff, 0xff, 0x0f]
        );
    }

    #[test]
    fn test_vint32_zigzag() {
        let mut w = Writer::new();
        w.vint32(0);
        w.vint32(-1);
        w.vint32(1);
        w.vint32(-64);
        assert_eq!(w.flush(), vec![0x00, 0x01, 0x02, 0x7f]);
    }

    #[test]
    fn test_flush_resets() {
        let mut w = Writer::new();
        w.str("eos").unwrap();
        assert_eq!(w.flush(), vec![0x03, b'e', b'o', b's']);
        assert!(w.is_empty());
    }

    #[test]
    fn length_prefix_bounds() {
        assert_eq!(length_prefix(u32::MAX as usize), Ok(u32::MAX));
        #[cfg(target_pointer_width = "64")]
        assert_eq!(
            length_prefix(u32::MAX as usize + 1),
            Err(BufferError::LengthOverflow(u32::MAX as usize + 1))
        );
    }
}
