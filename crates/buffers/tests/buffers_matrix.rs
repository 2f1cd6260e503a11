//! Writer/Reader matrix for the little-endian cursor and varints.

use fcbuf_buffers::{BufferError, Reader, Writer};
use proptest::prelude::*;

#[test]
fn roundtrip_fixed_width_matrix() {
    let mut w = Writer::new();
    w.i8(i8::MIN);
    w.u16(u16::MAX);
    w.i16(-1000);
    w.u32(0xdead_beef);
    w.i32(i32::MIN);
    w.u64(u64::MAX);
    w.i64(-1);
    let data = w.flush();
    assert_eq!(data.len(), 1 + 2 + 2 + 4 + 4 + 8 + 8);

    let mut r = Reader::new(&data);
    assert_eq!(r.i8().unwrap(), i8::MIN);
    assert_eq!(r.u16().unwrap(), u16::MAX);
    assert_eq!(r.i16().unwrap(), -1000);
    assert_eq!(r.u32().unwrap(), 0xdead_beef);
    assert_eq!(r.i32().unwrap(), i32::MIN);
    assert_eq!(r.u64().unwrap(), u64::MAX);
    assert_eq!(r.i64().unwrap(), -1);
    assert!(r.is_empty());
}

#[test]
fn amount_is_little_endian() {
    let mut w = Writer::new();
    w.i64(10000);
    assert_eq!(w.flush(), vec![0x10, 0x27, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn length_prefixed_matrix() {
    let mut w = Writer::new();
    w.str("").unwrap();
    w.str("inita").unwrap();
    w.bytes(&[0x0a, 0x0b, 0x0c]).unwrap();
    let data = w.flush();
    assert_eq!(
        data,
        vec![0x00, 0x05, b'i', b'n', b'i', b't', b'a', 0x03, 0x0a, 0x0b, 0x0c]
    );

    let mut r = Reader::new(&data);
    assert_eq!(r.str().unwrap(), "");
    assert_eq!(r.str().unwrap(), "inita");
    assert_eq!(r.bytes().unwrap(), &[0x0a, 0x0b, 0x0c]);
}

#[test]
fn long_string_uses_multi_byte_prefix() {
    let s = "x".repeat(200);
    let mut w = Writer::new();
    w.str(&s).unwrap();
    let data = w.flush();
    assert_eq!(&data[..2], &[0xc8, 0x01]);
    assert_eq!(Reader::new(&data).str().unwrap(), s);
}

#[test]
fn empty_input_errors() {
    let mut r = Reader::new(&[]);
    assert_eq!(
        r.u8(),
        Err(BufferError::EndOfBuffer {
            needed: 1,
            remaining: 0
        })
    );
    assert!(r.vuint32().is_err());
    assert!(r.str().is_err());
}

proptest! {
    #[test]
    fn vuint32_roundtrip(n in any::<u32>()) {
        let mut w = Writer::new();
        w.vuint32(n);
        let data = w.flush();
        prop_assert!(data.len() <= 5);
        let mut r = Reader::new(&data);
        prop_assert_eq!(r.vuint32().unwrap(), n);
        prop_assert!(r.is_empty());
    }

    #[test]
    fn vint32_roundtrip(n in any::<i32>()) {
        let mut w = Writer::new();
        w.vint32(n);
        let data = w.flush();
        let mut r = Reader::new(&data);
        prop_assert_eq!(r.vint32().unwrap(), n);
    }
}
