use fcbuf_base58::{from_base58, to_base58};
use rand::Rng;

#[test]
fn known_vectors_matrix() {
    let cases: &[(&[u8], &str)] = &[
        (b"", ""),
        (&[0], "1"),
        (&[0, 0, 1], "112"),
        (&[0x61], "2g"),
        (b"hello world", "StV1DL6CwTryKyV"),
    ];
    for (bytes, text) in cases {
        assert_eq!(to_base58(bytes), *text);
        assert_eq!(from_base58(text).unwrap(), bytes.to_vec());
    }
}

#[test]
fn public_key_payload_roundtrip() {
    let text = "6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV";
    let bytes = from_base58(text).unwrap();
    assert_eq!(bytes.len(), 37);
    assert_eq!(bytes[0], 0x02);
    assert_eq!(&bytes[33..], &[0xeb, 0x05, 0xf9, 0xd2]);
    assert_eq!(to_base58(&bytes), text);
}

#[test]
fn random_roundtrip() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let len = rng.gen_range(0..64);
        let mut bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        if rng.gen_bool(0.3) {
            bytes.insert(0, 0);
        }
        let encoded = to_base58(&bytes);
        assert_eq!(from_base58(&encoded).unwrap(), bytes);
    }
}
