/// Bitcoin base-58 alphabet (no `0`, `O`, `I`, `l`).
pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Marker for bytes outside the alphabet in [`DECODE`].
pub(crate) const INVALID: u8 = 0xff;

/// Reverse lookup from ASCII byte to digit value.
pub(crate) const DECODE: [u8; 128] = build_decode_table();

const fn build_decode_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}
