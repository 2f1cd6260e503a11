//! Base-58 encoding.

use crate::constants::ALPHABET;

/// Encodes bytes to a base-58 string.
///
/// # Example
///
/// ```
/// use fcbuf_base58::to_base58;
///
/// assert_eq!(to_base58(&[0, 0, 1]), "112");
/// assert_eq!(to_base58(&[]), "");
/// ```
pub fn to_base58(uint8: &[u8]) -> String {
    let zeros = uint8.iter().take_while(|&&b| b == 0).count();

    // Little-endian base-58 digits of the big-endian input number.
    let mut digits: Vec<u8> = Vec::with_capacity(uint8.len() * 138 / 100 + 1);
    for &byte in &uint8[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    for _ in 0..zeros {
        out.push(ALPHABET[0] as char);
    }
    for &digit in digits.iter().rev() {
        out.push(ALPHABET[digit as usize] as char);
    }
    out
}
