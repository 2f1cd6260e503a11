//! Base-58 decoding.

use crate::constants::{DECODE, INVALID};
use crate::Base58Error;

/// Decodes a base-58 string to bytes.
///
/// # Example
///
/// ```
/// use fcbuf_base58::from_base58;
///
/// assert_eq!(from_base58("112").unwrap(), vec![0, 0, 1]);
/// assert!(from_base58("0OIl").is_err());
/// ```
pub fn from_base58(encoded: &str) -> Result<Vec<u8>, Base58Error> {
    let zeros = encoded.bytes().take_while(|&c| c == b'1').count();

    // Little-endian base-256 bytes of the decoded number.
    let mut bytes: Vec<u8> = Vec::with_capacity(encoded.len() * 733 / 1000 + 1);
    for (index, character) in encoded.char_indices() {
        let value = match character {
            c if c.is_ascii() => DECODE[c as usize],
            _ => INVALID,
        };
        if value == INVALID {
            return Err(Base58Error::InvalidCharacter { character, index });
        }
        let mut carry = value as u32;
        for byte in bytes.iter_mut() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xff) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xff) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_character_reports_offset() {
        assert_eq!(
            from_base58("abc0"),
            Err(Base58Error::InvalidCharacter {
                character: '0',
                index: 3
            })
        );
    }

    #[test]
    fn test_non_ascii() {
        assert!(matches!(
            from_base58("ab€"),
            Err(Base58Error::InvalidCharacter { character: '€', .. })
        ));
    }

    #[test]
    fn test_only_ones() {
        assert_eq!(from_base58("111").unwrap(), vec![0, 0, 0]);
    }
}
