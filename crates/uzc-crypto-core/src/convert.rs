//! Integer, byte and hex conversions used at the wire boundary.
//!
//! The byte orders here are fixed by the node API and are not symmetric:
//! the `bytes_to_*` readers are little-endian, the `*_to_bytes` writers are
//! big-endian.

use crate::error::Result;

/// Little-endian value of the first `min(8, len)` bytes.
pub fn bytes_to_long(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .take(8)
        .enumerate()
        .fold(0u64, |acc, (i, &b)| acc | (u64::from(b) << (8 * i)))
}

/// Big-endian encoding.
pub fn long_to_bytes(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Little-endian value of the first `min(4, len)` bytes.
pub fn bytes_to_int(bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .take(4)
        .enumerate()
        .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (8 * i)))
}

/// Big-endian encoding.
pub fn int_to_bytes(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode hex (either case). Malformed input is `InvalidArgument`.
pub fn parse_hex(s: &str) -> Result<Vec<u8>> {
    Ok(hex::decode(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn test_bytes_to_long_is_little_endian() {
        assert_eq!(bytes_to_long(&[1, 0, 0, 0, 0, 0, 0, 0]), 1);
        assert_eq!(bytes_to_long(&[0x37, 0x12]), 0x1237);
        assert_eq!(bytes_to_long(&[0xff; 12]), u64::MAX);
        assert_eq!(bytes_to_long(&[]), 0);
    }

    #[test]
    fn test_long_to_bytes_is_big_endian() {
        assert_eq!(long_to_bytes(0x0102030405060708), [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_int_conversions() {
        assert_eq!(bytes_to_int(&[0x78, 0x56, 0x34, 0x12, 0xff]), 0x12345678);
        assert_eq!(int_to_bytes(0x12345678), [0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn test_hex() {
        assert_eq!(to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
        assert_eq!(parse_hex("DEADbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert!(matches!(parse_hex("abc"), Err(CoreError::InvalidArgument(_))));
        assert!(matches!(parse_hex("zz"), Err(CoreError::InvalidArgument(_))));
    }
}
