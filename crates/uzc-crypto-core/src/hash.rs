//! Hash functions used by the engine.
//!
//! Shabal-256 is the plotting and mining hash. SHA-256 derives keys, account
//! ids and signature commitments. RIPEMD-160 is exposed for callers that
//! build script-style commitments.

use ripemd::Ripemd160;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::{CoreError, Result};
use crate::shabal::Shabal256;

/// A 32-byte digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }

    /// The zero digest.
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Hash256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Hash256 {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self> {
        let arr: [u8; 32] = slice
            .try_into()
            .map_err(|_| CoreError::length("hash", 32, slice.len()))?;
        Ok(Self(arr))
    }
}

/// Shabal-256 of `data`.
pub fn shabal256(data: &[u8]) -> [u8; 32] {
    Shabal256::digest(data)
}

/// Shabal-256 over the concatenation of `parts`.
pub fn shabal256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Shabal256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize()
}

/// SHA-256 of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256 over the concatenation of `parts`.
pub fn sha256_concat(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// RIPEMD-160 of `data`.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash160_known_value() {
        assert_eq!(
            hex::encode(hash160(b"abc")),
            "8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"
        );
    }

    #[test]
    fn test_concat_matches_single_buffer() {
        let joined = b"hello world";
        assert_eq!(sha256_concat(&[b"hello", b" ", b"world"]), sha256(joined));
        assert_eq!(shabal256_concat(&[b"hello ", b"world"]), shabal256(joined));
    }

    #[test]
    fn test_hash256_hex_roundtrip() {
        let h = Hash256::from_bytes(shabal256(b"abc"));
        let recovered = Hash256::from_hex(&h.to_hex()).unwrap();
        assert_eq!(h, recovered);
    }

    #[test]
    fn test_hash256_rejects_wrong_length() {
        assert!(matches!(
            Hash256::from_hex("abcd"),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            Hash256::from_hex("zz"),
            Err(CoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_hash256_debug() {
        let debug = format!("{:?}", Hash256::ZERO);
        assert_eq!(debug, "Hash256(0000000000000000)");
    }
}
