//! Strong type definitions for account identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::curve::PublicKey;
use crate::error::{CoreError, Result};
use crate::hash::sha256;

/// An unsigned 64-bit account identifier.
///
/// Derived from the first 8 bytes (little-endian) of SHA-256 of the account's
/// public key. Formats and parses as an unsigned decimal; nodes that carry the
/// id in a signed 64-bit field use [`AccountId::from_signed`] and
/// [`AccountId::as_signed`] to move the bit pattern across.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub u64);

impl AccountId {
    /// Create from the unsigned value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Reinterpret a signed wire value.
    pub const fn from_signed(id: i64) -> Self {
        Self(id as u64)
    }

    /// The unsigned value.
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// The same bit pattern as a signed value.
    pub const fn as_signed(&self) -> i64 {
        self.0 as i64
    }

    /// Account id of a public key.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let digest = sha256(public_key.as_bytes());
        let mut first = [0u8; 8];
        first.copy_from_slice(&digest[..8]);
        Self(u64::from_le_bytes(first))
    }

    /// Id from the first 8 bytes (little-endian) of an arbitrary hash.
    pub fn from_hash(hash: &[u8]) -> Result<Self> {
        let first: [u8; 8] = hash
            .get(..8)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| CoreError::length("hash prefix", 8, hash.len()))?;
        Ok(Self(u64::from_le_bytes(first)))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| CoreError::InvalidArgument(format!("account id {s:?}: {e}")))
    }
}

impl From<u64> for AccountId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<AccountId> for u64 {
    fn from(id: AccountId) -> Self {
        id.0
    }
}
