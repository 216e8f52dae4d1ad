//! Value types for mining.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlotError, Result};

/// Number of scoops in one plot nonce.
pub const SCOOPS_PER_PLOT: u32 = 4096;

/// Bytes in one scoop.
pub const SCOOP_SIZE: usize = 64;

/// Bytes in one plot nonce.
pub const PLOT_SIZE: usize = SCOOPS_PER_PLOT as usize * SCOOP_SIZE;

/// Chained 32-byte per-block entropy.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationSignature(pub [u8; 32]);

impl GenerationSignature {
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
        let bytes = hex::decode(s)
            .map_err(|e| PlotError::InvalidArgument(format!("generation signature: {e}")))?;
        Self::try_from(bytes.as_slice())
    }
}

impl fmt::Debug for GenerationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenerationSignature({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for GenerationSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for GenerationSignature {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for GenerationSignature {
    type Error = PlotError;

    fn try_from(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; 32] = slice.try_into().map_err(|_| {
            PlotError::InvalidArgument(format!(
                "generation signature must be 32 bytes, got {}",
                slice.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

/// Index of a 64-byte slice of a plot, always below [`SCOOPS_PER_PLOT`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Scoop(u32);

impl Scoop {
    /// Create a scoop index, rejecting values outside `[0, 4096)`.
    pub fn new(index: u32) -> Result<Self> {
        if index < SCOOPS_PER_PLOT {
            Ok(Self(index))
        } else {
            Err(PlotError::InvalidArgument(format!(
                "scoop {index} out of range 0..{SCOOPS_PER_PLOT}"
            )))
        }
    }

    /// Wrap any integer into range.
    pub const fn wrapping(index: u32) -> Self {
        Self(index % SCOOPS_PER_PLOT)
    }

    /// The index.
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// The scoop whose second half a PoC2 plot stores alongside this one.
    pub const fn mirror(&self) -> Self {
        Self(SCOOPS_PER_PLOT - 1 - self.0)
    }

    pub(crate) const fn offset(&self) -> usize {
        self.0 as usize * SCOOP_SIZE
    }
}

impl fmt::Debug for Scoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scoop({})", self.0)
    }
}

impl fmt::Display for Scoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Scoop {
    type Error = PlotError;

    fn try_from(index: u32) -> Result<Self> {
        Self::new(index)
    }
}

impl From<Scoop> for u32 {
    fn from(scoop: Scoop) -> Self {
        scoop.0
    }
}

/// Plot layout version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PocVersion {
    /// Scoops stored as generated.
    V1,
    /// Second half of scoop `n` swapped with that of scoop `4095 - n`.
    V2,
}

impl PocVersion {
    /// Wire value.
    pub const fn to_u8(self) -> u8 {
        match self {
            PocVersion::V1 => 1,
            PocVersion::V2 => 2,
        }
    }
}

impl TryFrom<u8> for PocVersion {
    type Error = PlotError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(PocVersion::V1),
            2 => Ok(PocVersion::V2),
            other => Err(PlotError::InvalidArgument(format!(
                "unknown PoC version {other}"
            ))),
        }
    }
}

impl TryFrom<i32> for PocVersion {
    type Error = PlotError;

    fn try_from(value: i32) -> Result<Self> {
        u8::try_from(value)
            .map_err(|_| PlotError::InvalidArgument(format!("unknown PoC version {value}")))
            .and_then(PocVersion::try_from)
    }
}

impl fmt::Display for PocVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PoC{}", self.to_u8())
    }
}
