//! Curve25519 keys and the network's signature scheme.
//!
//! Key agreement is plain X25519. Signatures follow the EC-KCDSA variant the
//! ledger has used since genesis: a 32-byte scalar `v` followed by a 32-byte
//! SHA-256 commitment `h`. Verification recomputes `v·P + h·G` on Curve25519
//! and compares the commitment.
//!
//! Montgomery-form points are carried through the Edwards representation of
//! `curve25519-dalek`; the only thing the dalek API does not expose is the
//! parity of the Montgomery y coordinate, which [`crate::field`] supplies.

use curve25519_dalek::constants::ED25519_BASEPOINT_POINT;
use curve25519_dalek::montgomery::MontgomeryPoint;
use curve25519_dalek::{EdwardsPoint, Scalar};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use x25519_dalek::{x25519, X25519_BASEPOINT_BYTES};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{CoreError, Result};
use crate::field::FieldElement;
use crate::hash::{sha256, sha256_concat};

/// 1 / (2·Gy), where G = (9, Gy) is the signing base point.
const BASE_R2Y: FieldElement = FieldElement::from_limbs([
    547665238562416,
    924726394952301,
    841626324907422,
    2016447399016971,
    417828685705301,
]);

/// Gy², i.e. 9³ + A·9² + 9.
const BASE_Y_SQUARED: FieldElement = FieldElement::from_u32(39420360);

const NINE: FieldElement = FieldElement::from_u32(9);
const NINETEEN: FieldElement = FieldElement::from_u32(19);
const A_PLUS_NINE: FieldElement = FieldElement::from_u32(486671);

/// Clamp a scalar for Curve25519.
pub fn clamp(bytes: &mut [u8; 32]) {
    bytes[0] &= 0xF8;
    bytes[31] &= 0x7F;
    bytes[31] |= 0x40;
}

fn array32(what: &str, slice: &[u8]) -> Result<[u8; 32]> {
    slice
        .try_into()
        .map_err(|_| CoreError::length(what, 32, slice.len()))
}

// ─────────────────────────────────────────────────────────────────────────────
// Private keys
// ─────────────────────────────────────────────────────────────────────────────

/// A clamped Curve25519 private key.
///
/// Zeroed on drop. Never serialized.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Derive from a passphrase: SHA-256 of the UTF-8 bytes, clamped.
    pub fn from_passphrase(passphrase: &str) -> Self {
        Self::from_bytes(sha256(passphrase.as_bytes()))
    }

    /// Wrap raw key bytes. The bytes are clamped.
    pub fn from_bytes(mut bytes: [u8; 32]) -> Self {
        clamp(&mut bytes);
        Self(bytes)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The matching public key, `k·9` on Curve25519.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(x25519(self.0, X25519_BASEPOINT_BYTES))
    }

    /// X25519 key agreement with a counterparty's public key.
    pub fn shared_secret(&self, their_public: &PublicKey) -> SharedSecret {
        SharedSecret(x25519(self.0, their_public.0))
    }

    /// Sign a message.
    ///
    /// Deterministic: the same key and message always give the same signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let m = sha256(message);
        let s = signing_scalar(&Scalar::from_bytes_mod_order(self.0));

        let mut x = sha256_concat(&[&m, s.as_bytes()]);
        clamp(&mut x);
        let y = x25519(x, X25519_BASEPOINT_BYTES);
        let h = sha256_concat(&[&m, &y]);

        let v = (Scalar::from_bytes_mod_order(x) - Scalar::from_bytes_mod_order(h)) * s;

        let mut sig = [0u8; 64];
        sig[..32].copy_from_slice(v.as_bytes());
        sig[32..].copy_from_slice(&h);
        x.zeroize();
        Signature(sig)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({:?})", self.public_key())
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self> {
        Ok(Self::from_bytes(array32("private key", slice)?))
    }
}

/// `(±k)⁻¹ mod q`, choosing the sign so the signer's point has even y.
fn signing_scalar(k: &Scalar) -> Scalar {
    let point = EdwardsPoint::mul_base(k);
    let next = point + ED25519_BASEPOINT_POINT;
    let u = FieldElement::from_bytes(point.to_montgomery().as_bytes());
    let u_next = FieldElement::from_bytes(next.to_montgomery().as_bytes());

    // From u(kG) and u((k+1)G) the addition law gives -y(kG):
    // -y = [(u' + u + 9 + A)(u - 9)² - y² - Gy²] / (2·Gy)
    let y_squared = montgomery_rhs(&u);
    let du = &u - &NINE;
    let sum = &(&u_next + &u) + &A_PLUS_NINE;
    let t = &(&(&sum * &du.square()) - &y_squared) - &BASE_Y_SQUARED;
    let neg_y = &t * &BASE_R2Y;

    let signed = if neg_y.is_negative() { *k } else { -k };
    signed.invert()
}

/// u³ + A·u² + u
fn montgomery_rhs(u: &FieldElement) -> FieldElement {
    &(&u.square() * &(u + &FieldElement::MONTGOMERY_A)) + u
}

// ─────────────────────────────────────────────────────────────────────────────
// Public keys
// ─────────────────────────────────────────────────────────────────────────────

/// A 32-byte Curve25519 public key (Montgomery u coordinate).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
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

    /// Whether the encoding is the reduced form of its field element.
    pub fn is_canonical(&self) -> bool {
        FieldElement::from_bytes(&self.0).to_bytes() == self.0
    }

    /// Verify `signature` over `message`.
    ///
    /// With `enforce_canonical`, non-canonical signatures and public keys are
    /// rejected up front. Never panics; any malformed input is `false`.
    pub fn verify(&self, message: &[u8], signature: &Signature, enforce_canonical: bool) -> bool {
        if enforce_canonical && !(signature.is_canonical() && self.is_canonical()) {
            return false;
        }

        let Some(point) = self.to_edwards() else {
            return false;
        };

        let v = Scalar::from_bytes_mod_order(*signature.v());
        let h = Scalar::from_bytes_mod_order(*signature.h());
        let y = EdwardsPoint::vartime_double_scalar_mul_basepoint(&v, &point, &h).to_montgomery();

        let m = sha256(message);
        sha256_concat(&[&m, y.as_bytes()]) == *signature.h()
    }

    /// The point with this u coordinate and even Montgomery y, in Edwards form.
    fn to_edwards(&self) -> Option<EdwardsPoint> {
        // The high bit is part of the value here: 2^255 ≡ 19.
        let mut u = FieldElement::from_bytes(&self.0);
        if self.0[31] & 0x80 != 0 {
            u = &u + &NINETEEN;
        }

        let mut y = montgomery_rhs(&u).sqrt()?;
        if y.is_negative() {
            y = -&y;
        }
        if y.is_zero() {
            return None;
        }

        let x = &(&FieldElement::SQRT_NEG_A_PLUS_2 * &u) * &y.invert();
        MontgomeryPoint(u.to_bytes()).to_edwards(x.is_negative() as u8)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self> {
        Ok(Self(array32("public key", slice)?))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared secrets
// ─────────────────────────────────────────────────────────────────────────────

/// The X25519 output shared by two key holders. Zeroed on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; 32]);

impl SharedSecret {
    /// Wrap raw bytes, e.g. a secret computed elsewhere.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Signatures
// ─────────────────────────────────────────────────────────────────────────────

/// A 64-byte signature: `v ‖ h`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
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

    /// The scalar half.
    pub fn v(&self) -> &[u8; 32] {
        self.0[..32].try_into().unwrap_or(&[0u8; 32])
    }

    /// The commitment half.
    pub fn h(&self) -> &[u8; 32] {
        self.0[32..].try_into().unwrap_or(&[0u8; 32])
    }

    /// Whether `v` is a reduced scalar (`v < q`).
    pub fn is_canonical(&self) -> bool {
        Option::<Scalar>::from(Scalar::from_canonical_bytes(*self.v())).is_some()
    }

    /// The zero signature (never valid, used as a placeholder).
    pub const ZERO: Self = Self([0u8; 64]);
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = CoreError;

    fn try_from(slice: &[u8]) -> Result<Self> {
        let arr: [u8; 64] = slice
            .try_into()
            .map_err(|_| CoreError::length("signature", 64, slice.len()))?;
        Ok(Self(arr))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
