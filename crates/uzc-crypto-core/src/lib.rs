//! # UZC Crypto Core
//!
//! Pure primitives for the UZC crypto engine: hashing, curve keys and
//! signatures, and account addressing.
//!
//! This crate contains no I/O, no randomness, no async. Every function is a
//! deterministic computation over byte strings.
//!
//! ## Key Types
//!
//! - [`PrivateKey`] - Clamped Curve25519 scalar, derived from a passphrase
//! - [`PublicKey`] - 32-byte Montgomery u-coordinate
//! - [`Signature`] - 64-byte EC-KCDSA signature `v ‖ h`
//! - [`AccountId`] - 64-bit id derived from a public key
//! - [`Address`] - Reed-Solomon text form of an [`AccountId`]
//!
//! ## Hashing
//!
//! [`Shabal256`] drives mining; SHA-256 drives keys, signatures and ids. See
//! the [`hash`] module.

pub mod address;
pub mod convert;
pub mod curve;
pub mod epoch;
pub mod error;
mod field;
pub mod hash;
pub mod reed_solomon;
pub mod shabal;
pub mod types;

pub use address::{Address, DEFAULT_PREFIX};
pub use curve::{PrivateKey, PublicKey, SharedSecret, Signature};
pub use epoch::{epoch_beginning, Timestamp};
pub use error::{CoreError, Result};
pub use hash::{hash160, sha256, shabal256, Hash256};
pub use shabal::Shabal256;
pub use types::AccountId;
