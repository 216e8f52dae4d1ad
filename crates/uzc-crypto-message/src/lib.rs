//! # UZC Crypto Message
//!
//! Encrypted messages between two accounts.
//!
//! - [`aes`] - AES-256-CBC keyed by `sha256(secret XOR nonce)`
//! - [`compression`] - Gzip framing of message bodies
//! - [`EncryptedMessage`] - Gzip, then AES under the X25519 shared secret
//!
//! Randomness is always passed in; nothing here reaches for a global RNG.

pub mod aes;
pub mod compression;
pub mod error;
pub mod message;

pub use error::{MessageError, Result};
pub use message::EncryptedMessage;
