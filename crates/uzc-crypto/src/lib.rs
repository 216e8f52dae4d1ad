//! # UZC Crypto
//!
//! The unified API of the UZC crypto engine: the cryptography a
//! proof-of-capacity ledger client needs, with no networking.
//!
//! ## Overview
//!
//! - **Keys**: Curve25519 keys derived from passphrases, X25519 agreement
//! - **Signatures**: Deterministic EC-KCDSA over SHA-256
//! - **Addresses**: Reed-Solomon checksummed account ids
//! - **Messages**: Gzip plus AES-256-CBC between two accounts
//! - **Mining**: Generation signatures, scoops, hits and deadlines
//! - **Automated Transactions**: Creation record packing
//!
//! ## Usage
//!
//! ```rust
//! use uzc_crypto::{CryptoConfig, UzcCrypto};
//!
//! let engine = UzcCrypto::new(CryptoConfig::default());
//! let alice = engine.private_key("example1");
//! let bob = engine.private_key("example2");
//!
//! let address = engine.address_from_private_key(&alice);
//! assert_eq!(engine.format_address(&address), "UZC-FN2V-QNCH-QY6K-GGXHS");
//!
//! let signature = engine.sign(b"hello", &alice);
//! assert!(engine.verify_default(&signature, b"hello", &alice.public_key()));
//!
//! let message = engine
//!     .encrypt_text_message("Test message", &alice, &bob.public_key())
//!     .unwrap();
//! let text = engine
//!     .decrypt_text_message(&message, &bob, &alice.public_key())
//!     .unwrap();
//! assert_eq!(text, "Test message");
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `uzc_crypto::core` - Hashes, keys, signatures, addresses
//! - `uzc_crypto::plot` - Plot calculator and deadline search
//! - `uzc_crypto::message` - AES and encrypted messages

pub mod at;
pub mod engine;
pub mod error;
pub mod transaction;

// Re-export component crates
pub use uzc_crypto_core as core;
pub use uzc_crypto_message as message;
pub use uzc_crypto_plot as plot;

// Re-export main types for convenience
pub use at::{at_creation_bytes, AtCreation};
pub use engine::{CryptoConfig, UzcCrypto};
pub use error::{CryptoError, ErrorKind, Result};
pub use transaction::{sign_transaction, verify_transaction, SIGNATURE_OFFSET};

// Re-export commonly used component types
pub use uzc_crypto_core::{
    convert, AccountId, Address, PrivateKey, PublicKey, SharedSecret, Signature, Timestamp,
};
pub use uzc_crypto_message::EncryptedMessage;
pub use uzc_crypto_plot::{
    BestDeadline, GenerationSignature, PocVersion, Scoop, SearchConfig,
};
