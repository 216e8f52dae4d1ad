//! # UZC Crypto Testkit
//!
//! Testing utilities for the UZC crypto engine.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known inputs with outputs from the reference client
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up accounts and transactions
//!
//! ## Golden Vectors
//!
//! ```rust
//! use uzc_crypto_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, actual) in verify_all_vectors() {
//!     assert!(matches, "{name}: {actual}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use uzc_crypto_testkit::generators::{message, private_key};
//!
//! proptest! {
//!     #[test]
//!     fn signatures_verify(key in private_key(), msg in message(256)) {
//!         let sig = key.sign(&msg);
//!         prop_assert!(key.public_key().verify(&msg, &sig, true));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use uzc_crypto_testkit::fixtures::multi_party_fixtures;
//!
//! let parties = multi_party_fixtures(2);
//! let message = parties[0].encrypt_to(&parties[1], "hi").unwrap();
//! assert_eq!(parties[1].decrypt_from(&parties[0], &message).unwrap(), "hi");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture};
pub use generators::ExchangeParams;
pub use vectors::{all_vectors, compute_vector, verify_all_vectors, GoldenVector, Operation};
