//! Encrypted account-to-account messages.
//!
//! A message body is gzipped, then AES-encrypted under the shared secret of
//! sender and recipient mixed with a per-message nonce. Either party can
//! decrypt with their own private key and the other's public key.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use uzc_crypto_core::{PrivateKey, PublicKey};

use crate::aes::{self, NONCE_SIZE};
use crate::compression;
use crate::error::{MessageError, Result};

/// An encrypted message as carried in a transaction attachment.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedMessage {
    data: Vec<u8>,
    nonce: [u8; NONCE_SIZE],
    is_text: bool,
}

impl EncryptedMessage {
    /// Reassemble a message received from elsewhere.
    pub fn new(data: Vec<u8>, nonce: [u8; NONCE_SIZE], is_text: bool) -> Self {
        Self {
            data,
            nonce,
            is_text,
        }
    }

    /// Encrypt `plaintext` from `my_key` to `their_public`.
    ///
    /// An empty plaintext produces empty data and never touches the cipher.
    pub fn encrypt<R: RngCore + CryptoRng>(
        plaintext: &[u8],
        my_key: &PrivateKey,
        their_public: &PublicKey,
        nonce: [u8; NONCE_SIZE],
        is_text: bool,
        rng: &mut R,
    ) -> Result<Self> {
        if plaintext.is_empty() {
            return Ok(Self::new(Vec::new(), nonce, is_text));
        }
        let compressed = compression::compress(plaintext)?;
        let data = aes::shared_encrypt(&compressed, my_key, their_public, &nonce, rng);
        debug!(
            plaintext_len = plaintext.len(),
            compressed_len = compressed.len(),
            data_len = data.len(),
            is_text,
            "encrypted message"
        );
        Ok(Self::new(data, nonce, is_text))
    }

    /// Decrypt with `my_key` and the other party's `their_public`.
    pub fn decrypt(&self, my_key: &PrivateKey, their_public: &PublicKey) -> Result<Vec<u8>> {
        if self.data.is_empty() {
            return Ok(Vec::new());
        }
        let plaintext = aes::shared_decrypt(&self.data, my_key, their_public, &self.nonce)
            .and_then(|compressed| compression::decompress(&compressed));
        match &plaintext {
            Ok(body) => debug!(
                data_len = self.data.len(),
                plaintext_len = body.len(),
                "decrypted message"
            ),
            Err(e) => debug!(data_len = self.data.len(), error = %e, "message decryption failed"),
        }
        plaintext
    }

    /// Decrypt and interpret as UTF-8.
    pub fn decrypt_text(&self, my_key: &PrivateKey, their_public: &PublicKey) -> Result<String> {
        let bytes = self.decrypt(my_key, their_public)?;
        String::from_utf8(bytes)
            .map_err(|e| MessageError::CipherFailure(format!("plaintext is not UTF-8: {e}")))
    }

    /// Ciphertext, `IV ‖ blocks`, or empty.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Key-derivation nonce.
    pub fn nonce(&self) -> &[u8; NONCE_SIZE] {
        &self.nonce
    }

    /// Whether the plaintext is UTF-8 text.
    pub fn is_text(&self) -> bool {
        self.is_text
    }

    /// Whether the message carries no ciphertext.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for EncryptedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptedMessage")
            .field("data_len", &self.data.len())
            .field("nonce", &hex_prefix(&self.nonce))
            .field("is_text", &self.is_text)
            .finish()
    }
}

fn hex_prefix(bytes: &[u8]) -> String {
    bytes.iter().take(8).map(|b| format!("{b:02x}")).collect()
}
