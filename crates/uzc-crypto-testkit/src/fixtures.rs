//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use rand::distributions::Alphanumeric;
use rand::Rng;

use uzc_crypto::{
    Address, CryptoConfig, EncryptedMessage, PrivateKey, PublicKey, Result, Timestamp, UzcCrypto,
    SIGNATURE_OFFSET,
};

/// Length of an ordinary payment transaction.
pub const PAYMENT_LEN: usize = 176;

/// A test fixture with an engine and one account.
pub struct TestFixture {
    pub engine: UzcCrypto,
    pub passphrase: String,
    pub private_key: PrivateKey,
}

impl TestFixture {
    /// Create a new test fixture with a random passphrase.
    pub fn new() -> Self {
        let passphrase: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        Self::with_passphrase(&passphrase)
    }

    /// Create with a deterministic key from a passphrase.
    pub fn with_passphrase(passphrase: &str) -> Self {
        Self::with_config(passphrase, CryptoConfig::default())
    }

    /// Create with a custom engine configuration.
    pub fn with_config(passphrase: &str, config: CryptoConfig) -> Self {
        let engine = UzcCrypto::new(config);
        let private_key = engine.private_key(passphrase);
        Self {
            engine,
            passphrase: passphrase.to_string(),
            private_key,
        }
    }

    /// The account's public key.
    pub fn public_key(&self) -> PublicKey {
        self.private_key.public_key()
    }

    /// The account's address.
    pub fn address(&self) -> Address {
        self.engine.address_from_private_key(&self.private_key)
    }

    /// Encrypt `text` to another fixture's account.
    pub fn encrypt_to(&self, other: &TestFixture, text: &str) -> Result<EncryptedMessage> {
        self.engine
            .encrypt_text_message(text, &self.private_key, &other.public_key())
    }

    /// Decrypt a message sent by another fixture's account.
    pub fn decrypt_from(&self, other: &TestFixture, message: &EncryptedMessage) -> Result<String> {
        self.engine
            .decrypt_text_message(message, &self.private_key, &other.public_key())
    }

    /// Unsigned ordinary payment from this account, signature field zeroed.
    ///
    /// Layout: type, subtype, timestamp, deadline, sender key, recipient,
    /// amount, fee, referenced hash, signature, flags, EC block height and id.
    pub fn make_payment(
        &self,
        recipient: &Address,
        amount_planck: u64,
        fee_planck: u64,
        timestamp: Timestamp,
    ) -> Vec<u8> {
        let mut tx = Vec::with_capacity(PAYMENT_LEN);
        tx.push(0); // payment
        tx.push(0x10); // ordinary, version 1
        tx.extend_from_slice(&timestamp.get().to_le_bytes());
        tx.extend_from_slice(&1440u16.to_le_bytes());
        tx.extend_from_slice(self.public_key().as_bytes());
        tx.extend_from_slice(&recipient.account_id().get().to_le_bytes());
        tx.extend_from_slice(&amount_planck.to_le_bytes());
        tx.extend_from_slice(&fee_planck.to_le_bytes());
        tx.extend_from_slice(&[0u8; 32]);
        debug_assert_eq!(tx.len(), SIGNATURE_OFFSET);
        tx.extend_from_slice(&[0u8; 64]);
        tx.extend_from_slice(&0u32.to_le_bytes());
        tx.extend_from_slice(&0u32.to_le_bytes());
        tx.extend_from_slice(&0u64.to_le_bytes());
        tx
    }

    /// Signed ordinary payment.
    pub fn make_signed_payment(
        &self,
        recipient: &Address,
        amount_planck: u64,
        fee_planck: u64,
        timestamp: Timestamp,
    ) -> Result<Vec<u8>> {
        let unsigned = self.make_payment(recipient, amount_planck, fee_planck, timestamp);
        self.engine.sign_transaction(&self.private_key, &unsigned)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create `n` fixtures with distinct deterministic passphrases.
pub fn multi_party_fixtures(n: usize) -> Vec<TestFixture> {
    (0..n)
        .map(|i| TestFixture::with_passphrase(&format!("party {i}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creation() {
        let a = TestFixture::new();
        let b = TestFixture::new();
        assert_ne!(a.public_key(), b.public_key());
        assert_eq!(a.passphrase.len(), 32);
    }

    #[test]
    fn test_deterministic_fixture() {
        let fixture = TestFixture::with_passphrase("example1");
        assert_eq!(fixture.address().to_string(), "UZC-FN2V-QNCH-QY6K-GGXHS");
    }

    #[test]
    fn test_multi_party_messages() {
        let parties = multi_party_fixtures(3);
        for sender in &parties {
            for recipient in &parties {
                let message = sender.encrypt_to(recipient, "hello").unwrap();
                assert_eq!(recipient.decrypt_from(sender, &message).unwrap(), "hello");
            }
        }
    }

    #[test]
    fn test_signed_payment() {
        let alice = TestFixture::with_passphrase("example1");
        let bob = TestFixture::with_passphrase("example2");
        let signed = alice
            .make_signed_payment(&bob.address(), 100_000_000, 735_000, Timestamp::new(123_456))
            .unwrap();
        assert_eq!(signed.len(), PAYMENT_LEN);
        assert!(alice.engine.verify_transaction(&alice.public_key(), &signed));
        assert!(!alice.engine.verify_transaction(&bob.public_key(), &signed));
        assert_eq!(&signed[8..40], alice.public_key().as_bytes());
    }
}
