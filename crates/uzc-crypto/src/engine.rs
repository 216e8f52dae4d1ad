//! The engine: one entry point over keys, addresses, signatures, messages,
//! mining values and AT records.
//!
//! [`UzcCrypto`] is an ordinary value holding its [`CryptoConfig`]. It has no
//! interior state, so one instance can be shared freely across threads.

use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::ops::Range;

use uzc_crypto_core::{
    epoch_beginning, hash, AccountId, Address, PrivateKey, PublicKey, SharedSecret, Signature,
    Timestamp, DEFAULT_PREFIX,
};
use uzc_crypto_message::{aes, EncryptedMessage};
use uzc_crypto_plot::{
    calculator, BestDeadline, DeadlineSearch, GenerationSignature, PocVersion, Scoop,
    SearchConfig, SCOOP_SIZE,
};

use crate::at;
use crate::error::Result;
use crate::transaction;

/// Configuration for the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Prefix written before and stripped from Reed-Solomon addresses.
    pub address_prefix: String,
    /// Origin of network timestamps.
    pub epoch_beginning: DateTime<Utc>,
    /// Whether [`UzcCrypto::verify_default`] requires canonical encodings.
    pub enforce_canonical: bool,
    /// Deadline search tuning.
    pub search: SearchConfig,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            address_prefix: DEFAULT_PREFIX.to_string(),
            epoch_beginning: epoch_beginning(),
            enforce_canonical: true,
            search: SearchConfig::default(),
        }
    }
}

/// The crypto engine.
#[derive(Debug, Clone, Default)]
pub struct UzcCrypto {
    config: CryptoConfig,
}

impl UzcCrypto {
    /// Create an engine with `config`.
    pub fn new(config: CryptoConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &CryptoConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keys
    // ─────────────────────────────────────────────────────────────────────────

    /// Private key of a passphrase.
    pub fn private_key(&self, passphrase: &str) -> PrivateKey {
        PrivateKey::from_passphrase(passphrase)
    }

    /// Public key of a passphrase.
    pub fn public_key_from_passphrase(&self, passphrase: &str) -> PublicKey {
        PrivateKey::from_passphrase(passphrase).public_key()
    }

    /// Public key of a private key.
    pub fn public_key(&self, key: &PrivateKey) -> PublicKey {
        key.public_key()
    }

    /// X25519 agreement; both parties obtain the same secret.
    pub fn shared_secret(&self, my_key: &PrivateKey, their_public: &PublicKey) -> SharedSecret {
        my_key.shared_secret(their_public)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Addresses
    // ─────────────────────────────────────────────────────────────────────────

    pub fn address_from_public_key(&self, public_key: &PublicKey) -> Address {
        Address::from_public_key(public_key)
    }

    pub fn address_from_private_key(&self, key: &PrivateKey) -> Address {
        Address::from_public_key(&key.public_key())
    }

    pub fn address_from_passphrase(&self, passphrase: &str) -> Address {
        self.address_from_public_key(&self.public_key_from_passphrase(passphrase))
    }

    /// Id from the first 8 bytes of a hash, read little-endian.
    pub fn hash_to_id(&self, hash: &[u8]) -> Result<AccountId> {
        Ok(AccountId::from_hash(hash)?)
    }

    /// Reed-Solomon text of an id, without prefix.
    pub fn rs_encode(&self, id: AccountId) -> String {
        Address::from_account_id(id).rs()
    }

    /// Decode Reed-Solomon text, with or without the configured prefix.
    pub fn rs_decode(&self, text: &str) -> Result<AccountId> {
        Ok(Address::parse_rs(text, &self.config.address_prefix)?.account_id())
    }

    /// Parse an unsigned decimal id or Reed-Solomon text.
    pub fn parse_address(&self, text: &str) -> Result<Address> {
        Ok(Address::parse(text, &self.config.address_prefix)?)
    }

    /// Reed-Solomon text with the configured prefix.
    pub fn format_address(&self, address: &Address) -> String {
        address.full_address(&self.config.address_prefix)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Hashes
    // ─────────────────────────────────────────────────────────────────────────

    pub fn shabal256(&self, data: &[u8]) -> [u8; 32] {
        hash::shabal256(data)
    }

    pub fn sha256(&self, data: &[u8]) -> [u8; 32] {
        hash::sha256(data)
    }

    pub fn hash160(&self, data: &[u8]) -> [u8; 20] {
        hash::hash160(data)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Signatures
    // ─────────────────────────────────────────────────────────────────────────

    /// Deterministic signature of `message`.
    pub fn sign(&self, message: &[u8], key: &PrivateKey) -> Signature {
        key.sign(message)
    }

    /// Verify `signature` over `message`. Never fails; bad input is `false`.
    pub fn verify(
        &self,
        signature: &Signature,
        message: &[u8],
        public_key: &PublicKey,
        enforce_canonical: bool,
    ) -> bool {
        public_key.verify(message, signature, enforce_canonical)
    }

    /// [`verify`](Self::verify) with the configured canonicality rule.
    pub fn verify_default(
        &self,
        signature: &Signature,
        message: &[u8],
        public_key: &PublicKey,
    ) -> bool {
        self.verify(signature, message, public_key, self.config.enforce_canonical)
    }

    /// Copy of `unsigned` with its signature written at byte 96.
    pub fn sign_transaction(&self, key: &PrivateKey, unsigned: &[u8]) -> Result<Vec<u8>> {
        transaction::sign_transaction(key, unsigned)
    }

    /// Check the signature embedded in a signed transaction.
    pub fn verify_transaction(&self, public_key: &PublicKey, signed: &[u8]) -> bool {
        transaction::verify_transaction(public_key, signed, self.config.enforce_canonical)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Messages
    // ─────────────────────────────────────────────────────────────────────────

    /// Encrypt a message with an explicit nonce and RNG.
    pub fn encrypt_message<R: RngCore + CryptoRng>(
        &self,
        plaintext: &[u8],
        my_key: &PrivateKey,
        their_public: &PublicKey,
        nonce: [u8; 32],
        is_text: bool,
        rng: &mut R,
    ) -> Result<EncryptedMessage> {
        Ok(EncryptedMessage::encrypt(
            plaintext,
            my_key,
            their_public,
            nonce,
            is_text,
            rng,
        )?)
    }

    /// Encrypt UTF-8 text under a fresh random nonce.
    pub fn encrypt_text_message(
        &self,
        text: &str,
        my_key: &PrivateKey,
        their_public: &PublicKey,
    ) -> Result<EncryptedMessage> {
        self.encrypt_random(text.as_bytes(), my_key, their_public, true)
    }

    /// Encrypt bytes under a fresh random nonce.
    pub fn encrypt_bytes_message(
        &self,
        bytes: &[u8],
        my_key: &PrivateKey,
        their_public: &PublicKey,
    ) -> Result<EncryptedMessage> {
        self.encrypt_random(bytes, my_key, their_public, false)
    }

    fn encrypt_random(
        &self,
        plaintext: &[u8],
        my_key: &PrivateKey,
        their_public: &PublicKey,
        is_text: bool,
    ) -> Result<EncryptedMessage> {
        let mut nonce = [0u8; 32];
        OsRng.fill_bytes(&mut nonce);
        self.encrypt_message(plaintext, my_key, their_public, nonce, is_text, &mut OsRng)
    }

    pub fn decrypt_message(
        &self,
        message: &EncryptedMessage,
        my_key: &PrivateKey,
        their_public: &PublicKey,
    ) -> Result<Vec<u8>> {
        Ok(message.decrypt(my_key, their_public)?)
    }

    /// Decrypt and decode as UTF-8.
    pub fn decrypt_text_message(
        &self,
        message: &EncryptedMessage,
        my_key: &PrivateKey,
        their_public: &PublicKey,
    ) -> Result<String> {
        Ok(message.decrypt_text(my_key, their_public)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Raw AES
    // ─────────────────────────────────────────────────────────────────────────

    /// AES-256-CBC under `sha256(key XOR nonce)`; output is `IV ‖ ciphertext`.
    pub fn aes_encrypt<R: RngCore + CryptoRng>(
        &self,
        plaintext: &[u8],
        key: &[u8; 32],
        nonce: &[u8; 32],
        rng: &mut R,
    ) -> Vec<u8> {
        aes::encrypt(plaintext, key, nonce, rng)
    }

    /// [`aes_encrypt`](Self::aes_encrypt) with a zero nonce and the OS RNG.
    pub fn aes_encrypt_default(&self, plaintext: &[u8], key: &[u8; 32]) -> Vec<u8> {
        aes::encrypt(plaintext, key, &[0u8; 32], &mut OsRng)
    }

    pub fn aes_decrypt(&self, data: &[u8], key: &[u8; 32], nonce: &[u8; 32]) -> Result<Vec<u8>> {
        Ok(aes::decrypt(data, key, nonce)?)
    }

    /// AES keyed by the shared secret of `my_key` and `their_public`.
    pub fn aes_shared_encrypt<R: RngCore + CryptoRng>(
        &self,
        plaintext: &[u8],
        my_key: &PrivateKey,
        their_public: &PublicKey,
        nonce: &[u8; 32],
        rng: &mut R,
    ) -> Vec<u8> {
        aes::shared_encrypt(plaintext, my_key, their_public, nonce, rng)
    }

    pub fn aes_shared_decrypt(
        &self,
        data: &[u8],
        my_key: &PrivateKey,
        their_public: &PublicKey,
        nonce: &[u8; 32],
    ) -> Result<Vec<u8>> {
        Ok(aes::shared_decrypt(data, my_key, their_public, nonce)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mining
    // ─────────────────────────────────────────────────────────────────────────

    pub fn generation_signature(
        &self,
        last_gen_sig: &GenerationSignature,
        last_generator: AccountId,
    ) -> GenerationSignature {
        calculator::generation_signature(last_gen_sig, last_generator)
    }

    pub fn scoop(&self, gen_sig: &GenerationSignature, height: u64) -> Scoop {
        calculator::scoop(gen_sig, height)
    }

    pub fn plot_data(
        &self,
        account: AccountId,
        nonce: u64,
        scoop: Scoop,
        poc: PocVersion,
    ) -> [u8; SCOOP_SIZE] {
        calculator::plot_data(account, nonce, scoop, poc)
    }

    pub fn hit(
        &self,
        account: AccountId,
        nonce: u64,
        gen_sig: &GenerationSignature,
        scoop: Scoop,
        poc: PocVersion,
    ) -> u64 {
        calculator::hit(account, nonce, gen_sig, scoop, poc)
    }

    pub fn hit_from_scoop_data(&self, gen_sig: &GenerationSignature, scoop_data: &[u8]) -> u64 {
        calculator::hit_from_scoop_data(gen_sig, scoop_data)
    }

    /// Seconds until `(account, nonce)` may forge. Zero `base_target` is an
    /// error.
    pub fn deadline(
        &self,
        account: AccountId,
        nonce: u64,
        gen_sig: &GenerationSignature,
        scoop: Scoop,
        base_target: u64,
        poc: PocVersion,
    ) -> Result<u64> {
        Ok(calculator::deadline(
            account,
            nonce,
            gen_sig,
            scoop,
            base_target,
            poc,
        )?)
    }

    /// Best deadline over `nonces`, spread across the configured workers.
    pub async fn search_deadline(
        &self,
        account: AccountId,
        gen_sig: GenerationSignature,
        scoop: Scoop,
        base_target: u64,
        poc: PocVersion,
        nonces: Range<u64>,
    ) -> Result<Option<BestDeadline>> {
        let search = DeadlineSearch::new(account, gen_sig, scoop, base_target, poc)?;
        Ok(search.search_parallel(nonces, &self.config.search).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Automated Transactions
    // ─────────────────────────────────────────────────────────────────────────

    /// Pack an AT creation record.
    #[allow(clippy::too_many_arguments)]
    pub fn at_creation_bytes(
        &self,
        version: u16,
        code: &[u8],
        data: &[u8],
        data_pages: i32,
        call_stack_pages: i32,
        user_stack_pages: i32,
        min_activation_planck: u64,
    ) -> Result<Vec<u8>> {
        at::at_creation_bytes(
            version,
            code,
            data,
            data_pages,
            call_stack_pages,
            user_stack_pages,
            min_activation_planck,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Time
    // ─────────────────────────────────────────────────────────────────────────

    /// Wall-clock time of network epoch seconds.
    pub fn from_epoch_time(&self, seconds: u32) -> DateTime<Utc> {
        Timestamp::new(seconds).to_datetime_from(self.config.epoch_beginning)
    }

    /// Network epoch seconds of a wall-clock time.
    pub fn to_epoch_time(&self, time: DateTime<Utc>) -> Result<Timestamp> {
        Ok(Timestamp::from_datetime(time, self.config.epoch_beginning)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn engine() -> UzcCrypto {
        UzcCrypto::default()
    }

    #[test]
    fn test_default_config() {
        let config = CryptoConfig::default();
        assert_eq!(config.address_prefix, "UZC");
        assert!(config.enforce_canonical);
        assert_eq!(config.epoch_beginning.to_rfc3339(), "2014-08-11T02:00:00+00:00");
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: CryptoConfig =
            serde_json::from_str(r#"{"address_prefix": "TEST", "enforce_canonical": false}"#)
                .unwrap();
        assert_eq!(config.address_prefix, "TEST");
        assert!(!config.enforce_canonical);
        assert_eq!(config.epoch_beginning, epoch_beginning());
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_custom_prefix() {
        let engine = UzcCrypto::new(CryptoConfig {
            address_prefix: "TEST".to_string(),
            ..CryptoConfig::default()
        });
        let address = engine.address_from_passphrase("example1");
        assert_eq!(engine.format_address(&address), "TEST-FN2V-QNCH-QY6K-GGXHS");
        assert_eq!(
            engine.rs_decode("test-FN2V-QNCH-QY6K-GGXHS").unwrap(),
            address.account_id()
        );
        assert_eq!(
            engine.rs_decode("UZC-FN2V-QNCH-QY6K-GGXHS").unwrap_err().kind(),
            ErrorKind::DecodeFailure
        );
    }

    #[test]
    fn test_hash_to_id() {
        let engine = engine();
        let digest = engine.sha256(engine.public_key_from_passphrase("example2").as_bytes());
        assert_eq!(engine.hash_to_id(&digest).unwrap().get(), 16617675343370890531);
        assert_eq!(
            engine.hash_to_id(&[1, 2, 3]).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_verify_default_uses_config() {
        let engine = engine();
        let key = engine.private_key("example1");
        let signature = engine.sign(b"payload", &key);
        assert!(engine.verify_default(&signature, b"payload", &key.public_key()));
        assert!(!engine.verify_default(&signature, b"payloae", &key.public_key()));
    }

    #[test]
    fn test_text_message_with_os_rng() {
        let engine = engine();
        let k1 = engine.private_key("example1");
        let k2 = engine.private_key("example2");
        let message = engine
            .encrypt_text_message("Test message", &k1, &k2.public_key())
            .unwrap();
        assert!(message.is_text());
        assert_eq!(
            engine
                .decrypt_text_message(&message, &k2, &k1.public_key())
                .unwrap(),
            "Test message"
        );

        let bytes = engine
            .encrypt_bytes_message(&[0, 159, 146, 150], &k2, &k1.public_key())
            .unwrap();
        assert!(!bytes.is_text());
        assert_eq!(
            engine.decrypt_text_message(&bytes, &k1, &k2.public_key()).unwrap_err().kind(),
            ErrorKind::CipherFailure
        );
    }

    #[test]
    fn test_aes_default_nonce() {
        let engine = engine();
        let key = [0x42u8; 32];
        let data = engine.aes_encrypt_default(b"hello", &key);
        assert_eq!(engine.aes_decrypt(&data, &key, &[0u8; 32]).unwrap(), b"hello");
        assert_eq!(
            engine.aes_decrypt(&data[..16], &key, &[0u8; 32]).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn test_epoch_time() {
        let engine = engine();
        let time = engine.from_epoch_time(3600);
        assert_eq!(time.to_rfc3339(), "2014-08-11T03:00:00+00:00");
        assert_eq!(engine.to_epoch_time(time).unwrap(), Timestamp::new(3600));
    }

    #[test]
    fn test_deadline_zero_base_target() {
        let engine = engine();
        let result = engine.deadline(
            AccountId::new(1),
            0,
            &GenerationSignature([0; 32]),
            Scoop::wrapping(0),
            0,
            PocVersion::V1,
        );
        assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidArgument);
    }
}
