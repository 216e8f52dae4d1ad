//! AES-256-CBC with a nonce-derived key.
//!
//! The cipher key is `sha256(secret XOR nonce)`. Output is `IV(16) ‖
//! ciphertext` with PKCS#7 padding, so every valid payload is a non-zero
//! multiple of 16 bytes past the IV.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes256;
use rand::{CryptoRng, RngCore};
use tracing::trace;
use zeroize::{Zeroize, Zeroizing};

use uzc_crypto_core::{sha256, PrivateKey, PublicKey};

use crate::error::{MessageError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size, also the IV length.
pub const BLOCK_SIZE: usize = 16;

/// Length of the key-derivation nonce.
pub const NONCE_SIZE: usize = 32;

fn derive_key(secret: &[u8; 32], nonce: &[u8; NONCE_SIZE]) -> Zeroizing<[u8; 32]> {
    let mut mixed = *secret;
    for (m, n) in mixed.iter_mut().zip(nonce) {
        *m ^= n;
    }
    let key = Zeroizing::new(sha256(&mixed));
    mixed.zeroize();
    key
}

/// Encrypt under `secret` and `nonce` with a fresh IV from `rng`.
pub fn encrypt<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    secret: &[u8; 32],
    nonce: &[u8; NONCE_SIZE],
    rng: &mut R,
) -> Vec<u8> {
    let key = derive_key(secret, nonce);
    let mut iv = [0u8; BLOCK_SIZE];
    rng.fill_bytes(&mut iv);

    let ciphertext =
        Aes256CbcEnc::new(&(*key).into(), &iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    trace!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "aes encrypt"
    );

    let mut out = Vec::with_capacity(BLOCK_SIZE + ciphertext.len());
    out.extend_from_slice(&iv);
    out.extend_from_slice(&ciphertext);
    out
}

/// Decrypt `IV ‖ ciphertext` under `secret` and `nonce`.
///
/// A payload that is not a multiple of 16 bytes, or shorter than IV plus one
/// block, is `InvalidArgument`. Bad padding is `CipherFailure`.
pub fn decrypt(encrypted: &[u8], secret: &[u8; 32], nonce: &[u8; NONCE_SIZE]) -> Result<Vec<u8>> {
    if encrypted.len() % BLOCK_SIZE != 0 || encrypted.len() < 2 * BLOCK_SIZE {
        return Err(MessageError::InvalidArgument(format!(
            "encrypted payload of {} bytes is not IV plus whole blocks",
            encrypted.len()
        )));
    }
    let (iv, ciphertext) = encrypted.split_at(BLOCK_SIZE);
    let mut iv_bytes = [0u8; BLOCK_SIZE];
    iv_bytes.copy_from_slice(iv);

    let key = derive_key(secret, nonce);
    let plaintext = Aes256CbcDec::new(&(*key).into(), &iv_bytes.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| MessageError::CipherFailure("bad padding".to_string()))?;
    trace!(
        ciphertext_len = encrypted.len(),
        plaintext_len = plaintext.len(),
        "aes decrypt"
    );
    Ok(plaintext)
}

/// Encrypt with the key agreed between `my_key` and `their_public`.
pub fn shared_encrypt<R: RngCore + CryptoRng>(
    plaintext: &[u8],
    my_key: &PrivateKey,
    their_public: &PublicKey,
    nonce: &[u8; NONCE_SIZE],
    rng: &mut R,
) -> Vec<u8> {
    let shared = my_key.shared_secret(their_public);
    encrypt(plaintext, shared.as_bytes(), nonce, rng)
}

/// Decrypt with the key agreed between `my_key` and `their_public`.
pub fn shared_decrypt(
    encrypted: &[u8],
    my_key: &PrivateKey,
    their_public: &PublicKey,
    nonce: &[u8; NONCE_SIZE],
) -> Result<Vec<u8>> {
    let shared = my_key.shared_secret(their_public);
    decrypt(encrypted, shared.as_bytes(), nonce)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Emits `start, start + 1, ...` so IVs are predictable.
    pub(crate) struct CountingRng(pub u8);

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            let mut buf = [0u8; 4];
            self.fill_bytes(&mut buf);
            u32::from_le_bytes(buf)
        }

        fn next_u64(&mut self) -> u64 {
            let mut buf = [0u8; 8];
            self.fill_bytes(&mut buf);
            u64::from_le_bytes(buf)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for byte in dest {
                *byte = self.0;
                self.0 = self.0.wrapping_add(1);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for CountingRng {}

    pub(crate) fn keys() -> (PrivateKey, PublicKey, PrivateKey, PublicKey) {
        let k1 = PrivateKey::from_passphrase("example1");
        let k2 = PrivateKey::from_passphrase("example2");
        let p1 = k1.public_key();
        let p2 = k2.public_key();
        (k1, p1, k2, p2)
    }

    fn counting_nonce() -> [u8; 32] {
        let mut nonce = [0u8; 32];
        for (i, b) in nonce.iter_mut().enumerate() {
            *b = i as u8;
        }
        nonce
    }

    #[test]
    fn test_derive_key() {
        let (k1, _, _, p2) = keys();
        let shared = k1.shared_secret(&p2);
        let key = derive_key(shared.as_bytes(), &counting_nonce());
        assert_eq!(
            hex::encode(*key),
            "0b6f01452651f5e0e80bf9c4b614b623ed76225315c822fe4876f6107e12e779"
        );
    }

    #[test]
    fn test_encrypt_zero_nonce_golden() {
        let (k1, _, _, p2) = keys();
        let out = shared_encrypt(b"hello", &k1, &p2, &[0u8; 32], &mut CountingRng(0xa0));
        assert_eq!(
            hex::encode(&out),
            "a0a1a2a3a4a5a6a7a8a9aaabacadaeaf0abdb5e409a7672dcb0cf1e7c4dcca61"
        );
    }

    #[test]
    fn test_shared_roundtrip_both_directions() {
        let (k1, p1, k2, p2) = keys();
        let nonce = counting_nonce();
        let out = shared_encrypt(b"attack at dawn", &k1, &p2, &nonce, &mut rand::thread_rng());
        assert_eq!(shared_decrypt(&out, &k2, &p1, &nonce).unwrap(), b"attack at dawn");
        assert_eq!(shared_decrypt(&out, &k1, &p2, &nonce).unwrap(), b"attack at dawn");
    }

    #[test]
    fn test_empty_plaintext_is_one_block() {
        let out = encrypt(b"", &[7u8; 32], &[0u8; 32], &mut CountingRng(0));
        assert_eq!(out.len(), 32);
        assert!(decrypt(&out, &[7u8; 32], &[0u8; 32]).unwrap().is_empty());
    }

    #[test]
    fn test_decrypt_rejects_bad_lengths() {
        for len in [0usize, 15, 16, 17, 33, 47] {
            assert!(
                matches!(
                    decrypt(&vec![0u8; len], &[1u8; 32], &[0u8; 32]),
                    Err(MessageError::InvalidArgument(_))
                ),
                "len {len}"
            );
        }
    }

    #[test]
    fn test_decrypt_wrong_nonce_fails_or_differs() {
        let out = encrypt(b"secret payload", &[9u8; 32], &[0u8; 32], &mut CountingRng(3));
        match decrypt(&out, &[9u8; 32], &[1u8; 32]) {
            Err(MessageError::CipherFailure(_)) => {}
            Ok(plaintext) => assert_ne!(plaintext, b"secret payload"),
            Err(other) => panic!("unexpected error {other:?}"),
        }
    }
}
