//! Transaction signing.

use uzc_crypto_core::{PrivateKey, PublicKey, Signature};

use crate::error::{CryptoError, Result};

/// Offset of the 64-byte signature in a serialized transaction.
pub const SIGNATURE_OFFSET: usize = 96;

/// Length of the signature field.
pub const SIGNATURE_LEN: usize = 64;

/// Shortest buffer that can hold a signature.
pub const MIN_TRANSACTION_LEN: usize = SIGNATURE_OFFSET + SIGNATURE_LEN;

/// Sign `unsigned` and return a copy with the signature written at
/// [`SIGNATURE_OFFSET`].
pub fn sign_transaction(key: &PrivateKey, unsigned: &[u8]) -> Result<Vec<u8>> {
    if unsigned.len() < MIN_TRANSACTION_LEN {
        return Err(CryptoError::InvalidArgument(format!(
            "transaction of {} bytes is shorter than {MIN_TRANSACTION_LEN}",
            unsigned.len()
        )));
    }
    let signature = key.sign(unsigned);
    let mut signed = unsigned.to_vec();
    signed[SIGNATURE_OFFSET..MIN_TRANSACTION_LEN].copy_from_slice(signature.as_bytes());
    Ok(signed)
}

/// Check a signed transaction against its sender's key.
///
/// The signature covers the transaction with a zeroed signature field.
pub fn verify_transaction(public_key: &PublicKey, signed: &[u8], enforce_canonical: bool) -> bool {
    let Some(field) = signed.get(SIGNATURE_OFFSET..MIN_TRANSACTION_LEN) else {
        return false;
    };
    let mut bytes = [0u8; SIGNATURE_LEN];
    bytes.copy_from_slice(field);
    let mut unsigned = signed.to_vec();
    unsigned[SIGNATURE_OFFSET..MIN_TRANSACTION_LEN].fill(0);
    public_key.verify(&unsigned, &Signature::from_bytes(bytes), enforce_canonical)
}
