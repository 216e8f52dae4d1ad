//! Proptest generators for property-based testing.

use proptest::prelude::*;

use uzc_crypto::{AccountId, GenerationSignature, PocVersion, PrivateKey, Scoop, Signature};

/// Generate a passphrase.
pub fn passphrase() -> impl Strategy<Value = String> {
    "[a-z ]{1,40}".prop_map(String::from)
}

/// Generate a private key from a passphrase.
pub fn private_key() -> impl Strategy<Value = PrivateKey> {
    passphrase().prop_map(|p| PrivateKey::from_passphrase(&p))
}

/// Generate a private key from raw bytes.
pub fn private_key_bytes() -> impl Strategy<Value = PrivateKey> {
    any::<[u8; 32]>().prop_map(PrivateKey::from_bytes)
}

/// Generate an account id.
pub fn account_id() -> impl Strategy<Value = AccountId> {
    any::<u64>().prop_map(AccountId::new)
}

/// Generate an arbitrary 64-byte signature.
pub fn signature() -> impl Strategy<Value = Signature> {
    (any::<[u8; 32]>(), any::<[u8; 32]>()).prop_map(|(v, h)| {
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&v);
        bytes[32..].copy_from_slice(&h);
        Signature::from_bytes(bytes)
    })
}

/// Generate a generation signature.
pub fn generation_signature() -> impl Strategy<Value = GenerationSignature> {
    any::<[u8; 32]>().prop_map(GenerationSignature::from_bytes)
}

/// Generate a scoop index.
pub fn scoop() -> impl Strategy<Value = Scoop> {
    (0u32..4096).prop_map(Scoop::wrapping)
}

/// Generate a PoC version.
pub fn poc_version() -> impl Strategy<Value = PocVersion> {
    prop_oneof![Just(PocVersion::V1), Just(PocVersion::V2)]
}

/// Generate message bytes of specified max length.
pub fn message(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Parameters for one encrypted exchange between two accounts.
#[derive(Debug, Clone)]
pub struct ExchangeParams {
    pub sender: String,
    pub recipient: String,
    pub plaintext: Vec<u8>,
    pub nonce: [u8; 32],
    pub is_text: bool,
}

impl Arbitrary for ExchangeParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            passphrase(),
            passphrase(),
            message(1000),
            any::<[u8; 32]>(),
            any::<bool>(),
        )
            .prop_map(|(sender, recipient, plaintext, nonce, is_text)| ExchangeParams {
                sender,
                recipient,
                plaintext,
                nonce,
                is_text,
            })
            .boxed()
    }
}
