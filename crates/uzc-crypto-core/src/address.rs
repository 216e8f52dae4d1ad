//! Account addresses.
//!
//! An [`Address`] is an [`AccountId`] together with its Reed-Solomon text
//! form. The text form is stored without prefix; the prefix is supplied when
//! rendering or parsing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::curve::PublicKey;
use crate::error::{CoreError, Result};
use crate::reed_solomon;
use crate::types::AccountId;

/// Address prefix used on the main network.
pub const DEFAULT_PREFIX: &str = "UZC";

/// A checksummed account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(AccountId);

impl Address {
    /// Address of an account id.
    pub const fn from_account_id(id: AccountId) -> Self {
        Self(id)
    }

    /// Address of a public key.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Self(AccountId::from_public_key(public_key))
    }

    /// The account id.
    pub const fn account_id(&self) -> AccountId {
        self.0
    }

    /// Reed-Solomon text without prefix, e.g. `WEBR-T74Q-HQJY-8PUK4`.
    pub fn rs(&self) -> String {
        reed_solomon::encode(self.0.get())
    }

    /// Reed-Solomon text with `prefix` prepended, e.g. `UZC-WEBR-T74Q-HQJY-8PUK4`.
    ///
    /// An empty prefix yields the bare text.
    pub fn full_address(&self, prefix: &str) -> String {
        if prefix.is_empty() {
            self.rs()
        } else {
            format!("{}-{}", prefix, self.rs())
        }
    }

    /// Parse Reed-Solomon text, stripping an optional `prefix-` (any case).
    pub fn parse_rs(text: &str, prefix: &str) -> Result<Self> {
        let text = text.trim();
        let body = strip_prefix(text, prefix).unwrap_or(text);
        reed_solomon::decode(body).map(|id| Self(AccountId::new(id)))
    }

    /// Parse either an unsigned decimal id or Reed-Solomon text.
    pub fn parse(text: &str, prefix: &str) -> Result<Self> {
        let text = text.trim();
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            return text.parse::<AccountId>().map(Self).map_err(|e| match e {
                CoreError::InvalidArgument(msg) => CoreError::DecodeFailure(msg),
                other => other,
            });
        }
        Self::parse_rs(text, prefix)
    }
}

fn strip_prefix<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    let head = text.get(..prefix.len())?;
    let rest = text.get(prefix.len()..)?;
    if head.eq_ignore_ascii_case(prefix) {
        rest.strip_prefix('-')
    } else {
        None
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({}, {})", self.rs(), self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_address(DEFAULT_PREFIX))
    }
}

impl From<AccountId> for Address {
    fn from(id: AccountId) -> Self {
        Self(id)
    }
}

impl From<Address> for AccountId {
    fn from(address: Address) -> Self {
        address.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address() {
        let address = Address::from_account_id(AccountId::new(7009665667967103287));
        assert_eq!(address.rs(), "WEBR-T74Q-HQJY-8PUK4");
        assert_eq!(address.full_address("UZC"), "UZC-WEBR-T74Q-HQJY-8PUK4");
        assert_eq!(address.full_address(""), "WEBR-T74Q-HQJY-8PUK4");
        assert_eq!(address.to_string(), "UZC-WEBR-T74Q-HQJY-8PUK4");
    }

    #[test]
    fn test_parse_rs_with_and_without_prefix() {
        let expected = AccountId::new(7009665667967103287);
        for text in [
            "UZC-WEBR-T74Q-HQJY-8PUK4",
            "uzc-webr-t74q-hqjy-8puk4",
            "WEBR-T74Q-HQJY-8PUK4",
            "  WEBR-T74Q-HQJY-8PUK4 ",
        ] {
            assert_eq!(
                Address::parse_rs(text, DEFAULT_PREFIX).unwrap().account_id(),
                expected,
                "{text}"
            );
        }
    }

    #[test]
    fn test_parse_rs_foreign_prefix_fails() {
        assert!(matches!(
            Address::parse_rs("BURST-WEBR-T74Q-HQJY-8PUK4", DEFAULT_PREFIX),
            Err(CoreError::DecodeFailure(_))
        ));
        assert!(Address::parse_rs("BURST-WEBR-T74Q-HQJY-8PUK4", "BURST").is_ok());
    }

    #[test]
    fn test_parse_either() {
        let numeric = Address::parse("7009665667967103287", DEFAULT_PREFIX).unwrap();
        let rs = Address::parse("UZC-WEBR-T74Q-HQJY-8PUK4", DEFAULT_PREFIX).unwrap();
        assert_eq!(numeric, rs);
        assert!(matches!(
            Address::parse("18446744073709551616", DEFAULT_PREFIX),
            Err(CoreError::DecodeFailure(_))
        ));
        assert!(Address::parse("not an address", DEFAULT_PREFIX).is_err());
    }

    #[test]
    fn test_from_public_key() {
        let pk = PublicKey::from_hex(
            "4019f2295015a5de2e55f5064efff8859f6098dcc5e1e67db1b4ce0405ca521a",
        )
        .unwrap();
        let address = Address::from_public_key(&pk);
        assert_eq!(address.account_id().get(), 16617675343370890531);
        assert_eq!(address.rs(), "9DB5-PSX8-UELT-GRG9F");
    }
}
