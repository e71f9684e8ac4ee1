//! Principal (account address) type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::TypesError;

/// A Stacks principal: a standard address such as
/// `SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B`, or a contract principal
/// `SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B.votes`.
///
/// Only the textual shape is checked here (prefix, length, c32 alphabet,
/// contract name charset).
/// Checksum verification lives in `ballot-clarity`, which owns the c32check codec.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal(pub(crate) String);

impl Principal {
    /// Every Stacks address starts with this character.
    pub const PREFIX: char = 'S';

    /// c32 alphabet (Crockford base32 without I, L, O, U).
    const ALPHABET: &'static str = "0123456789ABCDEFGHJKMNPQRSTVWXYZ";

    /// Shortest well-formed address: prefix + version + 20-byte hash + checksum.
    const MIN_LEN: usize = 28;
    const MAX_LEN: usize = 41;

    /// Parse and validate a principal string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if !Self::is_well_formed(&s) {
            return Err(TypesError::InvalidPrincipal(s));
        }
        Ok(Self(s))
    }

    fn is_well_formed(s: &str) -> bool {
        let (address, name) = match s.split_once('.') {
            Some((address, name)) => (address, Some(name)),
            None => (s, None),
        };
        address.starts_with(Self::PREFIX)
            && (Self::MIN_LEN..=Self::MAX_LEN).contains(&address.len())
            && address[1..].chars().all(|c| Self::ALPHABET.contains(c))
            && name.map_or(true, is_valid_contract_name)
    }

    /// Return the raw principal string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The standard address part, without any contract name.
    pub fn address(&self) -> &str {
        self.0.split_once('.').map_or(self.0.as_str(), |(address, _)| address)
    }

    /// The contract name, for contract principals.
    pub fn contract_name(&self) -> Option<&str> {
        self.0.split_once('.').map(|(_, name)| name)
    }

    pub fn is_contract(&self) -> bool {
        self.contract_name().is_some()
    }

    /// Whether the address belongs to mainnet (`SP`/`SM`) rather than testnet (`ST`/`SN`).
    pub fn is_mainnet(&self) -> bool {
        matches!(self.0.as_bytes().get(1), Some(b'P') | Some(b'M'))
    }
}

/// Clarity contract names: a leading letter, then letters, digits, `-` or `_`.
pub(crate) fn is_valid_contract_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    name.len() <= MAX_CONTRACT_NAME_LEN
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Maximum contract name length accepted by the chain.
pub(crate) const MAX_CONTRACT_NAME_LEN: usize = 128;

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Principal {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Principal {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Principal> for String {
    fn from(p: Principal) -> Self {
        p.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPLOYER: &str = "SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B";

    #[test]
    fn parses_mainnet_address() {
        let p = Principal::parse(DEPLOYER).unwrap();
        assert_eq!(p.as_str(), DEPLOYER);
        assert!(p.is_mainnet());
    }

    #[test]
    fn testnet_address_is_not_mainnet() {
        let p = Principal::parse("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM").unwrap();
        assert!(!p.is_mainnet());
    }

    #[test]
    fn rejects_wrong_prefix() {
        assert!(Principal::parse("brst_111").is_err());
        assert!(Principal::parse("").is_err());
    }

    #[test]
    fn rejects_letters_outside_alphabet() {
        // 'O' and 'L' are not part of the c32 alphabet.
        assert!(Principal::parse("SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJOL").is_err());
    }

    #[test]
    fn parses_contract_principal() {
        let p = Principal::parse(format!("{DEPLOYER}.votes")).unwrap();
        assert!(p.is_contract());
        assert!(p.is_mainnet());
        assert_eq!(p.address(), DEPLOYER);
        assert_eq!(p.contract_name(), Some("votes"));

        let plain = Principal::parse(DEPLOYER).unwrap();
        assert_eq!(plain.address(), DEPLOYER);
        assert_eq!(plain.contract_name(), None);
    }

    #[test]
    fn rejects_bad_contract_names() {
        assert!(Principal::parse(format!("{DEPLOYER}.")).is_err());
        assert!(Principal::parse(format!("{DEPLOYER}.1votes")).is_err());
        assert!(Principal::parse(format!("{DEPLOYER}.a.b")).is_err());
        assert!(Principal::parse(".votes").is_err());
    }

    #[test]
    fn serde_rejects_malformed_strings() {
        let bad: Result<Principal, _> = serde_json::from_str("\"not-an-address\"");
        assert!(bad.is_err());
        let good: Principal = serde_json::from_str(&format!("\"{DEPLOYER}\"")).unwrap();
        assert_eq!(good.as_str(), DEPLOYER);
    }
}
