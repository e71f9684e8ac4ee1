//! Contract identifiers and the deployment registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::principal::{is_valid_contract_name, MAX_CONTRACT_NAME_LEN};
use crate::{Principal, TypesError};

/// A deployed Clarity contract: `ADDRESS.NAME`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContractId {
    pub address: Principal,
    pub name: String,
}

impl ContractId {
    /// Maximum contract name length accepted by the chain.
    pub const MAX_NAME_LEN: usize = MAX_CONTRACT_NAME_LEN;

    /// `address` must be a standard principal.
    pub fn new(address: Principal, name: impl Into<String>) -> Result<Self, TypesError> {
        let name = name.into();
        if address.is_contract() || !is_valid_contract_name(&name) {
            return Err(TypesError::InvalidContractId(format!("{address}.{name}")));
        }
        Ok(Self { address, name })
    }

    /// The default governance contract queried by the client.
    pub fn default_voting() -> Self {
        KnownContract::Votes.contract_id()
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.address, self.name)
    }
}

impl FromStr for ContractId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, name) = s
            .split_once('.')
            .ok_or_else(|| TypesError::InvalidContractId(s.to_string()))?;
        let address =
            Principal::parse(address).map_err(|_| TypesError::InvalidContractId(s.to_string()))?;
        Self::new(address, name)
    }
}

impl TryFrom<String> for ContractId {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ContractId> for String {
    fn from(c: ContractId) -> Self {
        c.to_string()
    }
}

/// The contracts making up the governance deployment.
///
/// Only [`KnownContract::Votes`] is queried; the rest are listed so operators
/// can inspect the deployment from the CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KnownContract {
    Votes,
    VotingToken,
    AccessControl,
    ProposalExecution,
    VoteDelegation,
    VotingStrategy,
    VotingAnalytics,
}

impl KnownContract {
    /// Address every contract in the deployment was published from.
    pub const DEPLOYER: &'static str = "SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B";

    pub const ALL: [KnownContract; 7] = [
        Self::Votes,
        Self::VotingToken,
        Self::AccessControl,
        Self::ProposalExecution,
        Self::VoteDelegation,
        Self::VotingStrategy,
        Self::VotingAnalytics,
    ];

    /// On-chain contract name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Votes => "oluolavotes",
            Self::VotingToken => "voting-token",
            Self::AccessControl => "access-control",
            Self::ProposalExecution => "proposal-execution",
            Self::VoteDelegation => "vote-delegation",
            Self::VotingStrategy => "voting-strategy",
            Self::VotingAnalytics => "voting-analytics",
        }
    }

    pub fn contract_id(&self) -> ContractId {
        ContractId {
            address: Principal(Self::DEPLOYER.to_string()),
            name: self.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_roundtrip() {
        let id: ContractId = "SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B.oluolavotes"
            .parse()
            .unwrap();
        assert_eq!(id.name, "oluolavotes");
        assert_eq!(id.to_string(), "SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B.oluolavotes");
    }

    #[test]
    fn default_voting_contract() {
        let id = ContractId::default_voting();
        assert_eq!(id.address.as_str(), KnownContract::DEPLOYER);
        assert_eq!(id.name, "oluolavotes");
    }

    #[test]
    fn rejects_missing_name() {
        assert!("SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B".parse::<ContractId>().is_err());
        assert!("SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B.".parse::<ContractId>().is_err());
        assert!("SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B.9lives".parse::<ContractId>().is_err());
    }

    #[test]
    fn contract_principal_is_not_an_address() {
        let address = Principal::parse("SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B.votes").unwrap();
        assert!(ContractId::new(address, "other").is_err());
    }

    #[test]
    fn registry_names_are_valid() {
        for contract in KnownContract::ALL {
            let id = contract.contract_id();
            assert!(ContractId::new(id.address.clone(), id.name.clone()).is_ok());
        }
    }
}
