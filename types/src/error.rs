//! Error type for parsing and validating domain values.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("invalid principal: {0}")]
    InvalidPrincipal(String),

    #[error("invalid contract identifier: {0}")]
    InvalidContractId(String),

    #[error("proposal id must be positive")]
    ZeroProposalId,

    #[error("invalid proposal id: {0}")]
    InvalidProposalId(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("proposal title must not be empty")]
    EmptyTitle,

    #[error("proposal description must not be empty")]
    EmptyDescription,
}
