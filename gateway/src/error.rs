//! Gateway error types.

use ballot_clarity::ClarityError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("node returned HTTP {0}")]
    Http(u16),

    #[error("contract call rejected: {0}")]
    Rejected(String),

    #[error("decode error: {0}")]
    Decode(#[from] ClarityError),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("wallet error: {0}")]
    Wallet(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GatewayError {
    /// Whether the contract answered but had nothing for the request.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
