use ballot_gateway::GatewayError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The wallet failed. A user cancelling is not an error.
    #[error("transaction submission failed: {0}")]
    Submission(#[from] GatewayError),
}
