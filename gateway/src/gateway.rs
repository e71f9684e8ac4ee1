//! The two seams every backend implements.

use std::sync::Arc;

use async_trait::async_trait;
use ballot_clarity::ClarityValue;
use ballot_types::ContractId;

use crate::{ContractCall, GatewayError, SubmissionOutcome};

/// Read-only access to a single contract. No signature or fee involved.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    /// The contract every call is addressed to.
    fn contract(&self) -> &ContractId;

    /// Call a read-only function and return its raw Clarity result.
    async fn call_read_only(
        &self,
        function: &str,
        args: &[ClarityValue],
    ) -> Result<ClarityValue, GatewayError>;
}

#[async_trait]
impl<T: ContractGateway + ?Sized> ContractGateway for Arc<T> {
    fn contract(&self) -> &ContractId {
        (**self).contract()
    }

    async fn call_read_only(
        &self,
        function: &str,
        args: &[ClarityValue],
    ) -> Result<ClarityValue, GatewayError> {
        (**self).call_read_only(function, args).await
    }
}

/// Hands a contract call to the user's wallet for signing and broadcast.
///
/// Resolves when the user either approves (`Finished`) or dismisses
/// (`Cancelled`) the prompt; an `Err` means the wallet itself failed.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn submit(&self, call: ContractCall) -> Result<SubmissionOutcome, GatewayError>;
}

#[async_trait]
impl<T: TransactionSigner + ?Sized> TransactionSigner for Arc<T> {
    async fn submit(&self, call: ContractCall) -> Result<SubmissionOutcome, GatewayError> {
        (**self).submit(call).await
    }
}
