//! Builds and submits the three state-changing contract calls.

use std::sync::Arc;

use ballot_clarity::ClarityValue;
use ballot_gateway::{functions, ContractCall, SubmissionOutcome, TransactionSigner};
use ballot_types::{ContractId, ProposalId};
use tracing::{error, info};

use crate::{ActionError, NoRefresh, RefreshHook};

/// Submits governance actions through the wallet.
///
/// No client-side checks are made: an empty title, a vote on a closed
/// proposal or a second vote all go to the wallet and the contract rejects
/// them on chain.
pub struct ActionSubmitter<S> {
    signer: S,
    contract: ContractId,
    hook: Arc<dyn RefreshHook>,
}

impl<S: TransactionSigner> ActionSubmitter<S> {
    pub fn new(signer: S, contract: ContractId) -> Self {
        Self {
            signer,
            contract,
            hook: Arc::new(NoRefresh),
        }
    }

    /// Run `hook` after every finished submission.
    pub fn with_hook(mut self, hook: Arc<dyn RefreshHook>) -> Self {
        self.hook = hook;
        self
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    pub fn contract(&self) -> &ContractId {
        &self.contract
    }

    /// `create-proposal (title string-utf8) (description string-utf8)`.
    pub async fn create_proposal(
        &self,
        title: &str,
        description: &str,
    ) -> Result<SubmissionOutcome, ActionError> {
        self.submit(
            functions::CREATE_PROPOSAL,
            vec![
                ClarityValue::string_utf8(title),
                ClarityValue::string_utf8(description),
            ],
        )
        .await
    }

    /// `vote (proposal-id uint) (vote-for bool)`.
    pub async fn vote(
        &self,
        id: ProposalId,
        in_favor: bool,
    ) -> Result<SubmissionOutcome, ActionError> {
        self.submit(
            functions::VOTE,
            vec![ClarityValue::uint(id.get()), ClarityValue::Bool(in_favor)],
        )
        .await
    }

    /// `end-voting (proposal-id uint)`.
    pub async fn end_voting(&self, id: ProposalId) -> Result<SubmissionOutcome, ActionError> {
        self.submit(functions::END_VOTING, vec![ClarityValue::uint(id.get())])
            .await
    }

    async fn submit(
        &self,
        function: &str,
        args: Vec<ClarityValue>,
    ) -> Result<SubmissionOutcome, ActionError> {
        let call = ContractCall::new(self.contract.clone(), function, args);
        match self.signer.submit(call).await {
            Ok(SubmissionOutcome::Finished(receipt)) => {
                info!(function, txid = %receipt.txid, "transaction submitted");
                self.hook.on_finished(&receipt).await;
                Ok(SubmissionOutcome::Finished(receipt))
            }
            Ok(SubmissionOutcome::Cancelled) => {
                info!(function, "transaction cancelled");
                Ok(SubmissionOutcome::Cancelled)
            }
            Err(e) => {
                error!(function, "transaction submission failed: {e}");
                Err(ActionError::Submission(e))
            }
        }
    }
}
