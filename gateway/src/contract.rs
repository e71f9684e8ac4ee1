//! Typed access to the voting contract's read-only functions.

use ballot_clarity::ClarityValue;
use ballot_types::{ContractId, Principal, Proposal, ProposalId, VoteRecord, VotingResults};
use tracing::{debug, warn};

use crate::decode;
use crate::{functions, ContractGateway, GatewayError};

/// The voting contract, queried through any [`ContractGateway`].
#[derive(Clone)]
pub struct VotingContract<G> {
    gateway: G,
}

fn id_arg(id: ProposalId) -> ClarityValue {
    ClarityValue::uint(id.get())
}

impl<G: ContractGateway> VotingContract<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The contract this instance queries.
    pub fn contract_info(&self) -> &ContractId {
        self.gateway.contract()
    }

    /// Number of proposals ever created. Ids run densely from 1 to this value.
    pub async fn proposal_count(&self) -> Result<u64, GatewayError> {
        let raw = self
            .gateway
            .call_read_only(functions::GET_PROPOSAL_COUNT, &[])
            .await?;
        let count = decode::decode_count(raw)?;
        debug!(count, "proposal count");
        Ok(count)
    }

    /// [`Self::proposal_count`], with any failure read as zero proposals.
    pub async fn proposal_count_or_zero(&self) -> u64 {
        match self.proposal_count().await {
            Ok(count) => count,
            Err(e) => {
                warn!("proposal count query failed, assuming none: {e}");
                0
            }
        }
    }

    pub async fn proposal(&self, id: ProposalId) -> Result<Proposal, GatewayError> {
        let raw = self
            .gateway
            .call_read_only(functions::GET_PROPOSAL, &[id_arg(id)])
            .await?;
        decode::decode_proposal(id, raw)
    }

    pub async fn voting_results(&self, id: ProposalId) -> Result<VotingResults, GatewayError> {
        let raw = self
            .gateway
            .call_read_only(functions::GET_VOTING_RESULTS, &[id_arg(id)])
            .await?;
        decode::decode_voting_results(id, raw)
    }

    /// Whether `id` currently accepts votes, surfacing failures.
    pub async fn try_is_voting_active(&self, id: ProposalId) -> Result<bool, GatewayError> {
        let raw = self
            .gateway
            .call_read_only(functions::IS_VOTING_ACTIVE, &[id_arg(id)])
            .await?;
        decode::decode_active(raw)
    }

    /// Whether `id` currently accepts votes. Any failure reads as `false`.
    pub async fn is_voting_active(&self, id: ProposalId) -> bool {
        match self.try_is_voting_active(id).await {
            Ok(active) => active,
            Err(e) => {
                debug!(%id, "activity check failed, treating as inactive: {e}");
                false
            }
        }
    }

    /// The vote `voter` cast on `id`, if any. A failed lookup reads as no vote.
    pub async fn user_vote(&self, voter: &Principal, id: ProposalId) -> Option<VoteRecord> {
        let voter_arg = match ClarityValue::principal(voter) {
            Ok(v) => v,
            Err(e) => {
                warn!(%voter, "cannot encode voter address: {e}");
                return None;
            }
        };
        let result = self
            .gateway
            .call_read_only(functions::GET_VOTE, &[voter_arg, id_arg(id)])
            .await
            .and_then(decode::decode_vote_record);
        match result {
            Ok(record) => Some(record),
            Err(e) if e.is_not_found() => None,
            Err(e) => {
                debug!(%id, "vote lookup failed: {e}");
                None
            }
        }
    }
}
