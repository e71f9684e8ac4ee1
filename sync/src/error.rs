use ballot_gateway::GatewayError;
use ballot_types::ProposalId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("proposal count query failed: {0}")]
    Count(#[source] GatewayError),

    #[error("fetching proposal #{id} failed: {source}")]
    Proposal {
        id: ProposalId,
        #[source]
        source: GatewayError,
    },
}
