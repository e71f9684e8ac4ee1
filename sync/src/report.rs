//! Outcome of one refresh.

use ballot_gateway::GatewayError;
use ballot_types::{Proposal, ProposalId};

/// Per-item result of a refresh.
///
/// `proposals` is in ascending id order and holds only the ids that could be
/// fetched. Every id in `1..=count` is either in `proposals` or in `failures`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// Proposal count as reported by the contract (zero if that query failed).
    pub count: u64,
    pub proposals: Vec<Proposal>,
    pub failures: Vec<(ProposalId, GatewayError)>,
    /// Set when the count query itself failed and was read as zero.
    pub count_error: Option<GatewayError>,
}

impl RefreshReport {
    /// Whether every query succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.count_error.is_none()
    }

    pub fn failed_ids(&self) -> Vec<ProposalId> {
        self.failures.iter().map(|(id, _)| *id).collect()
    }
}
