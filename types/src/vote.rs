//! Per-voter vote records and aggregate voting results.

use serde::{Deserialize, Serialize};

use crate::{ProposalStatus, Tally, Timestamp};

/// A single voter's ballot on one proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    /// `true` for a vote in favour.
    pub vote: bool,
    pub timestamp: Timestamp,
}

/// Aggregate results as reported by the contract's `get-voting-results`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingResults {
    pub votes_for: u64,
    pub votes_against: u64,
    /// The contract's own total, which may count abstentions or weights.
    pub total_votes: u64,
    pub status: ProposalStatus,
}

impl VotingResults {
    pub fn tally(&self) -> Tally {
        Tally::new(self.votes_for, self.votes_against)
    }
}
