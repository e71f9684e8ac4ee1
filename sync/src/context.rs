//! Everything needed to render a single proposal.

use ballot_types::{Proposal, Timestamp, VoteRecord};

/// A proposal with the per-render facts queried alongside it.
///
/// `voting_active` is a snapshot taken once when the context is built and is
/// not kept in sync afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalContext {
    pub proposal: Proposal,
    pub voting_active: bool,
    /// The connected user's ballot, if they have voted.
    pub user_vote: Option<VoteRecord>,
}

impl ProposalContext {
    pub fn has_voted(&self) -> bool {
        self.user_vote.is_some()
    }

    /// Whether a vote or end-voting action is worth offering.
    ///
    /// Advisory only: the contract decides.
    pub fn can_vote(&self) -> bool {
        self.voting_active && !self.has_voted()
    }

    /// Seconds of voting left at `now`.
    pub fn time_remaining(&self, now: Timestamp) -> u64 {
        self.proposal.end_time.remaining_from(now)
    }
}
