//! Governance proposals as reconstructed from contract queries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Principal, Tally, Timestamp, TypesError};

/// Contract-assigned proposal identifier. Ids start at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ProposalId(u64);

impl ProposalId {
    pub fn new(id: u64) -> Result<Self, TypesError> {
        if id == 0 {
            return Err(TypesError::ZeroProposalId);
        }
        Ok(Self(id))
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Every id the contract has assigned when it reports `count` proposals.
    pub fn range(count: u64) -> impl Iterator<Item = ProposalId> {
        (1..=count).map(ProposalId)
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProposalId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim_start_matches('#')
            .parse::<u64>()
            .map_err(|_| TypesError::InvalidProposalId(s.to_string()))?;
        Self::new(raw)
    }
}

impl TryFrom<u64> for ProposalId {
    type Error = TypesError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<ProposalId> for u64 {
    fn from(id: ProposalId) -> Self {
        id.0
    }
}

/// Lifecycle status reported by the contract.
///
/// Transitions are owned by the contract: `Active` moves to `Passed` or
/// `Rejected` exactly once and never back.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProposalStatus {
    Active,
    Passed,
    Rejected,
    /// A status string this client does not know about, kept verbatim.
    Unrecognized(String),
}

impl ProposalStatus {
    pub fn from_contract(raw: &str) -> Self {
        match raw {
            "active" => Self::Active,
            "passed" => Self::Passed,
            "rejected" => Self::Rejected,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Passed => "passed",
            Self::Rejected => "rejected",
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Whether voting has concluded with a decision.
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Passed | Self::Rejected)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ProposalStatus {
    fn from(s: String) -> Self {
        Self::from_contract(&s)
    }
}

impl From<ProposalStatus> for String {
    fn from(s: ProposalStatus) -> Self {
        s.as_str().to_string()
    }
}

/// A governance proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub proposal_id: ProposalId,
    pub title: String,
    pub description: String,
    /// Who created it.
    pub proposer: Principal,
    pub votes_for: u64,
    pub votes_against: u64,
    pub created_at: Timestamp,
    /// End of the voting window.
    pub end_time: Timestamp,
    pub executed: bool,
    /// Participation threshold, enforced by the contract.
    pub quorum: u64,
    pub status: ProposalStatus,
}

impl Proposal {
    pub fn tally(&self) -> Tally {
        Tally::new(self.votes_for, self.votes_against)
    }

    pub fn total_votes(&self) -> u64 {
        self.tally().total()
    }
}

/// User input for a new proposal, validated by the view layer before submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProposalDraft {
    pub title: String,
    pub description: String,
}

impl ProposalDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Both fields must contain something other than whitespace.
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.title.trim().is_empty() {
            return Err(TypesError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(TypesError::EmptyDescription);
        }
        Ok(())
    }

    /// Reset after a successful submission.
    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
    }
}
