//! Domain types for the governance client.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! principals, contract identifiers, proposals, vote records, tallies and timestamps.
//! Everything here is a local copy of state owned by the on-chain contract.

pub mod contract;
pub mod error;
pub mod network;
pub mod principal;
pub mod proposal;
pub mod tally;
pub mod time;
pub mod vote;

pub use contract::{ContractId, KnownContract};
pub use error::TypesError;
pub use network::NetworkId;
pub use principal::Principal;
pub use proposal::{Proposal, ProposalDraft, ProposalId, ProposalStatus};
pub use tally::{format_percentage, Tally};
pub use time::Timestamp;
pub use vote::{VoteRecord, VotingResults};
