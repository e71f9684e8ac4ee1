//! Governance actions: create a proposal, vote, end voting.
//!
//! Each action becomes one contract call handed to a [`TransactionSigner`].
//! When the wallet reports the transaction as broadcast, a [`RefreshHook`]
//! runs so the view can reload. Eligibility (open window, one vote per
//! address) is enforced by the contract, not here.
//!
//! [`TransactionSigner`]: ballot_gateway::TransactionSigner

pub mod error;
pub mod hook;
pub mod submitter;

pub use error::ActionError;
pub use hook::{NoRefresh, RefreshHook, ViewRefresher};
pub use submitter::ActionSubmitter;
