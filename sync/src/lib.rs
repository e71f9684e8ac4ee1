//! Proposal read-model.
//!
//! Synchronizes the local proposal list from the contract by querying the
//! proposal count `N` and then fetching ids `1..=N`, and publishes the result
//! to the view layer.
//!
//! - [`ProposalReadModel`]: one refresh, reported per id
//! - [`ProposalView`]: view state with overlapping-refresh reconciliation
//! - [`ProposalContext`]: everything one proposal's render needs

pub mod config;
pub mod context;
pub mod error;
pub mod model;
pub mod report;
pub mod stats;
pub mod view;

pub use config::{ConflictPolicy, FailurePolicy, SyncConfig};
pub use context::ProposalContext;
pub use error::SyncError;
pub use model::ProposalReadModel;
pub use report::RefreshReport;
pub use stats::SyncStats;
pub use view::{ProposalView, RefreshTicket, ViewState, LOAD_FAILED_MESSAGE};
