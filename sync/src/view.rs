//! View-facing proposal state.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use ballot_gateway::ContractGateway;
use ballot_types::{Proposal, ProposalId};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{ConflictPolicy, ProposalReadModel, RefreshReport, SyncError};

/// Shown when a refresh fails as a whole.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load proposals";

/// What the view renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub proposals: Vec<Proposal>,
    /// Some refresh is still running.
    pub loading: bool,
    pub error: Option<String>,
    /// Ids omitted from the last applied refresh.
    pub omitted: Vec<ProposalId>,
    /// Ticket of the refresh currently shown; zero before the first.
    pub applied: u64,
}

/// Handed out when a refresh starts; presented again when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Proposal list state shared with the view layer over a `watch` channel.
pub struct ProposalView {
    state: watch::Sender<ViewState>,
    policy: ConflictPolicy,
    issued: AtomicU64,
    pending: AtomicUsize,
}

impl ProposalView {
    pub fn new(policy: ConflictPolicy) -> Self {
        let (state, _) = watch::channel(ViewState::default());
        Self {
            state,
            policy,
            issued: AtomicU64::new(0),
            pending: AtomicUsize::new(0),
        }
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Mark a refresh as started.
    pub fn begin(&self) -> RefreshTicket {
        let seq = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.pending.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|s| s.loading = true);
        RefreshTicket(seq)
    }

    /// Publish the outcome of the refresh holding `ticket`.
    ///
    /// Returns whether the view changed. Under [`ConflictPolicy::LatestIssued`]
    /// a result whose ticket is older than the newest issued one is dropped.
    pub fn apply(&self, ticket: RefreshTicket, result: Result<RefreshReport, SyncError>) -> bool {
        let still_pending = self
            .pending
            .fetch_sub(1, Ordering::SeqCst)
            .saturating_sub(1);
        let latest = self.issued.load(Ordering::SeqCst);
        let policy = self.policy;

        self.state.send_if_modified(|s| {
            let was_loading = s.loading;
            s.loading = still_pending > 0;

            if policy == ConflictPolicy::LatestIssued && ticket.0 < latest {
                debug!(ticket = ticket.0, latest, "discarding superseded refresh");
                return was_loading != s.loading;
            }

            match result {
                Ok(report) => {
                    s.omitted = report.failed_ids();
                    s.proposals = report.proposals;
                    s.error = None;
                }
                Err(e) => {
                    warn!("{LOAD_FAILED_MESSAGE}: {e}");
                    s.error = Some(LOAD_FAILED_MESSAGE.to_string());
                }
            }
            s.applied = ticket.0;
            true
        })
    }

    /// Run one refresh against `model` and publish it.
    pub async fn refresh<G: ContractGateway>(&self, model: &ProposalReadModel<G>) -> bool {
        let ticket = self.begin();
        let result = model.fetch_all().await;
        self.apply(ticket, result)
    }

    /// Drop everything shown, e.g. after sign-out.
    ///
    /// Refreshes still running were issued for the old state and will be
    /// discarded under [`ConflictPolicy::LatestIssued`].
    pub fn reset(&self) {
        self.issued.fetch_add(1, Ordering::SeqCst);
        let loading = self.pending.load(Ordering::SeqCst) > 0;
        self.state.send_replace(ViewState {
            loading,
            ..ViewState::default()
        });
    }
}

impl Default for ProposalView {
    fn default() -> Self {
        Self::new(ConflictPolicy::default())
    }
}
