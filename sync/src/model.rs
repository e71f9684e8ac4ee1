//! Count-then-fetch synchronization of the proposal list.

use std::pin::pin;
use std::sync::Arc;
use std::time::Instant;

use ballot_gateway::{ContractGateway, GatewayError, VotingContract};
use ballot_types::{Principal, Proposal, ProposalId};
use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::stats;
use crate::{FailurePolicy, ProposalContext, RefreshReport, SyncConfig, SyncError, SyncStats};

/// Builds the local proposal list from contract queries.
///
/// Holds no proposal state itself: each refresh produces a fresh
/// [`RefreshReport`] and the caller decides where it goes.
pub struct ProposalReadModel<G> {
    contract: VotingContract<G>,
    config: SyncConfig,
    stats: Arc<SyncStats>,
}

impl<G: ContractGateway> ProposalReadModel<G> {
    pub fn new(gateway: G, config: SyncConfig) -> Self {
        Self {
            contract: VotingContract::new(gateway),
            config,
            stats: Arc::new(SyncStats::new()),
        }
    }

    pub fn contract(&self) -> &VotingContract<G> {
        &self.contract
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn stats(&self) -> Arc<SyncStats> {
        self.stats.clone()
    }

    /// Fetch one proposal, retrying up to `retries` extra times.
    ///
    /// A proposal the contract reports as missing is not retried.
    async fn fetch_one(&self, id: ProposalId) -> Result<Proposal, GatewayError> {
        let mut attempt = 0;
        loop {
            match self.contract.proposal(id).await {
                Ok(p) => return Ok(p),
                Err(e) if attempt < self.config.retries && !e.is_not_found() => {
                    attempt += 1;
                    self.stats.increment(stats::RETRIES);
                    debug!(%id, attempt, "retrying proposal fetch: {e}");
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Query the count `N` and fetch proposals `1..=N`.
    ///
    /// Exactly one query is issued per id and none beyond `N`. Results come
    /// back in ascending id order whatever the concurrency.
    pub async fn fetch_all(&self) -> Result<RefreshReport, SyncError> {
        let started = Instant::now();
        self.stats.increment(stats::REFRESHES);

        let mut report = RefreshReport::default();
        match self.contract.proposal_count().await {
            Ok(count) => report.count = count,
            Err(e) => match self.config.failure_policy {
                FailurePolicy::FailFast => {
                    self.stats.increment(stats::FETCH_FAILURES);
                    return Err(SyncError::Count(e));
                }
                FailurePolicy::Omit => {
                    warn!("proposal count query failed, showing no proposals: {e}");
                    self.stats.increment(stats::FETCH_FAILURES);
                    report.count_error = Some(e);
                }
            },
        }

        let concurrency = self.config.max_concurrency.max(1);
        let mut results = pin!(stream::iter(ProposalId::range(report.count))
            .map(|id| async move { (id, self.fetch_one(id).await) })
            .buffered(concurrency));

        while let Some((id, result)) = results.next().await {
            match result {
                Ok(p) => {
                    self.stats.increment(stats::PROPOSALS_FETCHED);
                    report.proposals.push(p);
                }
                Err(e) => {
                    self.stats.increment(stats::FETCH_FAILURES);
                    if self.config.failure_policy == FailurePolicy::FailFast {
                        return Err(SyncError::Proposal { id, source: e });
                    }
                    warn!(%id, "omitting proposal: {e}");
                    report.failures.push((id, e));
                }
            }
        }

        info!(
            count = report.count,
            fetched = report.proposals.len(),
            failed = report.failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "proposals refreshed"
        );
        Ok(report)
    }

    /// Load one proposal together with its activity flag and `voter`'s ballot.
    ///
    /// The activity flag is queried exactly once and reads `false` on failure.
    pub async fn context(
        &self,
        id: ProposalId,
        voter: Option<&Principal>,
    ) -> Result<ProposalContext, GatewayError> {
        let user_vote = async {
            match voter {
                Some(v) => self.contract.user_vote(v, id).await,
                None => None,
            }
        };
        let (proposal, voting_active, user_vote) = tokio::join!(
            self.fetch_one(id),
            self.contract.is_voting_active(id),
            user_vote
        );
        Ok(ProposalContext {
            proposal: proposal?,
            voting_active,
            user_vote,
        })
    }
}
