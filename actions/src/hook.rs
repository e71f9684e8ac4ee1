//! What runs after a transaction is broadcast.

use std::sync::Arc;

use async_trait::async_trait;
use ballot_gateway::{ContractGateway, TxReceipt};
use ballot_sync::{ProposalReadModel, ProposalView};

/// Called once per finished submission.
///
/// Broadcast is not confirmation: a refresh right away may not yet see the
/// transaction's effect.
#[async_trait]
pub trait RefreshHook: Send + Sync {
    async fn on_finished(&self, receipt: &TxReceipt);
}

/// Does nothing.
pub struct NoRefresh;

#[async_trait]
impl RefreshHook for NoRefresh {
    async fn on_finished(&self, _receipt: &TxReceipt) {}
}

/// Re-runs the proposal list refresh into a view.
pub struct ViewRefresher<G> {
    model: Arc<ProposalReadModel<G>>,
    view: Arc<ProposalView>,
}

impl<G> ViewRefresher<G> {
    pub fn new(model: Arc<ProposalReadModel<G>>, view: Arc<ProposalView>) -> Self {
        Self { model, view }
    }
}

#[async_trait]
impl<G: ContractGateway> RefreshHook for ViewRefresher<G> {
    async fn on_finished(&self, _receipt: &TxReceipt) {
        self.view.refresh(&self.model).await;
    }
}
