//! Action submission against nullable signer and gateway.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use ballot_actions::{ActionError, ActionSubmitter, RefreshHook, ViewRefresher};
use ballot_clarity::ClarityValue;
use ballot_gateway::{GatewayError, SubmissionOutcome, TxReceipt};
use ballot_nullables::{sample_proposal, NullGateway, NullSigner};
use ballot_sync::{ProposalReadModel, ProposalView, SyncConfig};
use ballot_types::{ContractId, ProposalId};

#[derive(Default)]
struct CountingHook {
    calls: AtomicUsize,
}

#[async_trait]
impl RefreshHook for CountingHook {
    async fn on_finished(&self, _receipt: &TxReceipt) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

fn submitter(hook: Arc<CountingHook>) -> ActionSubmitter<NullSigner> {
    ActionSubmitter::new(NullSigner::new(), ContractId::default_voting()).with_hook(hook)
}

#[tokio::test]
async fn create_proposal_encodes_two_utf8_strings() {
    let hook = Arc::new(CountingHook::default());
    let actions = submitter(hook.clone());
    actions.signer().enqueue_finished("0xaa");

    let outcome = actions.create_proposal("Fund docs", "Pay the writers").await.unwrap();
    assert!(outcome.is_finished());

    let calls = actions.signer().submitted();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].function, "create-proposal");
    assert_eq!(calls[0].contract, ContractId::default_voting());
    assert_eq!(
        calls[0].args,
        vec![
            ClarityValue::StringUtf8("Fund docs".into()),
            ClarityValue::StringUtf8("Pay the writers".into()),
        ]
    );
    assert_eq!(hook.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn vote_and_end_voting_encode_ids() {
    let hook = Arc::new(CountingHook::default());
    let actions = submitter(hook.clone());
    let id = ProposalId::new(7).unwrap();

    actions.vote(id, false).await.unwrap();
    actions.end_voting(id).await.unwrap();

    let calls = actions.signer().submitted();
    assert_eq!(calls[0].function, "vote");
    assert_eq!(
        calls[0].args,
        vec![ClarityValue::UInt(7), ClarityValue::Bool(false)]
    );
    assert_eq!(calls[1].function, "end-voting");
    assert_eq!(calls[1].args, vec![ClarityValue::UInt(7)]);
    assert_eq!(hook.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_fields_are_not_checked_here() {
    let actions = submitter(Arc::new(CountingHook::default()));
    let outcome = actions.create_proposal("", "").await.unwrap();
    assert!(outcome.is_finished());
    assert_eq!(actions.signer().submitted().len(), 1);
}

#[tokio::test]
async fn cancel_does_not_refresh() {
    let hook = Arc::new(CountingHook::default());
    let actions = submitter(hook.clone());
    actions.signer().enqueue_cancelled();

    let outcome = actions.vote(ProposalId::new(1).unwrap(), true).await.unwrap();
    assert_eq!(outcome, SubmissionOutcome::Cancelled);
    assert_eq!(hook.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wallet_failure_is_distinct_from_cancel() {
    let hook = Arc::new(CountingHook::default());
    let actions = submitter(hook.clone());
    actions
        .signer()
        .enqueue_error(GatewayError::Wallet("locked".into()));

    let err = actions.end_voting(ProposalId::new(1).unwrap()).await.unwrap_err();
    assert_eq!(err, ActionError::Submission(GatewayError::Wallet("locked".into())));
    assert_eq!(hook.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn finished_submission_refreshes_view() {
    let gw = Arc::new(NullGateway::with_proposals(1));
    let model = Arc::new(ProposalReadModel::new(gw.clone(), SyncConfig::default()));
    let view = Arc::new(ProposalView::default());
    view.refresh(&model).await;
    assert_eq!(view.snapshot().proposals.len(), 1);

    let actions = ActionSubmitter::new(NullSigner::new(), ContractId::default_voting())
        .with_hook(Arc::new(ViewRefresher::new(model, view.clone())));

    // The contract picks up the new proposal by the time the hook runs.
    gw.set_proposal(sample_proposal(2));
    actions.create_proposal("Second", "Another one").await.unwrap();
    assert_eq!(view.snapshot().proposals.len(), 2);
}
