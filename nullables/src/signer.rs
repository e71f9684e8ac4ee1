//! Nullable transaction signer: scripted outcomes, recorded submissions.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use ballot_gateway::{ContractCall, GatewayError, SubmissionOutcome, TransactionSigner, TxReceipt};

#[derive(Default)]
struct State {
    outcomes: VecDeque<Result<SubmissionOutcome, GatewayError>>,
    submitted: Vec<ContractCall>,
}

/// A test signer that records calls instead of broadcasting them.
///
/// Unscripted submissions finish with a txid derived from their position.
#[derive(Default)]
pub struct NullSigner {
    state: Mutex<State>,
}

impl NullSigner {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// The next submission is approved and broadcast as `txid`.
    pub fn enqueue_finished(&self, txid: &str) {
        self.state()
            .outcomes
            .push_back(Ok(SubmissionOutcome::Finished(receipt(txid))));
    }

    /// The user dismisses the next prompt.
    pub fn enqueue_cancelled(&self) {
        self.state().outcomes.push_back(Ok(SubmissionOutcome::Cancelled));
    }

    /// The wallet fails on the next submission.
    pub fn enqueue_error(&self, error: GatewayError) {
        self.state().outcomes.push_back(Err(error));
    }

    /// All calls submitted so far (for assertions).
    pub fn submitted(&self) -> Vec<ContractCall> {
        self.state().submitted.clone()
    }
}

fn receipt(txid: &str) -> TxReceipt {
    TxReceipt {
        txid: txid.to_string(),
        extra: Default::default(),
    }
}

#[async_trait]
impl TransactionSigner for NullSigner {
    async fn submit(&self, call: ContractCall) -> Result<SubmissionOutcome, GatewayError> {
        let mut state = self.state();
        state.submitted.push(call);
        let n = state.submitted.len();
        state
            .outcomes
            .pop_front()
            .unwrap_or_else(|| Ok(SubmissionOutcome::Finished(receipt(&format!("0x{n:064x}")))))
    }
}
