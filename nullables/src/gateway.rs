//! Nullable contract gateway: scripted contract state, recorded calls.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use ballot_clarity::ClarityValue;
use ballot_gateway::{functions, ContractGateway, GatewayError};
use ballot_types::{ContractId, Proposal, VoteRecord};
use tokio::sync::Notify;

use crate::fixtures::{proposal_to_clarity, results_to_clarity, sample_proposal};

/// One call as seen by the gateway.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    pub function: String,
    pub args: Vec<ClarityValue>,
}

impl RecordedCall {
    /// The proposal id argument of a per-id query.
    ///
    /// `get-vote` takes `(voter, proposal-id)`; every other query takes the id first.
    pub fn id_arg(&self) -> Option<u64> {
        let index = if self.function == functions::GET_VOTE { 1 } else { 0 };
        self.args.get(index).and_then(|a| a.expect_u64().ok())
    }
}

/// Holds one call open until released.
///
/// The answer is computed when the call arrives, so releasing later returns
/// the contract state as it was at that moment.
#[derive(Clone)]
pub struct CallGate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl CallGate {
    fn new() -> Self {
        Self {
            entered: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    /// Wait until the held call has reached the gateway.
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Let the held call return.
    pub fn release(&self) {
        self.release.notify_one();
    }
}

struct Failure {
    error: GatewayError,
    /// `None` fails forever.
    remaining: Option<u32>,
}

#[derive(Default)]
struct State {
    count: Option<u64>,
    count_error: Option<GatewayError>,
    proposals: HashMap<u64, Proposal>,
    failures: HashMap<u64, Failure>,
    active: HashMap<u64, bool>,
    votes: HashMap<(u64, String), VoteRecord>,
    gates: HashMap<String, VecDeque<CallGate>>,
    calls: Vec<RecordedCall>,
}

/// A test gateway that answers from in-memory contract state.
///
/// Unscripted proposal count defaults to the number of stored proposals.
pub struct NullGateway {
    contract: ContractId,
    state: Mutex<State>,
    latency: Mutex<Option<Duration>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl NullGateway {
    pub fn new() -> Self {
        Self {
            contract: ContractId::default_voting(),
            state: Mutex::new(State::default()),
            latency: Mutex::new(None),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// A gateway holding [`sample_proposal`]s `1..=n`.
    pub fn with_proposals(n: u64) -> Self {
        let gw = Self::new();
        for id in 1..=n {
            gw.set_proposal(sample_proposal(id));
        }
        gw
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn set_proposal(&self, proposal: Proposal) {
        self.state()
            .proposals
            .insert(proposal.proposal_id.get(), proposal);
    }

    /// Override the reported count independently of stored proposals.
    pub fn set_count(&self, count: u64) {
        let mut state = self.state();
        state.count = Some(count);
        state.count_error = None;
    }

    pub fn fail_count(&self, error: GatewayError) {
        self.state().count_error = Some(error);
    }

    /// Every per-id query for `id` fails with `error`.
    pub fn fail_proposal(&self, id: u64, error: GatewayError) {
        self.state().failures.insert(
            id,
            Failure {
                error,
                remaining: None,
            },
        );
    }

    /// The next `times` per-id queries for `id` fail, later ones succeed.
    pub fn fail_proposal_times(&self, id: u64, error: GatewayError, times: u32) {
        self.state().failures.insert(
            id,
            Failure {
                error,
                remaining: Some(times),
            },
        );
    }

    pub fn set_active(&self, id: u64, active: bool) {
        self.state().active.insert(id, active);
    }

    pub fn set_vote(&self, voter: &str, id: u64, record: VoteRecord) {
        self.state().votes.insert((id, voter.to_string()), record);
    }

    /// Delay every answer, making concurrent calls overlap.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap_or_else(|e| e.into_inner()) = Some(latency);
    }

    /// Hold the next call to `function` until the returned gate is released.
    pub fn hold_next(&self, function: &str) -> CallGate {
        let gate = CallGate::new();
        self.state()
            .gates
            .entry(function.to_string())
            .or_default()
            .push_back(gate.clone());
        gate
    }

    /// All calls received so far (for assertions).
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state().calls.clone()
    }

    pub fn calls_to(&self, function: &str) -> Vec<RecordedCall> {
        self.state()
            .calls
            .iter()
            .filter(|c| c.function == function)
            .cloned()
            .collect()
    }

    /// Highest number of calls that were in progress at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Forget recorded calls and concurrency statistics.
    pub fn reset_calls(&self) {
        self.state().calls.clear();
        self.max_in_flight.store(0, Ordering::SeqCst);
    }

    fn answer(state: &mut State, call: &RecordedCall) -> Result<ClarityValue, GatewayError> {
        if call.function == functions::GET_PROPOSAL_COUNT {
            if let Some(e) = &state.count_error {
                return Err(e.clone());
            }
            let count = state.count.unwrap_or(state.proposals.len() as u64);
            return Ok(ClarityValue::ok(ClarityValue::uint(count)));
        }

        let id = call
            .id_arg()
            .ok_or_else(|| GatewayError::Rejected("expected a uint proposal id".into()))?;

        if let Some(failure) = state.failures.get_mut(&id) {
            let error = failure.error.clone();
            match &mut failure.remaining {
                None => return Err(error),
                Some(0) => {}
                Some(n) => {
                    *n -= 1;
                    return Err(error);
                }
            }
        }

        let proposal = state.proposals.get(&id);
        match call.function.as_str() {
            functions::GET_PROPOSAL => match proposal {
                Some(p) => Ok(ClarityValue::some(proposal_to_clarity(p)?)),
                None => Ok(ClarityValue::OptionalNone),
            },
            functions::GET_VOTING_RESULTS => match proposal {
                Some(p) => Ok(ClarityValue::ok(results_to_clarity(p))),
                None => Ok(ClarityValue::err(ClarityValue::uint(404u64))),
            },
            functions::IS_VOTING_ACTIVE => match state.active.get(&id) {
                Some(active) => Ok(ClarityValue::Bool(*active)),
                None => Err(GatewayError::Rejected(format!("no activity scripted for #{id}"))),
            },
            functions::GET_VOTE => {
                let voter = call
                    .args
                    .first()
                    .and_then(|v| v.expect_principal().ok())
                    .ok_or_else(|| GatewayError::Rejected("expected a voter principal".into()))?;
                Ok(match state.votes.get(&(id, voter)) {
                    Some(record) => ClarityValue::some(ClarityValue::tuple([
                        ("vote", ClarityValue::Bool(record.vote)),
                        ("timestamp", ClarityValue::uint(record.timestamp.as_secs())),
                    ])),
                    None => ClarityValue::OptionalNone,
                })
            }
            other => Err(GatewayError::Rejected(format!("no such function: {other}"))),
        }
    }
}

impl Default for NullGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContractGateway for NullGateway {
    fn contract(&self) -> &ContractId {
        &self.contract
    }

    async fn call_read_only(
        &self,
        function: &str,
        args: &[ClarityValue],
    ) -> Result<ClarityValue, GatewayError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let call = RecordedCall {
            function: function.to_string(),
            args: args.to_vec(),
        };
        let (answer, gate) = {
            let mut state = self.state();
            state.calls.push(call.clone());
            let answer = Self::answer(&mut state, &call);
            let gate = state
                .gates
                .get_mut(function)
                .and_then(|queue| queue.pop_front());
            (answer, gate)
        };

        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        let latency = *self.latency.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        answer
    }
}
