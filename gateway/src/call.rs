//! Contract function names and state-changing call descriptions.

use ballot_clarity::ClarityValue;
use ballot_types::ContractId;
use serde::{Deserialize, Serialize};

/// Public function names exposed by the voting contract.
pub mod functions {
    pub const GET_PROPOSAL_COUNT: &str = "get-proposal-count";
    pub const GET_PROPOSAL: &str = "get-proposal";
    pub const GET_VOTING_RESULTS: &str = "get-voting-results";
    pub const IS_VOTING_ACTIVE: &str = "is-voting-active";
    pub const GET_VOTE: &str = "get-vote";

    pub const CREATE_PROPOSAL: &str = "create-proposal";
    pub const VOTE: &str = "vote";
    pub const END_VOTING: &str = "end-voting";
}

/// A state-changing contract call, to be signed and broadcast by the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractCall {
    pub contract: ContractId,
    pub function: String,
    pub args: Vec<ClarityValue>,
}

impl ContractCall {
    pub fn new(contract: ContractId, function: impl Into<String>, args: Vec<ClarityValue>) -> Self {
        Self {
            contract,
            function: function.into(),
            args,
        }
    }

    /// Wallet request body: contract coordinates plus hex-encoded arguments.
    pub fn to_request(&self) -> serde_json::Value {
        serde_json::json!({
            "contract_address": self.contract.address.as_str(),
            "contract_name": self.contract.name,
            "function_name": self.function,
            "function_args": self.args.iter().map(ClarityValue::to_hex).collect::<Vec<_>>(),
        })
    }
}

/// What the wallet reports once a transaction has been broadcast.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub txid: String,
    /// Remaining wallet payload, passed through untouched.
    #[serde(default, flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// How a wallet-mediated submission ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Signed and broadcast. Confirmation happens later on chain.
    Finished(TxReceipt),
    /// The user dismissed the wallet prompt.
    Cancelled,
}

impl SubmissionOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}
