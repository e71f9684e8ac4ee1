//! JSON-RPC bridge to an external wallet service.
//!
//! The wallet owns keys and user prompts. This client only forwards
//! requests and interprets the answers: every request is a JSON object with
//! an `action` field, and the wallet replies with `{"result": ...}` or
//! `{"error": "..."}`.

use std::time::Duration;

use async_trait::async_trait;
use ballot_session::{SessionError, UserData, WalletAuth};
use ballot_types::NetworkId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{ContractCall, GatewayError, SubmissionOutcome, TransactionSigner, TxReceipt};

/// Application identity shown by the wallet's prompts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDetails {
    pub name: String,
    pub icon: String,
}

impl Default for AppDetails {
    fn default() -> Self {
        Self {
            name: "Decentralized Voting System".to_string(),
            icon: "./logo.png".to_string(),
        }
    }
}

/// HTTP client for a wallet that signs contract calls on the user's behalf.
#[derive(Clone)]
pub struct WalletClient {
    http: reqwest::Client,
    wallet_url: String,
    network: NetworkId,
    app: AppDetails,
}

impl WalletClient {
    /// Create a client for the wallet at `wallet_url` (e.g. `http://127.0.0.1:8765`).
    ///
    /// The timeout is generous because contract calls wait on the user.
    pub fn new(
        wallet_url: impl Into<String>,
        network: NetworkId,
        app: AppDetails,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            wallet_url: wallet_url.into(),
            network,
            app,
        })
    }

    pub fn wallet_url(&self) -> &str {
        &self.wallet_url
    }

    /// Send a JSON-RPC request and return the `result` field.
    async fn rpc_call(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError> {
        let mut body = params;
        body.as_object_mut()
            .ok_or_else(|| GatewayError::Wallet("params must be a JSON object".into()))?
            .insert("action".to_string(), serde_json::json!(action));

        let response = self
            .http
            .post(&self.wallet_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(format!("wallet unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(GatewayError::Http(response.status().as_u16()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(format!("invalid JSON response: {e}")))?;

        unwrap_rpc_result(json)
    }
}

/// Split a wallet reply into its `result` or its `error`.
fn unwrap_rpc_result(json: serde_json::Value) -> Result<serde_json::Value, GatewayError> {
    if let Some(err) = json.get("error").and_then(|e| e.as_str()) {
        return Err(GatewayError::Wallet(err.to_string()));
    }
    Ok(json.get("result").cloned().unwrap_or(json))
}

/// Interpret the wallet's answer to a contract call.
fn parse_submission(result: serde_json::Value) -> Result<SubmissionOutcome, GatewayError> {
    let status = result
        .get("status")
        .and_then(|s| s.as_str())
        .ok_or_else(|| GatewayError::MalformedResponse("missing submission status".into()))?;

    match status {
        "finished" => {
            let receipt: TxReceipt = serde_json::from_value(result.clone())
                .map_err(|e| GatewayError::MalformedResponse(format!("invalid receipt: {e}")))?;
            Ok(SubmissionOutcome::Finished(receipt))
        }
        "cancelled" | "canceled" => Ok(SubmissionOutcome::Cancelled),
        other => Err(GatewayError::MalformedResponse(format!(
            "unknown submission status: {other}"
        ))),
    }
}

#[async_trait]
impl TransactionSigner for WalletClient {
    async fn submit(&self, call: ContractCall) -> Result<SubmissionOutcome, GatewayError> {
        let mut params = call.to_request();
        if let Some(obj) = params.as_object_mut() {
            obj.insert("network".into(), serde_json::json!(self.network.as_str()));
            obj.insert("app_name".into(), serde_json::json!(self.app.name));
        }

        info!(function = %call.function, contract = %call.contract, "requesting wallet signature");
        let outcome = parse_submission(self.rpc_call("contract_call", params).await?)?;
        match &outcome {
            SubmissionOutcome::Finished(receipt) => {
                info!(txid = %receipt.txid, "transaction broadcast")
            }
            SubmissionOutcome::Cancelled => debug!("wallet prompt dismissed"),
        }
        Ok(outcome)
    }
}

#[async_trait]
impl WalletAuth for WalletClient {
    async fn open_auth(&self) -> Result<(), SessionError> {
        self.rpc_call(
            "auth_request",
            serde_json::json!({
                "app_name": self.app.name,
                "app_icon": self.app.icon,
                "network": self.network.as_str(),
            }),
        )
        .await
        .map(|_| ())
        .map_err(|e| SessionError::WalletUnavailable(e.to_string()))
    }

    async fn is_user_signed_in(&self) -> bool {
        match self.rpc_call("session_status", serde_json::json!({})).await {
            Ok(result) => result
                .get("signed_in")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            Err(e) => {
                warn!("wallet session check failed: {e}");
                false
            }
        }
    }

    async fn load_user_data(&self) -> Result<UserData, SessionError> {
        let result = self
            .rpc_call("user_data", serde_json::json!({}))
            .await
            .map_err(|e| match e {
                GatewayError::Wallet(_) => SessionError::NotSignedIn,
                other => SessionError::WalletUnavailable(other.to_string()),
            })?;
        serde_json::from_value(result).map_err(|e| SessionError::MalformedUserData(e.to_string()))
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        self.rpc_call("sign_out", serde_json::json!({}))
            .await
            .map(|_| ())
            .map_err(|e| SessionError::WalletUnavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rpc_error_field_wins() {
        let err = unwrap_rpc_result(serde_json::json!({"error": "locked"})).unwrap_err();
        assert_eq!(err, GatewayError::Wallet("locked".into()));
    }

    #[test]
    fn rpc_result_unwrapped() {
        let value = unwrap_rpc_result(serde_json::json!({"result": {"signed_in": true}})).unwrap();
        assert_eq!(value["signed_in"], true);
    }

    #[test]
    fn finished_submission_has_receipt() {
        let outcome =
            parse_submission(serde_json::json!({"status": "finished", "txid": "0x01"})).unwrap();
        match outcome {
            SubmissionOutcome::Finished(receipt) => assert_eq!(receipt.txid, "0x01"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn cancelled_submission() {
        let outcome = parse_submission(serde_json::json!({"status": "cancelled"})).unwrap();
        assert_eq!(outcome, SubmissionOutcome::Cancelled);
    }

    #[test]
    fn finished_without_txid_is_malformed() {
        let err = parse_submission(serde_json::json!({"status": "finished"})).unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }

    #[test]
    fn unknown_status_is_malformed() {
        assert!(parse_submission(serde_json::json!({"status": "pending"})).is_err());
        assert!(parse_submission(serde_json::json!({})).is_err());
    }
}
