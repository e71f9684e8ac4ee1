//! Read-only contract calls over the Stacks node HTTP API.

use async_trait::async_trait;
use ballot_clarity::ClarityValue;
use ballot_types::ContractId;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{ContractGateway, GatewayConfig, GatewayError};

/// Stacks node client for `POST /v2/contracts/call-read/...`.
#[derive(Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    config: GatewayConfig,
}

#[derive(Serialize)]
struct ReadOnlyRequest<'a> {
    sender: &'a str,
    arguments: Vec<String>,
}

/// Node response body for a read-only call.
#[derive(Debug, Deserialize)]
pub struct ReadOnlyResponse {
    pub okay: bool,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub cause: Option<serde_json::Value>,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

#[async_trait]
impl ContractGateway for HttpGateway {
    fn contract(&self) -> &ContractId {
        &self.config.contract
    }

    async fn call_read_only(
        &self,
        function: &str,
        args: &[ClarityValue],
    ) -> Result<ClarityValue, GatewayError> {
        let url = self.config.call_read_url(function);
        let body = ReadOnlyRequest {
            sender: self.config.sender.as_str(),
            arguments: args.iter().map(ClarityValue::to_hex).collect(),
        };
        trace!(%url, args = body.arguments.len(), "read-only call");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            debug!(function, %status, "read-only call failed");
            return Err(GatewayError::Http(status.as_u16()));
        }

        let parsed: ReadOnlyResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(format!("invalid JSON response: {e}")))?;

        parse_read_only_response(parsed)
    }
}

/// Turn a node response into the decoded Clarity result.
pub fn parse_read_only_response(response: ReadOnlyResponse) -> Result<ClarityValue, GatewayError> {
    if !response.okay {
        let cause = match response.cause {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => "no cause given".to_string(),
        };
        return Err(GatewayError::Rejected(cause));
    }
    let hex = response
        .result
        .ok_or_else(|| GatewayError::MalformedResponse("okay response without result".into()))?;
    Ok(ClarityValue::from_hex(&hex)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_clarity::ClarityError;

    fn response(json: serde_json::Value) -> ReadOnlyResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn okay_result_decoded() {
        let value = ClarityValue::ok(ClarityValue::uint(7u64));
        let parsed = parse_read_only_response(response(serde_json::json!({
            "okay": true,
            "result": value.to_hex(),
        })))
        .unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn not_okay_is_rejected_with_cause() {
        let err = parse_read_only_response(response(serde_json::json!({
            "okay": false,
            "cause": "Unchecked(NoSuchContract)",
        })))
        .unwrap_err();
        assert_eq!(err, GatewayError::Rejected("Unchecked(NoSuchContract)".into()));
    }

    #[test]
    fn missing_result_is_malformed() {
        let err = parse_read_only_response(response(serde_json::json!({ "okay": true })))
            .unwrap_err();
        assert!(matches!(err, GatewayError::MalformedResponse(_)));
    }

    #[test]
    fn garbage_hex_is_decode_error() {
        let err = parse_read_only_response(response(serde_json::json!({
            "okay": true,
            "result": "0xff",
        })))
        .unwrap_err();
        assert_eq!(err, GatewayError::Decode(ClarityError::UnknownTypePrefix(0xff)));
    }

    #[test]
    fn builds_with_default_config() {
        let gw = HttpGateway::new(GatewayConfig::default()).unwrap();
        assert_eq!(gw.contract().name, "oluolavotes");
    }
}
