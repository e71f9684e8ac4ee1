//! Gateway configuration, passed explicitly at construction.

use std::time::Duration;

use ballot_types::{ContractId, NetworkId, Principal};

/// Where and how to reach the contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
    pub network: NetworkId,
    /// Base URL of the Stacks node API, without a trailing slash.
    pub api_url: String,
    /// The one contract every query targets.
    pub contract: ContractId,
    /// Principal reported as the caller of read-only functions.
    pub sender: Principal,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl GatewayConfig {
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Defaults for `network`, targeting the deployed voting contract.
    ///
    /// The sender defaults to the contract's own address, as read-only calls
    /// do not depend on who asks.
    pub fn for_network(network: NetworkId) -> Self {
        let contract = ContractId::default_voting();
        Self {
            network,
            api_url: network.default_api_url().to_string(),
            sender: contract.address.clone(),
            contract,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: Self::DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_contract(mut self, contract: ContractId) -> Self {
        self.sender = contract.address.clone();
        self.contract = contract;
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// URL of the read-only call endpoint for `function`.
    pub fn call_read_url(&self, function: &str) -> String {
        format!(
            "{}/v2/contracts/call-read/{}/{}/{}",
            self.api_url.trim_end_matches('/'),
            self.contract.address,
            self.contract.name,
            function
        )
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::for_network(NetworkId::Mainnet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_targets_mainnet_contract() {
        let cfg = GatewayConfig::default();
        assert_eq!(cfg.api_url, "https://api.mainnet.hiro.so");
        assert_eq!(cfg.sender, cfg.contract.address);
        assert_eq!(
            cfg.call_read_url("get-proposal-count"),
            "https://api.mainnet.hiro.so/v2/contracts/call-read/\
             SP221GWG1PPN83A1TA81DGDWG0V1E21QMKZTGXJ3B/oluolavotes/get-proposal-count"
        );
    }

    #[test]
    fn api_url_trailing_slash_trimmed() {
        let cfg = GatewayConfig::for_network(NetworkId::Devnet).with_api_url("http://node:3999/");
        assert_eq!(cfg.api_url, "http://node:3999");
        assert!(cfg
            .call_read_url("get-vote")
            .starts_with("http://node:3999/v2/contracts/call-read/"));
    }
}
