//! Network identifier.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::TypesError;

/// Identifies which Stacks network the client talks to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    /// The production network.
    Mainnet,
    /// The public test network.
    Testnet,
    /// A local devnet node.
    Devnet,
}

impl NetworkId {
    /// Default public API endpoint for this network.
    pub fn default_api_url(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://api.mainnet.hiro.so",
            Self::Testnet => "https://api.testnet.hiro.so",
            Self::Devnet => "http://localhost:3999",
        }
    }

    /// c32 version byte for single-signature addresses on this network.
    pub fn address_version(&self) -> u8 {
        match self {
            Self::Mainnet => 22,
            Self::Testnet | Self::Devnet => 26,
        }
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
        }
    }
}

impl FromStr for NetworkId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" | "live" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            "devnet" | "dev" | "local" => Ok(Self::Devnet),
            other => Err(TypesError::UnknownNetwork(other.to_string())),
        }
    }
}
