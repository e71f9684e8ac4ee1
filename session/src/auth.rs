//! The external wallet authentication interface.

use async_trait::async_trait;
use ballot_types::{NetworkId, Principal};
use serde::{Deserialize, Serialize};

use crate::SessionError;

/// Profile data the wallet hands back after a successful sign-in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub mainnet_address: Principal,
    #[serde(default)]
    pub testnet_address: Option<Principal>,
}

impl UserData {
    /// The address to act as on `network`.
    ///
    /// Devnet shares testnet address versions; if the wallet did not report a
    /// testnet address there is nothing usable for those networks.
    pub fn address_for(&self, network: NetworkId) -> Option<&Principal> {
        match network {
            NetworkId::Mainnet => Some(&self.mainnet_address),
            NetworkId::Testnet | NetworkId::Devnet => self.testnet_address.as_ref(),
        }
    }
}

/// A wallet that can authenticate the user.
///
/// `open_auth` only starts the flow: the wallet shows its own UI and the
/// outcome is observed later through `is_user_signed_in`.
#[async_trait]
pub trait WalletAuth: Send + Sync {
    /// Ask the wallet to open its authentication prompt.
    async fn open_auth(&self) -> Result<(), SessionError>;

    /// Whether the wallet currently holds a signed-in session.
    async fn is_user_signed_in(&self) -> bool;

    /// Profile of the signed-in user.
    async fn load_user_data(&self) -> Result<UserData, SessionError>;

    /// End the wallet session.
    async fn sign_out(&self) -> Result<(), SessionError>;
}
