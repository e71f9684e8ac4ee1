//! Mirrors the wallet's connection state for the view layer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ballot_types::{NetworkId, Principal};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{SessionError, WalletAuth};

/// Connection state as seen by the view layer.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Disconnected,
    Connected { address: Principal },
}

impl SessionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    pub fn address(&self) -> Option<&Principal> {
        match self {
            Self::Connected { address } => Some(address),
            Self::Disconnected => None,
        }
    }
}

/// Returned by [`SessionTracker::sign_out`]: the view layer must discard all
/// state derived from the previous session and rebuild from scratch.
#[must_use = "sign-out requires the view layer to reload"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadRequired {
    /// Session generation the reload belongs to.
    pub generation: u64,
}

/// Tracks whether a wallet is connected and which address it uses.
///
/// State is published on a `watch` channel so that any number of view
/// components can observe changes without polling the wallet themselves.
pub struct SessionTracker<A> {
    auth: Arc<A>,
    network: NetworkId,
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
}

impl<A: WalletAuth> SessionTracker<A> {
    pub fn new(auth: Arc<A>, network: NetworkId) -> Self {
        let (state, _) = watch::channel(SessionState::Disconnected);
        Self {
            auth,
            network,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Get a receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn is_connected(&self) -> bool {
        self.state.borrow().is_connected()
    }

    pub fn address(&self) -> Option<Principal> {
        self.state.borrow().address().cloned()
    }

    /// Number of completed sign-outs; bumps each time prior state is invalidated.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Start the wallet's sign-in flow.
    ///
    /// The result is not observable here: once the wallet reports completion
    /// the caller invokes [`SessionTracker::sync`].
    pub async fn sign_in(&self) -> Result<(), SessionError> {
        info!(network = self.network.as_str(), "opening wallet authentication");
        self.auth.open_auth().await
    }

    /// Re-read the wallet's session and publish the result.
    ///
    /// A sign-out that lands while the wallet is being read wins: the stale
    /// result is dropped and `Disconnected` is returned.
    pub async fn sync(&self) -> SessionState {
        let generation = self.generation();
        let next = if self.auth.is_user_signed_in().await {
            match self.auth.load_user_data().await {
                Ok(user) => match user.address_for(self.network) {
                    Some(address) => SessionState::Connected {
                        address: address.clone(),
                    },
                    None => {
                        warn!(
                            network = self.network.as_str(),
                            "wallet has no address for this network"
                        );
                        SessionState::Disconnected
                    }
                },
                Err(e) => {
                    warn!("failed to load wallet user data: {e}");
                    SessionState::Disconnected
                }
            }
        } else {
            SessionState::Disconnected
        };

        let published = self.state.send_if_modified(|state| {
            if self.generation() != generation {
                return false;
            }
            *state = next.clone();
            true
        });
        if !published {
            debug!(generation, "session signed out during sync, discarding result");
            return SessionState::Disconnected;
        }
        debug!(connected = next.is_connected(), "session synced");
        next
    }

    /// Sign out of the wallet and clear local session state.
    ///
    /// Local state is cleared even if the wallet could not be reached.
    pub async fn sign_out(&self) -> ReloadRequired {
        if let Err(e) = self.auth.sign_out().await {
            warn!("wallet sign-out failed, clearing local session anyway: {e}");
        }
        // Clear and fence under the channel lock.
        let mut generation = 0;
        self.state.send_modify(|state| {
            *state = SessionState::Disconnected;
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        });
        info!(generation, "signed out");
        ReloadRequired { generation }
    }
}
