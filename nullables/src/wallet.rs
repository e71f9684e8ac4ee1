//! Nullable wallet authentication.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use ballot_session::{SessionError, UserData, WalletAuth};
use ballot_types::Principal;

use crate::fixtures::SAMPLE_ADDRESS;

#[derive(Default)]
struct State {
    user: Option<UserData>,
    auth_requests: u32,
    unavailable: bool,
}

/// A test wallet whose sign-in is completed by calling [`NullWalletAuth::approve`].
#[derive(Default)]
pub struct NullWalletAuth {
    state: Mutex<State>,
}

impl NullWalletAuth {
    pub fn new() -> Self {
        Self::default()
    }

    /// A wallet already signed in as [`SAMPLE_ADDRESS`] on every network.
    pub fn signed_in() -> Self {
        let wallet = Self::new();
        wallet.approve_sample();
        wallet
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Complete the sign-in flow as `user`.
    pub fn approve(&self, user: UserData) {
        self.state().user = Some(user);
    }

    pub fn approve_sample(&self) {
        let address = Principal::parse(SAMPLE_ADDRESS).unwrap_or_else(|e| panic!("{e}"));
        self.approve(UserData {
            mainnet_address: address.clone(),
            testnet_address: Some(address),
        });
    }

    /// Make every wallet call fail as if the wallet were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state().unavailable = unavailable;
    }

    pub fn auth_requests(&self) -> u32 {
        self.state().auth_requests
    }
}

#[async_trait]
impl WalletAuth for NullWalletAuth {
    async fn open_auth(&self) -> Result<(), SessionError> {
        let mut state = self.state();
        if state.unavailable {
            return Err(SessionError::WalletUnavailable("null wallet offline".into()));
        }
        state.auth_requests += 1;
        Ok(())
    }

    async fn is_user_signed_in(&self) -> bool {
        let state = self.state();
        !state.unavailable && state.user.is_some()
    }

    async fn load_user_data(&self) -> Result<UserData, SessionError> {
        let state = self.state();
        if state.unavailable {
            return Err(SessionError::WalletUnavailable("null wallet offline".into()));
        }
        state.user.clone().ok_or(SessionError::NotSignedIn)
    }

    async fn sign_out(&self) -> Result<(), SessionError> {
        let mut state = self.state();
        state.user = None;
        if state.unavailable {
            return Err(SessionError::WalletUnavailable("null wallet offline".into()));
        }
        Ok(())
    }
}
