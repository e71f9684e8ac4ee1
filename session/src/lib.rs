//! Session and identity tracking.
//!
//! The wallet owns authentication; this crate only mirrors whether a user is
//! connected and under which address. It is independent of proposal data and
//! is consulted by the view layer to decide which actions to expose.

pub mod auth;
pub mod error;
pub mod tracker;

pub use auth::{UserData, WalletAuth};
pub use error::SessionError;
pub use tracker::{ReloadRequired, SessionState, SessionTracker};
