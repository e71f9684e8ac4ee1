//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency (node API, wallet signer, wallet auth) sits
//! behind a trait. This crate provides test-friendly implementations that:
//! - Return scripted values
//! - Record every call for assertions
//! - Can hold individual calls open to force a completion order
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod fixtures;
pub mod gateway;
pub mod signer;
pub mod wallet;

pub use fixtures::{proposal_to_clarity, sample_proposal, SAMPLE_ADDRESS};
pub use gateway::{CallGate, NullGateway, RecordedCall};
pub use signer::NullSigner;
pub use wallet::NullWalletAuth;
