//! Contract gateway for the governance contract.
//!
//! Provides:
//! - [`ContractGateway`]: read-only contract queries (no signature)
//! - [`TransactionSigner`]: wallet-mediated contract calls (finish or cancel)
//! - [`HttpGateway`]: Stacks node API implementation of read-only queries
//! - [`WalletClient`]: JSON-RPC bridge to an external wallet service
//! - [`VotingContract`]: typed proposal / vote queries on top of any gateway

pub mod call;
pub mod config;
pub mod contract;
pub mod decode;
pub mod error;
pub mod gateway;
pub mod http;
pub mod wallet;

pub use call::{functions, ContractCall, SubmissionOutcome, TxReceipt};
pub use config::GatewayConfig;
pub use contract::VotingContract;
pub use error::GatewayError;
pub use gateway::{ContractGateway, TransactionSigner};
pub use http::HttpGateway;
pub use wallet::{AppDetails, WalletClient};
