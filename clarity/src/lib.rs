//! Clarity value codec.
//!
//! - Consensus serialization of Clarity values (the `0x`-prefixed hex blobs
//!   exchanged with a Stacks node's read-only call endpoint)
//! - c32check encoding of principals (`SP…` / `ST…` addresses)
//! - Typed accessors used to pull domain fields out of contract responses

pub mod c32;
pub mod error;
pub mod value;

pub use c32::{c32_address, c32_address_decode, c32_decode, c32_encode};
pub use error::ClarityError;
pub use value::{ClarityValue, MAX_DEPTH};
