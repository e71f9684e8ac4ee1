//! Shared utilities for the governance client.

pub mod display;
pub mod logging;
pub mod time;

pub use display::truncate_address;
pub use logging::{init_logging, LogFormat};
pub use time::format_duration;
