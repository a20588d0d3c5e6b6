//! Logging utilities.
//!
//! Centralizes logger initialization on top of the `log` facade.

mod init;

pub use init::{DEFAULT_FILTER, LoggingConfig, init_logging};
