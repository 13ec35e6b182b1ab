//! Logging setup.
//!
//! Diagnostics go through the `log` facade; `env_logger` writes them to
//! stderr. Compile, link and validation outcomes are reported here.

mod init;

pub use init::{LoggingConfig, init_logging};
