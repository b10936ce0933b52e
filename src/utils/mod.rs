//! Shared utilities: error types and logging setup.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
pub use logging::{init_default_logging, init_logging, LogConfig, LogLevel};
