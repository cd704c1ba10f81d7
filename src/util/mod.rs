//! Utility modules for svcgraft

pub mod logging;

pub use logging::{init_logging, LoggingConfig};
