//! Types shared across the cfgview crates.

pub mod errors;

pub use errors::{BridgeError, CfgviewError, ConfigError};

pub type Result<T> = std::result::Result<T, CfgviewError>;
