use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),
}

/// Failures on the host side of the script bridge.
///
/// None of these ever cross into the rendering engine: engine callbacks
/// convert every failure into a rejected request or a missing reply.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("invalid script identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("non-finite number cannot be a script literal: {0}")]
    NonFiniteNumber(f64),

    #[error("integer outside the exact script range: {0}")]
    UnsafeInteger(i128),

    #[error("query channel already registered: {0}")]
    DuplicateQuery(String),

    #[error("script evaluation failed: {0}")]
    Evaluate(String),

    #[error("bridge has been disposed")]
    Disposed,
}

#[derive(Debug, thiserror::Error)]
pub enum CfgviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("webview error: {0}")]
    WebView(String),

    #[error("{0}")]
    Other(String),
}
