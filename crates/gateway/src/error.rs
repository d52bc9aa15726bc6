use thiserror::Error;

/// Errors that can occur during console gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An error from the backing store.
    #[error("store error: {0}")]
    Store(#[from] hookline_store::StoreError),

    /// An error from rule handling (e.g. rejecting an invalid pattern on
    /// config create/update).
    #[error("rule error: {0}")]
    Rule(#[from] hookline_rules::RuleError),

    /// The gateway was misconfigured (e.g. missing required components).
    #[error("configuration error: {0}")]
    Configuration(String),
}
