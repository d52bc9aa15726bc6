use thiserror::Error;

/// Errors from console store operations.
///
/// `NotFound` and `Protected` are terminal for the triggering call and are
/// surfaced verbatim. `Transient` is a recoverable unavailability signal;
/// retry policy belongs to the caller, never to the store or the core.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("record is protected and cannot be deleted: {0}")]
    Protected(String),

    #[error("store temporarily unavailable: {0}")]
    Transient(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    /// Whether the caller may retry the operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_is_retryable() {
        assert!(StoreError::Transient("network".into()).is_retryable());
        assert!(!StoreError::NotFound("cfg-1".into()).is_retryable());
        assert!(!StoreError::Protected("cfg-0".into()).is_retryable());
    }

    #[test]
    fn error_display_messages() {
        let err = StoreError::NotFound("cfg-1".into());
        assert_eq!(err.to_string(), "record not found: cfg-1");

        let err = StoreError::Protected("cfg-0".into());
        assert!(err.to_string().contains("protected"));
    }
}
