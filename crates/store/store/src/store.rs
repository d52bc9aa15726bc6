use async_trait::async_trait;

use hookline_core::{ConfigId, ConfigKind, ConfigRecord, DispatchLog, IngestRequest};

use crate::error::StoreError;

/// Backend collaborator for the console: configuration CRUD plus the
/// append-only ingest and dispatch journals.
///
/// Implementations must be `Send + Sync`. Every operation may fail with
/// [`StoreError::Transient`] when the backend is unavailable; callers treat
/// that as retryable, not as data corruption.
#[async_trait]
pub trait GatewayStore: Send + Sync {
    /// List all configuration records of one kind, in insertion order.
    async fn list_configs(&self, kind: ConfigKind) -> Result<Vec<ConfigRecord>, StoreError>;

    /// Persist a new configuration record.
    ///
    /// The store assigns the id and both timestamps; whatever the caller
    /// put in those fields is overwritten. The first record stored for a
    /// kind is marked protected. Returns the stored record.
    async fn create_config(&self, record: ConfigRecord) -> Result<ConfigRecord, StoreError>;

    /// Replace an existing record, matched by id within its kind.
    ///
    /// Refreshes `updated_at`; `created_at` and the protected flag of the
    /// stored record are preserved. Fails with [`StoreError::NotFound`] if
    /// the id is absent.
    async fn update_config(&self, record: ConfigRecord) -> Result<ConfigRecord, StoreError>;

    /// Delete a record by kind and id, returning it.
    ///
    /// Fails with [`StoreError::NotFound`] if the id is absent and with
    /// [`StoreError::Protected`] if the record is flagged protected.
    async fn delete_config(
        &self,
        kind: ConfigKind,
        id: &ConfigId,
    ) -> Result<ConfigRecord, StoreError>;

    /// Append a captured ingest request to the journal.
    async fn record_request(&self, request: IngestRequest) -> Result<(), StoreError>;

    /// List all captured ingest requests, oldest first.
    async fn list_requests(&self) -> Result<Vec<IngestRequest>, StoreError>;

    /// Append a dispatch log entry to the journal.
    async fn append_log(&self, log: DispatchLog) -> Result<(), StoreError>;

    /// List all dispatch log entries, oldest first.
    async fn list_logs(&self) -> Result<Vec<DispatchLog>, StoreError>;
}
