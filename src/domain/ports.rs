use crate::domain::model::{ParameterSet, SourceRecord, UpsertResult};
use crate::utils::error::{Result, SinkError};
use async_trait::async_trait;

/// Fetches the complete set of source records in one call.
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Fails with `SyncError::SourceUnavailable` when the fetch cannot complete.
    async fn read_all(&self) -> Result<Vec<SourceRecord>>;

    /// Releases the underlying connection.
    async fn release(&self);
}

/// Applies one parameter set to the target store.
#[async_trait]
pub trait UpsertSink: Send + Sync {
    async fn apply(&self, params: ParameterSet) -> std::result::Result<UpsertResult, SinkError>;

    async fn release(&self);
}
