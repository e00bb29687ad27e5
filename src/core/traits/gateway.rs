use async_trait::async_trait;

use super::record::{ListQuery, Record, RecordPatch, StoredRecord};
use crate::core::Result;

/// Record Gateway: CRUD for one entity kind.
///
/// Implementations validate records at the boundary and report
/// `AppError::NotFound` for unknown ids and `AppError::Constraint` for
/// rejected writes. Concurrent writers resolve last-write-wins.
#[async_trait]
pub trait RecordGateway<R: Record>: Send + Sync {
    /// Persist a new record, assigning id and timestamps
    async fn create(&self, record: R) -> Result<StoredRecord<R>>;

    /// Records matching the query filters, in the query order
    async fn list(&self, query: &ListQuery) -> Result<Vec<StoredRecord<R>>>;

    /// Single record by id
    async fn find(&self, id: &str) -> Result<Option<StoredRecord<R>>>;

    /// Merge a partial record into an existing one
    async fn update(&self, id: &str, patch: RecordPatch) -> Result<StoredRecord<R>>;

    /// Remove a record
    async fn delete(&self, id: &str) -> Result<()>;
}
