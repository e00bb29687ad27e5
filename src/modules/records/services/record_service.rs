use std::sync::Arc;

use serde_json::Value;

use crate::core::traits::record::to_patch;
use crate::core::{
    apply_patch, AppError, ListQuery, Record, RecordGateway, RecordPatch, Result, StoredRecord,
};
use crate::modules::taxes::models::PricingContext;

/// Fields a record computes from its entered fields.
///
/// Runs before every create and after every merged update, so stored
/// records never carry stale derived values.
pub trait DerivedFields {
    fn derive_fields(&mut self, _pricing: &PricingContext) -> Result<()> {
        Ok(())
    }
}

/// Service layer in front of a record gateway
pub struct RecordService<R: Record> {
    gateway: Arc<dyn RecordGateway<R>>,
    pricing: Arc<PricingContext>,
}

impl<R: Record + DerivedFields> RecordService<R> {
    pub fn new(gateway: Arc<dyn RecordGateway<R>>, pricing: Arc<PricingContext>) -> Self {
        Self { gateway, pricing }
    }

    pub fn pricing(&self) -> &PricingContext {
        &self.pricing
    }

    /// Derive computed fields and persist a new record
    pub async fn create(&self, mut record: R) -> Result<StoredRecord<R>> {
        record.derive_fields(&self.pricing)?;
        let stored = self.gateway.create(record).await?;

        tracing::info!(kind = %R::KIND, id = %stored.id, "Record created");

        Ok(stored)
    }

    pub async fn list(&self, query: ListQuery) -> Result<Vec<StoredRecord<R>>> {
        query.validate_for::<R>()?;
        self.gateway.list(&query).await
    }

    pub async fn get(&self, id: &str) -> Result<StoredRecord<R>> {
        self.gateway
            .find(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} with id '{}' not found", R::KIND, id)))
    }

    /// Merge a partial record, recompute derived fields, persist the changes
    pub async fn update(&self, id: &str, patch: RecordPatch) -> Result<StoredRecord<R>> {
        self.ensure_mutable()?;

        let current = self.get(id).await?;
        let mut merged = apply_patch(&current.record, &patch)?;
        merged.derive_fields(&self.pricing)?;

        let changes = changed_fields(&current.record, &merged)?;
        if changes.is_empty() {
            tracing::debug!(kind = %R::KIND, id = %id, "Update left record unchanged");
            return Ok(current);
        }

        let stored = self.gateway.update(id, changes).await?;

        tracing::info!(kind = %R::KIND, id = %id, "Record updated");

        Ok(stored)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.ensure_mutable()?;
        self.gateway.delete(id).await?;

        tracing::info!(kind = %R::KIND, id = %id, "Record deleted");

        Ok(())
    }

    fn ensure_mutable(&self) -> Result<()> {
        if R::APPEND_ONLY {
            return Err(AppError::ImmutableRecord(format!(
                "{} records are append-only",
                R::KIND
            )));
        }
        Ok(())
    }
}

/// Fields whose value differs between two versions of a record
fn changed_fields<R: Record>(before: &R, after: &R) -> Result<RecordPatch> {
    let before = to_patch(before)?;
    let changes = to_patch(after)?
        .into_iter()
        .filter(|(field, value)| before.get(field).unwrap_or(&Value::Null) != value)
        .collect();
    Ok(changes)
}
