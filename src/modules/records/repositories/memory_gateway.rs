//! In-process record store.
//!
//! Backs the test suite and `STORAGE_BACKEND=memory`. Insertion order breaks
//! ties when two records compare equal under the requested sort.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::traits::record::{compare_fields, field_text};
use crate::core::{
    apply_patch, AppError, ListQuery, Record, RecordGateway, RecordPatch, Result, SortDirection,
    StoredRecord,
};

struct Entry<R> {
    seq: u64,
    stored: StoredRecord<R>,
}

struct State<R> {
    next_seq: u64,
    entries: HashMap<String, Entry<R>>,
}

pub struct InMemoryGateway<R> {
    state: RwLock<State<R>>,
}

impl<R: Record> InMemoryGateway<R> {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                next_seq: 0,
                entries: HashMap::new(),
            }),
        }
    }
}

impl<R: Record> Default for InMemoryGateway<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> State<R> {
    /// Rejects a natural key already used by another record
    fn check_unique(&self, record: &R, except_id: Option<&str>) -> Result<()> {
        let (Some(field), Some(key)) = (R::UNIQUE_FIELD, record.unique_key()) else {
            return Ok(());
        };

        let taken = self.entries.values().any(|entry| {
            Some(entry.stored.id.as_str()) != except_id
                && entry.stored.record.unique_key().as_deref() == Some(key.as_str())
        });

        if taken {
            return Err(AppError::constraint(format!(
                "{} with {} '{}' already exists",
                R::KIND,
                field,
                key
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl<R: Record> RecordGateway<R> for InMemoryGateway<R> {
    async fn create(&self, record: R) -> Result<StoredRecord<R>> {
        record.validate()?;

        let mut state = self.state.write().await;
        state.check_unique(&record, None)?;

        let now = Utc::now();
        let stored = StoredRecord {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            record,
        };

        let seq = state.next_seq;
        state.next_seq += 1;
        state.entries.insert(
            stored.id.clone(),
            Entry {
                seq,
                stored: stored.clone(),
            },
        );

        Ok(stored)
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<StoredRecord<R>>> {
        query.validate_for::<R>()?;

        let state = self.state.read().await;

        let mut rows: Vec<(u64, Value, &StoredRecord<R>)> = Vec::with_capacity(state.entries.len());
        for entry in state.entries.values() {
            let document = serde_json::to_value(&entry.stored.record)?;
            let matches = query.filters.iter().all(|filter| {
                field_text(&document, &filter.field).as_deref() == Some(filter.value.as_str())
            });
            if matches {
                rows.push((entry.seq, document, &entry.stored));
            }
        }

        let order = &query.order;
        rows.sort_by(|(seq_a, doc_a, a), (seq_b, doc_b, b)| {
            let by_field = match order.field.as_str() {
                "created_at" => a.created_at.cmp(&b.created_at),
                "updated_at" => a.updated_at.cmp(&b.updated_at),
                field => compare_fields(doc_a.get(field), doc_b.get(field)),
            };
            let ordering = by_field.then(seq_a.cmp(seq_b));
            match order.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        Ok(rows.into_iter().map(|(_, _, stored)| stored.clone()).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<StoredRecord<R>>> {
        let state = self.state.read().await;
        Ok(state.entries.get(id).map(|entry| entry.stored.clone()))
    }

    async fn update(&self, id: &str, patch: RecordPatch) -> Result<StoredRecord<R>> {
        let mut state = self.state.write().await;

        let current = state
            .entries
            .get(id)
            .map(|entry| entry.stored.record.clone())
            .ok_or_else(|| AppError::not_found(format!("{} with id '{}' not found", R::KIND, id)))?;

        let merged = apply_patch(&current, &patch)?;
        state.check_unique(&merged, Some(id))?;

        let entry = state
            .entries
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("{} with id '{}' not found", R::KIND, id)))?;
        entry.stored.record = merged;
        entry.stored.updated_at = Utc::now().max(entry.stored.updated_at);

        Ok(entry.stored.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut state = self.state.write().await;
        match state.entries.remove(id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!(
                "{} with id '{}' not found",
                R::KIND,
                id
            ))),
        }
    }
}

impl<R> std::fmt::Debug for InMemoryGateway<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryGateway").finish_non_exhaustive()
    }
}
