// MySQL record store
//
// Each entity kind lives in its own table:
//   id CHAR(36) | data JSON | created_at | updated_at
// plus a STORED generated column over the natural key with a UNIQUE index
// (see migrations/). Sort and filter field names are whitelisted by
// `ListQuery::validate_for` before they are interpolated into SQL.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};
use uuid::Uuid;

use crate::core::{
    apply_patch, AppError, ListQuery, Record, RecordGateway, RecordPatch, Result, StoredRecord,
};

/// Record gateway backed by one MySQL table per entity kind
pub struct MySqlGateway<R> {
    pool: MySqlPool,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> MySqlGateway<R> {
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }

    fn table() -> &'static str {
        R::KIND.table()
    }

    fn select_columns() -> &'static str {
        "id, CAST(data AS CHAR) AS data, created_at, updated_at"
    }

    fn map_write_error(err: sqlx::Error) -> AppError {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return AppError::constraint(format!(
                    "{} with {} already exists",
                    R::KIND,
                    R::UNIQUE_FIELD.unwrap_or("this key")
                ));
            }
            if db_err.is_check_violation() || db_err.is_foreign_key_violation() {
                return AppError::constraint(format!("{} rejected: {}", R::KIND, db_err.message()));
            }
        }
        AppError::Database(err)
    }
}

/// Raw row shape shared by every record table
#[derive(Debug, FromRow)]
struct RecordRow {
    id: String,
    data: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RecordRow {
    fn into_stored<R: Record>(self) -> Result<StoredRecord<R>> {
        let record: R = serde_json::from_str(&self.data).map_err(|e| {
            AppError::internal(format!(
                "Stored {} '{}' does not match its schema: {}",
                R::KIND,
                self.id,
                e
            ))
        })?;

        Ok(StoredRecord {
            id: self.id,
            created_at: self.created_at,
            updated_at: self.updated_at,
            record,
        })
    }
}

/// `ORDER BY` expression for a whitelisted field
fn order_expression(field: &str) -> String {
    match field {
        "created_at" | "updated_at" => field.to_string(),
        other => format!("JSON_EXTRACT(data, '$.{}')", other),
    }
}

#[async_trait]
impl<R: Record> RecordGateway<R> for MySqlGateway<R> {
    async fn create(&self, record: R) -> Result<StoredRecord<R>> {
        record.validate()?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let data = serde_json::to_string(&record)?;

        let sql = format!(
            "INSERT INTO {} (id, data, created_at, updated_at) VALUES (?, CAST(? AS JSON), ?, ?)",
            Self::table()
        );

        sqlx::query(&sql)
            .bind(id.as_str())
            .bind(data.as_str())
            .bind(now)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(Self::map_write_error)?;

        tracing::debug!(table = Self::table(), id = %id, "Inserted record");

        Ok(StoredRecord {
            id,
            created_at: now,
            updated_at: now,
            record,
        })
    }

    async fn list(&self, query: &ListQuery) -> Result<Vec<StoredRecord<R>>> {
        query.validate_for::<R>()?;

        let mut sql = format!("SELECT {} FROM {}", Self::select_columns(), Self::table());

        for (i, filter) in query.filters.iter().enumerate() {
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&format!(
                "JSON_UNQUOTE(JSON_EXTRACT(data, '$.{}')) = ?",
                filter.field
            ));
        }

        let direction = query.order.direction.as_sql();
        sql.push_str(&format!(
            " ORDER BY {} {}, created_at {}, id {}",
            order_expression(&query.order.field),
            direction,
            direction,
            direction
        ));

        let mut statement = sqlx::query_as::<_, RecordRow>(&sql);
        for filter in &query.filters {
            statement = statement.bind(filter.value.as_str());
        }

        let rows = statement.fetch_all(&self.pool).await?;

        rows.into_iter().map(RecordRow::into_stored::<R>).collect()
    }

    async fn find(&self, id: &str) -> Result<Option<StoredRecord<R>>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?",
            Self::select_columns(),
            Self::table()
        );

        let row = sqlx::query_as::<_, RecordRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(RecordRow::into_stored::<R>).transpose()
    }

    async fn update(&self, id: &str, patch: RecordPatch) -> Result<StoredRecord<R>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        let select = format!(
            "SELECT {} FROM {} WHERE id = ? FOR UPDATE",
            Self::select_columns(),
            Self::table()
        );

        let row = sqlx::query_as::<_, RecordRow>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{} with id '{}' not found", R::KIND, id)))?;

        let mut stored = row.into_stored::<R>()?;
        stored.record = apply_patch(&stored.record, &patch)?;
        stored.updated_at = Utc::now();

        let data = serde_json::to_string(&stored.record)?;
        let update = format!(
            "UPDATE {} SET data = CAST(? AS JSON), updated_at = ? WHERE id = ?",
            Self::table()
        );

        sqlx::query(&update)
            .bind(data.as_str())
            .bind(stored.updated_at)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(Self::map_write_error)?;

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        Ok(stored)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?", Self::table());

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Self::map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "{} with id '{}' not found",
                R::KIND,
                id
            )));
        }

        Ok(())
    }
}
