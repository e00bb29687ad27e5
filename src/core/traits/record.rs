use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::fmt;

use crate::core::{AppError, Result};

/// Every kind of record the back office persists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Employee,
    Client,
    Supplier,
    Project,
    Invoice,
    Budget,
    PurchaseOrder,
    WorkOrder,
    InventoryItem,
    PayrollRun,
}

impl EntityKind {
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Employee,
        EntityKind::Client,
        EntityKind::Supplier,
        EntityKind::Project,
        EntityKind::Invoice,
        EntityKind::Budget,
        EntityKind::PurchaseOrder,
        EntityKind::WorkOrder,
        EntityKind::InventoryItem,
        EntityKind::PayrollRun,
    ];

    /// Backing table name
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Employee => "employees",
            EntityKind::Client => "clients",
            EntityKind::Supplier => "suppliers",
            EntityKind::Project => "projects",
            EntityKind::Invoice => "invoices",
            EntityKind::Budget => "budgets",
            EntityKind::PurchaseOrder => "purchase_orders",
            EntityKind::WorkOrder => "work_orders",
            EntityKind::InventoryItem => "inventory_items",
            EntityKind::PayrollRun => "payroll_runs",
        }
    }

    /// URL scope the HTTP API mounts this kind under
    pub fn path(&self) -> &'static str {
        match self {
            EntityKind::Employee => "/employees",
            EntityKind::Client => "/clients",
            EntityKind::Supplier => "/suppliers",
            EntityKind::Project => "/projects",
            EntityKind::Invoice => "/invoices",
            EntityKind::Budget => "/budgets",
            EntityKind::PurchaseOrder => "/purchase-orders",
            EntityKind::WorkOrder => "/work-orders",
            EntityKind::InventoryItem => "/inventory-items",
            EntityKind::PayrollRun => "/payroll-runs",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Employee => "employee",
            EntityKind::Client => "client",
            EntityKind::Supplier => "supplier",
            EntityKind::Project => "project",
            EntityKind::Invoice => "invoice",
            EntityKind::Budget => "budget",
            EntityKind::PurchaseOrder => "purchase order",
            EntityKind::WorkOrder => "work order",
            EntityKind::InventoryItem => "inventory item",
            EntityKind::PayrollRun => "payroll run",
        };
        f.write_str(name)
    }
}

/// Typed record schema for one entity kind.
///
/// Records are validated at the gateway boundary: a gateway calls
/// [`Record::validate`] before every write and rejects failures with
/// [`AppError::Constraint`].
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Record fields accepted as `order_by` (timestamps are always accepted)
    const SORT_FIELDS: &'static [&'static str];

    /// Record fields accepted as equality filters
    const FILTER_FIELDS: &'static [&'static str];

    /// Field holding the natural key that must be unique per kind
    const UNIQUE_FIELD: Option<&'static str> = None;

    /// Append-only kinds refuse update and delete
    const APPEND_ONLY: bool = false;

    fn default_order() -> SortOrder {
        SortOrder::desc("created_at")
    }

    /// Natural key value, when the kind has one
    fn unique_key(&self) -> Option<String> {
        None
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// A record as held by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord<R> {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: R,
}

/// Partial record: field name → new value
pub type RecordPatch = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl std::str::FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(AppError::validation(format!("Invalid sort direction: {}", s))),
        }
    }
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub field: String,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    pub fn is_timestamp(&self) -> bool {
        self.field == "created_at" || self.field == "updated_at"
    }
}

/// Equality filter on a record field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

/// Sort order plus filters for a `list` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub order: SortOrder,
    pub filters: Vec<FieldFilter>,
}

impl ListQuery {
    /// The kind's default order, no filters
    pub fn for_kind<R: Record>() -> Self {
        Self {
            order: R::default_order(),
            filters: Vec::new(),
        }
    }

    pub fn ordered_by(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Rejects sort and filter fields outside the kind's whitelist.
    ///
    /// Gateways interpolate these names into queries, so this must pass
    /// before any store sees them.
    pub fn validate_for<R: Record>(&self) -> Result<()> {
        if !self.order.is_timestamp() && !R::SORT_FIELDS.contains(&self.order.field.as_str()) {
            return Err(AppError::validation(format!(
                "Cannot sort {} records by '{}'",
                R::KIND,
                self.order.field
            )));
        }

        for filter in &self.filters {
            if !R::FILTER_FIELDS.contains(&filter.field.as_str()) {
                return Err(AppError::validation(format!(
                    "Cannot filter {} records by '{}'",
                    R::KIND,
                    filter.field
                )));
            }
        }

        Ok(())
    }
}

/// Merges a partial record into an existing one and re-validates the result
pub fn apply_patch<R: Record>(current: &R, patch: &RecordPatch) -> Result<R> {
    let mut document = match serde_json::to_value(current)? {
        Value::Object(map) => map,
        _ => return Err(AppError::internal(format!("{} did not serialize to an object", R::KIND))),
    };

    for (field, value) in patch {
        if !document.contains_key(field) {
            return Err(AppError::constraint(format!(
                "Unknown {} field '{}'",
                R::KIND,
                field
            )));
        }
        document.insert(field.clone(), value.clone());
    }

    let merged: R = serde_json::from_value(Value::Object(document)).map_err(decode_error::<R>)?;
    merged.validate()?;

    Ok(merged)
}

/// Reads a full record from an untyped JSON document
pub fn record_from_json<R: Record>(document: Value) -> Result<R> {
    serde_json::from_value(document).map_err(decode_error::<R>)
}

/// Maps a record decoding failure to an error kind.
///
/// `Money` fields validate inside serde and surface an `InvalidAmount`
/// message; those keep their kind. Everything else is a schema mismatch.
fn decode_error<R: Record>(err: serde_json::Error) -> AppError {
    let cause = err.to_string();
    let message = format!("Invalid {} record: {}", R::KIND, cause);

    if cause.starts_with(&AppError::InvalidAmount(String::new()).to_string()) {
        AppError::InvalidAmount(message)
    } else {
        AppError::Constraint(message)
    }
}

/// Serializes a record into a patch that overwrites every field
pub fn to_patch<R: Record>(record: &R) -> Result<RecordPatch> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        _ => Err(AppError::internal(format!("{} did not serialize to an object", R::KIND))),
    }
}

/// Reads a field the way equality filters compare it: strings unquoted,
/// everything else in its JSON text form
pub fn field_text(document: &Value, field: &str) -> Option<String> {
    match document.get(field)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Orders two JSON field values: nulls first, numbers numerically, strings
/// lexicographically
pub fn compare_fields(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}
