pub mod error;
pub mod money;
pub mod traits;

pub use error::{AppError, Result};
pub use money::Money;
pub use traits::{
    apply_patch, record_from_json, EntityKind, FieldFilter, ListQuery, Record, RecordGateway,
    RecordPatch, SortDirection, SortOrder, StoredRecord,
};
