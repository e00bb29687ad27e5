pub mod gateway;
pub mod record;

pub use gateway::RecordGateway;
pub use record::{
    apply_patch, record_from_json, EntityKind, FieldFilter, ListQuery, Record, RecordPatch,
    SortDirection, SortOrder, StoredRecord,
};
