use crate::core::{ListQuery, Result, StoredRecord};
use crate::modules::inventory::models::InventoryItem;
use crate::modules::records::services::RecordService;

/// Items whose stock on hand is below their minimum, in the default order
pub async fn low_stock_items(
    service: &RecordService<InventoryItem>,
) -> Result<Vec<StoredRecord<InventoryItem>>> {
    let items = service.list(ListQuery::for_kind::<InventoryItem>()).await?;
    let low: Vec<_> = items
        .into_iter()
        .filter(|stored| stored.record.is_below_minimum())
        .collect();

    tracing::debug!(count = low.len(), "Low-stock items found");

    Ok(low)
}
