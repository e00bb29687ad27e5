use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::core::Record;
use crate::modules::inventory::models::InventoryItem;
use crate::modules::inventory::services::low_stock_items;
use crate::modules::records::crud_routes;
use crate::modules::records::services::RecordService;

/// GET /inventory-items/low-stock
pub async fn list_low_stock(
    service: web::Data<Arc<RecordService<InventoryItem>>>,
) -> Result<HttpResponse, AppError> {
    let items = low_stock_items(&service).await?;

    Ok(HttpResponse::Ok().json(items))
}

/// Configure inventory routes; `/low-stock` is mounted ahead of `/{id}`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(crud_routes::<InventoryItem>(
        web::scope(InventoryItem::KIND.path())
            .route("/low-stock", web::get().to(list_low_stock)),
    ));
}
