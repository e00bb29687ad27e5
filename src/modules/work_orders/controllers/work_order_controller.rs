use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::error::AppError;
use crate::core::{Money, Record};
use crate::modules::records::crud_routes;
use crate::modules::work_orders::models::WorkOrder;
use crate::modules::work_orders::services::compute_work_order_subtotal;

#[derive(Debug, Deserialize)]
pub struct WorkOrderPreviewRequest {
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
}

#[derive(Debug, Serialize)]
pub struct WorkOrderPreviewResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub hours_worked: Decimal,
    pub hourly_rate: Decimal,
    pub subtotal: Money,
}

/// POST /work-orders/preview
pub async fn preview_work_order(
    request: web::Json<WorkOrderPreviewRequest>,
) -> Result<HttpResponse, AppError> {
    let subtotal = compute_work_order_subtotal(request.hours_worked, request.hourly_rate)?;

    Ok(HttpResponse::Ok().json(WorkOrderPreviewResponse {
        hours_worked: request.hours_worked,
        hourly_rate: request.hourly_rate,
        subtotal,
    }))
}

/// Configure work order routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(crud_routes::<WorkOrder>(
        web::scope(WorkOrder::KIND.path()).route("/preview", web::post().to(preview_work_order)),
    ));
}
