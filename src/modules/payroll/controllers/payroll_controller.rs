use std::sync::Arc;

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::error::AppError;
use crate::core::Record;
use crate::modules::payroll::models::PayrollRun;
use crate::modules::payroll::services::compute_payroll;
use crate::modules::records::crud_routes;
use crate::modules::taxes::models::PricingContext;

/// Request body for a payroll preview
#[derive(Debug, Deserialize)]
pub struct PayrollPreviewRequest {
    pub base_salary: Decimal,
    #[serde(default)]
    pub overtime_pay: Decimal,
}

/// Compute deductions and net pay without recording a run
/// POST /payroll-runs/preview
pub async fn preview_payroll(
    pricing: web::Data<Arc<PricingContext>>,
    request: web::Json<PayrollPreviewRequest>,
) -> Result<HttpResponse, AppError> {
    let result = compute_payroll(
        request.base_salary,
        request.overtime_pay,
        &pricing.rules,
        pricing.net_pay_policy,
    )?;

    Ok(HttpResponse::Ok().json(result))
}

/// Configure payroll routes.
///
/// PATCH and DELETE stay mounted and answer 409: payroll runs are append-only.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(crud_routes::<PayrollRun>(
        web::scope(PayrollRun::KIND.path()).route("/preview", web::post().to(preview_payroll)),
    ));
}
