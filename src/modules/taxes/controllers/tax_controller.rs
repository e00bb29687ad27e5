//! Tax controller for HTTP endpoints
//!
//! Exposes the configured rule set and a side-effect-free invoice total
//! preview. Rates come from configuration and cannot be changed over HTTP.

use std::sync::Arc;

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::error::AppError;
use crate::modules::taxes::models::{NetPayPolicy, PricingContext, TaxRuleSet};
use crate::modules::taxes::services::compute_invoice_totals;

#[derive(Debug, Serialize)]
pub struct RatesResponse {
    pub rates: TaxRuleSet,
    pub net_pay_policy: NetPayPolicy,
}

#[derive(Debug, Deserialize)]
pub struct InvoiceTotalsRequest {
    pub subtotal: Decimal,
}

/// GET /taxes/rates
pub async fn list_rates(pricing: web::Data<Arc<PricingContext>>) -> HttpResponse {
    HttpResponse::Ok().json(RatesResponse {
        rates: pricing.rules.clone(),
        net_pay_policy: pricing.net_pay_policy,
    })
}

/// POST /taxes/invoice-totals
pub async fn preview_invoice_totals(
    pricing: web::Data<Arc<PricingContext>>,
    request: web::Json<InvoiceTotalsRequest>,
) -> Result<HttpResponse, AppError> {
    let totals = compute_invoice_totals(request.subtotal, &pricing.rules)?;

    Ok(HttpResponse::Ok().json(totals))
}

/// Configure tax routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/taxes")
            .route("/rates", web::get().to(list_rates))
            .route("/invoice-totals", web::post().to(preview_invoice_totals)),
    );
}
