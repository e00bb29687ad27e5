use actix_web::web;

use crate::modules::purchase_orders::models::PurchaseOrder;
use crate::modules::records::configure_crud;

/// Configure purchase order routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_crud::<PurchaseOrder>(cfg);
}
