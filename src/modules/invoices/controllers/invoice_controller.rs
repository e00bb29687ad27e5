use actix_web::web;

use crate::modules::invoices::models::Invoice;
use crate::modules::records::configure_crud;

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_crud::<Invoice>(cfg);
}
