use actix_web::web;

use crate::modules::directory::models::{Client, Employee, Supplier};
use crate::modules::records::configure_crud;

/// Configure employee, client and supplier routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_crud::<Employee>(cfg);
    configure_crud::<Client>(cfg);
    configure_crud::<Supplier>(cfg);
}
