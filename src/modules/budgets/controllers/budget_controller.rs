use actix_web::web;

use crate::modules::budgets::models::Budget;
use crate::modules::records::configure_crud;

pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_crud::<Budget>(cfg);
}
