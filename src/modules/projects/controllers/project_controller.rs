use actix_web::web;

use crate::modules::projects::models::Project;
use crate::modules::records::configure_crud;

pub fn configure(cfg: &mut web::ServiceConfig) {
    configure_crud::<Project>(cfg);
}
