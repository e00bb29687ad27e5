// Record gateway, services and the generic CRUD surface shared by every entity

pub mod controllers;
pub mod repositories;
pub mod services;
pub mod validation;

pub use controllers::{configure_crud, crud_routes};
pub use repositories::{InMemoryGateway, MySqlGateway};
pub use services::{DerivedFields, RecordService};
