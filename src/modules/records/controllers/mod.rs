pub mod crud_controller;

pub use crud_controller::{configure_crud, crud_routes, list_query_from_params};
