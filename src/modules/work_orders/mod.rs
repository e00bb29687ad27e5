pub mod controllers;
pub mod models;
pub mod services;

pub use models::{WorkOrder, WorkOrderStatus};
pub use services::compute_work_order_subtotal;
