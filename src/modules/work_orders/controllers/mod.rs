pub mod work_order_controller;

pub use work_order_controller::configure;
