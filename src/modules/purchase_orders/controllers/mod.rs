pub mod purchase_order_controller;

pub use purchase_order_controller::configure;
