pub mod work_order_calculator;

pub use work_order_calculator::{compute_work_order_subtotal, subtotal_for};
