mod work_order;

pub use work_order::{generate_work_order_number, WorkOrder, WorkOrderStatus};
