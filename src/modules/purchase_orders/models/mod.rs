mod purchase_order;

pub use purchase_order::{PurchaseOrder, PurchaseOrderStatus};
