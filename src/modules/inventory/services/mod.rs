pub mod stock_service;

pub use stock_service::low_stock_items;
