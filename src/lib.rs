//! Back-office core for a construction company: Paraguayan tax, payroll and
//! invoice-total calculators, typed records behind a pluggable record
//! gateway, and the JSON HTTP API over both.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use app::{AppServices, Storage};
pub use modules::payroll;
pub use modules::records;
pub use modules::taxes;
pub use modules::work_orders;
