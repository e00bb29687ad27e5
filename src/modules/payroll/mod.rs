pub mod controllers;
pub mod models;
pub mod services;

pub use models::PayrollRun;
pub use services::{compute_payroll, PayrollResult};
