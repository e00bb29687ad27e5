pub mod payroll_controller;

pub use payroll_controller::configure;
