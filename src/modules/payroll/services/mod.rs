pub mod payroll_calculator;

pub use payroll_calculator::{compute_payroll, payroll_for, PayrollResult};
