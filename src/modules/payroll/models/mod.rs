mod payroll_run;

pub use payroll_run::{validate_period, PayrollRun};
