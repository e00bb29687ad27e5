pub mod budgets;
pub mod directory;
pub mod health;
pub mod inventory;
pub mod invoices;
pub mod payroll;
pub mod projects;
pub mod purchase_orders;
pub mod records;
pub mod taxes;
pub mod work_orders;
