// Invoices module

pub mod controllers;
pub mod models;

pub use models::{Invoice, InvoiceStatus};
