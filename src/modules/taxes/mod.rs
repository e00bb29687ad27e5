pub mod controllers;
pub mod models;
pub mod services;

pub use models::{NetPayPolicy, PricingContext, TaxRate, TaxRuleSet};
pub use services::{compute_invoice_totals, InvoiceTotals, TaxedDocument};
