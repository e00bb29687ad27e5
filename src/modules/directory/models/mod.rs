mod client;
mod employee;
mod supplier;

pub use client::{Client, TaxpayerType};
pub use employee::{ContractType, Employee};
pub use supplier::Supplier;
