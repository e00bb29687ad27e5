// People and companies the back office deals with

pub mod controllers;
pub mod models;

pub use models::{Client, ContractType, Employee, Supplier, TaxpayerType};
