pub mod budget_controller;

pub use budget_controller::configure;
