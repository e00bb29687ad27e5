pub mod project_controller;

pub use project_controller::configure;
