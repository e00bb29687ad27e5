pub mod directory_controller;

pub use directory_controller::configure;
