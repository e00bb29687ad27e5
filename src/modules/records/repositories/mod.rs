pub mod memory_gateway;
pub mod mysql_gateway;

pub use memory_gateway::InMemoryGateway;
pub use mysql_gateway::MySqlGateway;
