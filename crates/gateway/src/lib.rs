pub mod builder;
pub mod error;
pub mod gateway;

pub use builder::ConsoleGatewayBuilder;
pub use error::GatewayError;
pub use gateway::ConsoleGateway;
