pub mod errors;
pub mod gateway;
pub mod headers;
pub mod metrics_defs;
pub mod options;
pub mod query;

pub use errors::GatewayError;
pub use gateway::RequestGateway;
pub use options::{RequestOptions, ResponseEnvelope, ServiceProfile};
