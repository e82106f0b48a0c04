pub mod config;
pub mod dispatcher;
pub mod error;
pub mod middleware;
pub mod rate_limiter;
pub mod registry;
pub mod response;
pub mod routes;
pub mod server;
pub mod upstream;
pub mod validation;

pub use config::Config;
pub use dispatcher::Dispatcher;
pub use error::{GatewayError, Result};
pub use rate_limiter::RateLimiter;
pub use registry::{EndpointDescriptor, EndpointHandler, EndpointRegistry};
pub use response::ApiResponse;
pub use server::{create_app, Server};
