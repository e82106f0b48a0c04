use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response::ApiResponse;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Gateway error taxonomy.
///
/// The first four variants are the expected, user-facing request outcomes.
/// `ClientIdentityUnavailable` is a deployment fault: the reverse proxy must
/// supply the identity header whenever rate limiting is enabled.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Not found")]
    RouteNotFound,

    #[error("You are being ratelimited")]
    RateLimited,

    #[error("Missing parameters")]
    MissingParams { required: Vec<String> },

    #[error("Specify one of these parameters")]
    MissingOneOf { one_of: Vec<String> },

    #[error(
        "x-forwarded-for header is required but not provided. \
         Disable rateLimitEnabled in config.json to solve this."
    )]
    ClientIdentityUnavailable,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upstream request failed")]
    Upstream(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl GatewayError {
    /// Status code carried in the response envelope (and mirrored as the
    /// HTTP status).
    pub fn code(&self) -> u16 {
        match self {
            GatewayError::RouteNotFound => 404,
            GatewayError::RateLimited => 429,
            GatewayError::MissingParams { .. } | GatewayError::MissingOneOf { .. } => 400,
            GatewayError::Upstream(_) => 502,
            GatewayError::ClientIdentityUnavailable
            | GatewayError::Config(_)
            | GatewayError::Io(_)
            | GatewayError::ConfigParse(_) => 500,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let code = self.code();
        let response = match self {
            GatewayError::MissingParams { required } => ApiResponse::missing_required(required),
            GatewayError::MissingOneOf { one_of } => ApiResponse::missing_one_of(one_of),
            other => ApiResponse::failure(code, &other.to_string()),
        };
        response.into_response()
    }
}
