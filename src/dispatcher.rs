use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use crate::error::GatewayError;
use crate::rate_limiter::RateLimiter;
use crate::registry::{EndpointRegistry, QueryParams};
use crate::validation::{self, ValidationResult};

/// Partition key used when no identity header is present.
pub const DEFAULT_CLIENT_ID: &str = "0.0.0.0";

const FORWARDED_FOR: &str = "x-forwarded-for";

/// Per-request orchestration: identity, admission, routing, validation,
/// handler invocation, admission recording.
pub struct Dispatcher {
    registry: EndpointRegistry,
    limiter: RateLimiter,
}

impl Dispatcher {
    pub fn new(registry: EndpointRegistry, limiter: RateLimiter) -> Self {
        Self { registry, limiter }
    }

    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Run one request through the admission pipeline, short-circuiting on
    /// the first failing step. Rejected requests never touch the counter.
    pub async fn dispatch(&self, parts: &Parts, params: &QueryParams) -> Response {
        let client = match client_identity(&parts.headers) {
            Some(ip) => ip.to_string(),
            None if self.limiter.is_enabled() => {
                warn!(uri = %parts.uri, "identity header missing with rate limiting enabled");
                return GatewayError::ClientIdentityUnavailable.into_response();
            }
            None => DEFAULT_CLIENT_ID.to_string(),
        };

        if !self.limiter.admit(&client) {
            debug!(client = %client, uri = %parts.uri, "request rejected: rate limited");
            return GatewayError::RateLimited.into_response();
        }

        let route = EndpointRegistry::route_name(parts.uri.path());
        let Some(endpoint) = self.registry.resolve(route) else {
            debug!(route, "request rejected: unknown route");
            return GatewayError::RouteNotFound.into_response();
        };

        match validation::validate(endpoint, params) {
            ValidationResult::Ok => {}
            ValidationResult::MissingRequired(required) => {
                debug!(route, "request rejected: missing required parameters");
                return GatewayError::MissingParams { required }.into_response();
            }
            ValidationResult::MissingAlternative(one_of) => {
                debug!(route, "request rejected: no alternative parameter present");
                return GatewayError::MissingOneOf { one_of }.into_response();
            }
        }

        self.limiter.record(&client);
        endpoint.handler.run(parts, params).await
    }
}

/// Client identity as supplied by the trusted reverse proxy: the first entry
/// of `x-forwarded-for`. Only trustworthy when the network edge overwrites
/// the header.
pub fn client_identity(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(FORWARDED_FOR)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
}
