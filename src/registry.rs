use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::request::Parts;
use axum::response::Response;

/// Parsed query parameters of one request.
pub type QueryParams = HashMap<String, String>;

/// Route name the empty path normalizes to.
pub const ROOT_ROUTE: &str = "root";

/// One endpoint's implementation, invoked with the request head and the
/// parsed query parameters after the dispatcher has admitted and validated
/// the request.
#[async_trait]
pub trait EndpointHandler: Send + Sync {
    async fn run(&self, req: &Parts, params: &QueryParams) -> Response;
}

/// A registered route: its name, parameter contract, and handler.
pub struct EndpointDescriptor {
    pub name: String,
    /// Parameters that must ALL be present. Empty means no constraint.
    pub required_params: Vec<String>,
    /// Parameters of which AT LEAST ONE must be present. Empty means no
    /// constraint.
    pub one_of_params: Vec<String>,
    pub handler: Arc<dyn EndpointHandler>,
}

impl EndpointDescriptor {
    pub fn new(name: impl Into<String>, handler: Arc<dyn EndpointHandler>) -> Self {
        Self {
            name: name.into(),
            required_params: Vec::new(),
            one_of_params: Vec::new(),
            handler,
        }
    }

    pub fn with_required<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_params = params.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_one_of<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of_params = params.into_iter().map(Into::into).collect();
        self
    }
}

/// Static route-name to descriptor mapping. Built once at startup, read-only
/// afterwards.
pub struct EndpointRegistry {
    endpoints: HashMap<String, EndpointDescriptor>,
}

impl EndpointRegistry {
    pub fn new(descriptors: Vec<EndpointDescriptor>) -> Self {
        let endpoints = descriptors
            .into_iter()
            .map(|descriptor| (descriptor.name.clone(), descriptor))
            .collect();
        Self { endpoints }
    }

    /// Exact-match, case-sensitive lookup.
    pub fn resolve(&self, route: &str) -> Option<&EndpointDescriptor> {
        self.endpoints.get(route)
    }

    /// Derive the route name from a request path: the leading separator is
    /// stripped and an empty name becomes the root sentinel.
    pub fn route_name(path: &str) -> &str {
        let name = path.strip_prefix('/').unwrap_or(path);
        if name.is_empty() {
            ROOT_ROUTE
        } else {
            name
        }
    }

    /// Registered route names, sorted.
    pub fn route_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.endpoints.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
