use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;

use crate::dispatcher::{client_identity, DEFAULT_CLIENT_ID};

/// Logging middleware for request/response tracking
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let client = client_identity(request.headers())
        .unwrap_or(DEFAULT_CLIENT_ID)
        .to_string();

    info!(
        target: "lavacake::middleware",
        method = %method,
        uri = %uri,
        client = %client,
        "Incoming request"
    );

    let response = next.run(request).await;

    let status = response.status();
    info!(
        target: "lavacake::middleware",
        method = %method,
        uri = %uri,
        client = %client,
        status = %status,
        "Request completed"
    );

    response
}
