use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON envelope for every gateway-generated outcome.
///
/// Successful relays never pass through this type: the dispatcher answers
/// with whatever the endpoint handler produced, verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    #[serde(rename = "oneOf", skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<String>>,
}

impl ApiResponse {
    pub fn failure(code: u16, error: &str) -> Self {
        Self {
            success: false,
            code,
            error: Some(error.to_string()),
            required: None,
            one_of: None,
        }
    }

    /// 400 response listing the full required-parameter contract.
    pub fn missing_required(required: Vec<String>) -> Self {
        Self {
            required: Some(required),
            ..Self::failure(400, "Missing parameters")
        }
    }

    /// 400 response listing the alternatives of which one must be supplied.
    pub fn missing_one_of(one_of: Vec<String>) -> Self {
        Self {
            one_of: Some(one_of),
            ..Self::failure(400, "Specify one of these parameters")
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
