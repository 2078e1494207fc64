use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cloudaudit_core::CloudAuditError;
use serde_json::json;
use thiserror::Error;

/// Body message for any failed analysis. The concrete provider error is
/// logged server-side and never sent to the client.
pub const ANALYSIS_FAILED: &str = "analysis failed";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("CloudAudit error: {0}")]
    CloudAudit(#[from] CloudAuditError),

    // Display is the bare message; upload validation replies depend on it.
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::CloudAudit(ref err) => match err {
                CloudAuditError::Network(_)
                | CloudAuditError::Timeout(_)
                | CloudAuditError::External(_)
                | CloudAuditError::Parse(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, ANALYSIS_FAILED.to_string())
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, ANALYSIS_FAILED.to_string()),
            },
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
