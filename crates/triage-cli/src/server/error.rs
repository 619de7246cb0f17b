//! API error types and handling.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use triage::TriageError;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Error from the triage library.
    Triage(TriageError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Triage(e) => match e {
                TriageError::UnsupportedFormat(_)
                | TriageError::EmptyData(_)
                | TriageError::Csv(_)
                | TriageError::Spreadsheet(_) => StatusCode::BAD_REQUEST,
                TriageError::Io { .. } | TriageError::Json(_) | TriageError::Persistence(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let (error, message) = match self {
            ApiError::BadRequest(msg) => ("bad_request", msg),
            ApiError::Triage(e) => ("triage_error", e.to_string()),
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<TriageError> for ApiError {
    fn from(err: TriageError) -> Self {
        ApiError::Triage(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Triage(e) => write!(f, "Triage error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let unsupported = ApiError::from(TriageError::UnsupportedFormat("x.pdf".into()));
        assert_eq!(unsupported.status(), StatusCode::BAD_REQUEST);

        let persistence = ApiError::from(TriageError::Persistence("disk".into()));
        assert_eq!(persistence.status(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
    }
}
