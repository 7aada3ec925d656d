use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::error::SearchError;

use super::models::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Search(#[from] SearchError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Search(SearchError::MissingCredentials(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Search(SearchError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Search(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation",
            ApiError::Search(e) if e.is_auth() => "auth",
            ApiError::Search(_) => "upstream",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let upstream_status = match &self {
            ApiError::Search(e) => e.upstream_status(),
            ApiError::Validation(_) => None,
        };
        let body = ErrorResponse {
            error: self.to_string(),
            kind: self.kind().to_string(),
            upstream_status,
        };
        (status, Json(body)).into_response()
    }
}
