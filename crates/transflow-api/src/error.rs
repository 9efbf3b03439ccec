//! Error types for the query API.
//!
//! [`ApiError`] is converted into a JSON body of the form
//! `{"error": "...", "status": 400}` via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A path segment could not be parsed (e.g. a non-numeric time step).
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// A query string parameter could not be parsed.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The `{domain}` path segment names no entity kind.
    #[error("unknown domain: {0}")]
    UnknownDomain(String),
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidPath(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidPath(_) | Self::InvalidQuery(_) | Self::UnknownDomain(_) => {
                StatusCode::BAD_REQUEST
            }
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let response = ApiError::UnknownDomain(String::from("boats")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::InvalidQuery(String::from("from")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn path_errors_map_to_bad_request() {
        let response = ApiError::InvalidPath(String::from("time step")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
