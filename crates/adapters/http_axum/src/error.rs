//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use incidents_domain::error::IncidentsError;

use crate::api::incidents::REQUIRED_FIELDS;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Everything a handler can fail with.
///
/// Request-shape problems are detected here in the adapter; field and
/// lookup failures come from the domain.
#[derive(Debug)]
pub enum ApiError {
    /// Body absent or not a non-empty JSON object.
    InvalidRequest,
    /// At least one of [`REQUIRED_FIELDS`] is absent.
    MissingFields,
    /// Validation, lookup or storage failure from the service layer.
    Domain(IncidentsError),
}

impl From<IncidentsError> for ApiError {
    fn from(err: IncidentsError) -> Self {
        Self::Domain(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidRequest => (
                StatusCode::BAD_REQUEST,
                "Request body must be JSON".to_string(),
            ),
            Self::MissingFields => (
                StatusCode::BAD_REQUEST,
                format!("Missing required fields: {}", REQUIRED_FIELDS.join(", ")),
            ),
            Self::Domain(IncidentsError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Domain(IncidentsError::NotFound(err)) => (StatusCode::NOT_FOUND, err.to_string()),
            Self::Domain(IncidentsError::Storage(err)) => {
                tracing::error!(error = ?err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
